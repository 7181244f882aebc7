use crate::model::GraphKind;

/// How much of a view must be repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedrawKind {
    /// Repaint only; no geometry or content changed (hover, press feedback, drags).
    Light,
    /// Content or visibility changed; rebuild everything derived from it.
    Full,
}

/// Receives redraw requests for the four views.
pub trait ViewUpdater {
    fn request_redraw(&mut self, view: GraphKind, kind: RedrawKind);

    fn request_redraw_all(&mut self, kind: RedrawKind) {
        for view in GraphKind::ALL {
            self.request_redraw(view, kind);
        }
    }
}

impl<F> ViewUpdater for F
where
    F: FnMut(GraphKind, RedrawKind),
{
    fn request_redraw(&mut self, view: GraphKind, kind: RedrawKind) {
        self(view, kind)
    }
}
