//! Leader/follower camera propagation between the super view and its two children.
//!
//! Everything here is a no-op unless `synchronized_views` is set.

use crate::geom::{Point, Rect, Size};
use crate::surface::{ContentHandle, RenderSurface};
use crate::viewport::Viewport;
use narwhal_core::{DiffGraphs, GraphKind, Side};

/// Which child drives the other when both show the same camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leader {
    Primary,
    Secondary,
    Tied,
}

/// The child with the strictly larger rendered width leads.
pub fn leader_by_width(primary: f64, secondary: f64) -> Leader {
    if primary > secondary {
        Leader::Primary
    } else if secondary > primary {
        Leader::Secondary
    } else {
        Leader::Tied
    }
}

/// Leader for fitting: only children that render at least one node qualify; on a tie the
/// secondary leads.
pub fn fit_leader(
    primary_nodes: usize,
    primary_width: f64,
    secondary_nodes: usize,
    secondary_width: f64,
) -> Option<Side> {
    match (primary_nodes > 0, secondary_nodes > 0) {
        (false, false) => None,
        (true, false) => Some(Side::Primary),
        (false, true) => Some(Side::Secondary),
        (true, true) => match leader_by_width(primary_width, secondary_width) {
            Leader::Primary => Some(Side::Primary),
            Leader::Secondary | Leader::Tied => Some(Side::Secondary),
        },
    }
}

/// Camera that shows some content bounds in full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub zoom: f64,
    pub origin: Point,
}

/// Computes the camera that fits content into a canvas.
pub trait ContentFitter {
    fn fit(&self, bounds: Rect, canvas: Size) -> Option<Fit>;
}

impl<F> ContentFitter for F
where
    F: Fn(Rect, Size) -> Option<Fit>,
{
    fn fit(&self, bounds: Rect, canvas: Size) -> Option<Fit> {
        self(bounds, canvas)
    }
}

/// Fits the bounds inside the canvas shrunk by `margin` pixels on every side, centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginFitter {
    pub margin: f64,
}

impl Default for MarginFitter {
    fn default() -> Self {
        Self { margin: 10.0 }
    }
}

impl ContentFitter for MarginFitter {
    fn fit(&self, bounds: Rect, canvas: Size) -> Option<Fit> {
        if bounds.is_empty() || canvas.is_empty() {
            return None;
        }
        let available_w = (canvas.width - 2.0 * self.margin).max(1.0);
        let available_h = (canvas.height - 2.0 * self.margin).max(1.0);
        let zoom = (available_w / bounds.width()).min(available_h / bounds.height());
        if !zoom.is_finite() || zoom <= 0.0 {
            return None;
        }
        let origin = bounds.center() - canvas.to_vector() / zoom / 2.0;
        Some(Fit { zoom, origin })
    }
}

/// Mutable access to the three synchronized surfaces.
pub struct TwinViews<'a> {
    pub primary: &'a mut dyn RenderSurface,
    pub secondary: &'a mut dyn RenderSurface,
    pub super_view: &'a mut dyn RenderSurface,
}

impl<'a> TwinViews<'a> {
    pub fn child(&mut self, side: Side) -> &mut (dyn RenderSurface + 'a) {
        match side {
            Side::Primary => &mut *self.primary,
            Side::Secondary => &mut *self.secondary,
        }
    }
}

fn set_zoom_keep_center(surface: &mut dyn RenderSurface, zoom: f64) {
    let vp = surface.viewport();
    if vp.zoom == zoom {
        return;
    }
    let center = vp.center();
    let zoomed = Viewport { zoom, ..vp };
    surface.set_viewport(vp.world, zoom, zoomed.origin_for_center(center));
}

fn shift_origin(surface: &mut dyn RenderSurface, delta: crate::geom::Vector) {
    let vp = surface.viewport();
    surface.set_viewport(vp.world, vp.zoom, vp.origin + delta);
}

#[derive(Debug, Clone, Default)]
pub struct CameraSynchronizer<F = MarginFitter> {
    fitter: F,
}

impl<F: ContentFitter> CameraSynchronizer<F> {
    pub fn new(fitter: F) -> Self {
        Self { fitter }
    }

    pub fn fitter(&self) -> &F {
        &self.fitter
    }

    /// Copies the super view's world rectangle and zoom onto both children. The wider child takes
    /// the super origin; the narrower one re-centers on the super center. Equal widths: both take
    /// the origin.
    pub fn adopt_super_view_canvas_properties(
        &self,
        graphs: &DiffGraphs,
        views: &mut TwinViews<'_>,
    ) -> Option<Leader> {
        if !graphs.settings().synchronized_views {
            return None;
        }
        let sup = views.super_view.viewport();
        let center = sup.center();

        for side in Side::BOTH {
            let child = views.child(side);
            let vp = child.viewport();
            child.set_viewport(sup.world, sup.zoom, vp.origin);
        }

        let leader = leader_by_width(
            views.primary.rendered_width(),
            views.secondary.rendered_width(),
        );
        match leader {
            Leader::Primary => {
                views.primary.set_viewport(sup.world, sup.zoom, sup.origin);
                views.secondary.set_center(center);
            }
            Leader::Secondary => {
                views.secondary.set_viewport(sup.world, sup.zoom, sup.origin);
                views.primary.set_center(center);
            }
            Leader::Tied => {
                views.primary.set_viewport(sup.world, sup.zoom, sup.origin);
                views.secondary.set_viewport(sup.world, sup.zoom, sup.origin);
            }
        }
        tracing::debug!(?leader, zoom = sup.zoom, "children adopted super view camera");
        Some(leader)
    }

    /// Fits the leading child so the whole super topology is visible, then zooms out by the
    /// configured factor. Only the leader is touched; returns it.
    pub fn fit_to_overall_content(
        &self,
        graphs: &DiffGraphs,
        views: &mut TwinViews<'_>,
    ) -> Option<Side> {
        if !graphs.settings().synchronized_views {
            return None;
        }
        let side = fit_leader(
            views.primary.node_count(),
            views.primary.rendered_width(),
            views.secondary.node_count(),
            views.secondary.rendered_width(),
        )?;

        let leader = views.child(side);
        let original = leader.content();
        leader.set_content(ContentHandle(GraphKind::Super));
        let bounds = leader.content_bounds();
        let vp = leader.viewport();
        let fit = self.fitter.fit(bounds, vp.size);
        leader.set_content(original);

        let Some(fit) = fit else {
            tracing::debug!(?side, "nothing to fit");
            return None;
        };
        let zoom = fit.zoom * graphs.settings().zoom_out_factor;
        leader.set_viewport(vp.world, zoom, fit.origin);
        tracing::debug!(?side, fit_zoom = fit.zoom, zoom, "fitted leader to overall content");
        Some(side)
    }

    /// The twin child and the super view take over the zoom of `from`.
    pub fn adopt_zoom(&self, graphs: &DiffGraphs, from: Side, views: &mut TwinViews<'_>) -> bool {
        if !graphs.settings().synchronized_views || graphs.topology().is_function_missing(from) {
            return false;
        }
        let zoom = views.child(from).viewport().zoom;
        set_zoom_keep_center(views.child(from.other()), zoom);
        set_zoom_keep_center(&mut *views.super_view, zoom);
        tracing::trace!(?from, zoom, "adopted child zoom");
        true
    }

    /// The twin child and the super view move by the same amount `from` moved since
    /// `previous_origin`.
    pub fn adopt_view_point(
        &self,
        graphs: &DiffGraphs,
        from: Side,
        previous_origin: Point,
        views: &mut TwinViews<'_>,
    ) -> bool {
        if !graphs.settings().synchronized_views || graphs.topology().is_function_missing(from) {
            return false;
        }
        let delta = views.child(from).viewport().origin - previous_origin;
        if delta == crate::geom::Vector::zero() {
            return false;
        }
        shift_origin(views.child(from.other()), delta);
        shift_origin(&mut *views.super_view, delta);
        tracing::trace!(?from, dx = delta.x, dy = delta.y, "adopted child view point");
        true
    }
}
