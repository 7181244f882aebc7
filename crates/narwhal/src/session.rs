use narwhal_core::{
    Confirmation, Deactivation, DiffDataset, DiffGraphs, GraphEvent, GraphKind, GraphSettings,
    LayoutEngine, NodeIdentity, NodeIx, RedrawKind, Result, SettingKey, Side, Subscription,
    ViewUpdater,
};
use narwhal_view::geom::{Point, Vector};
use narwhal_view::{
    CameraSynchronizer, Command, ContentFitter, Hit, InteractionMachine, Leader, MarginFitter,
    NodeRef, PointerAction, PointerEvent, RenderSurface, Transition, TwinViews,
};
use serde_json::Value;

/// The four rendering surfaces of one diff window.
pub struct Surfaces<'a> {
    pub primary: &'a mut dyn RenderSurface,
    pub secondary: &'a mut dyn RenderSurface,
    pub combined: &'a mut dyn RenderSurface,
    pub super_view: &'a mut dyn RenderSurface,
}

impl<'a> Surfaces<'a> {
    pub fn get(&mut self, view: GraphKind) -> &mut (dyn RenderSurface + 'a) {
        match view {
            GraphKind::Primary => &mut *self.primary,
            GraphKind::Secondary => &mut *self.secondary,
            GraphKind::Combined => &mut *self.combined,
            GraphKind::Super => &mut *self.super_view,
        }
    }

    fn twin(&mut self) -> TwinViews<'_> {
        TwinViews {
            primary: &mut *self.primary,
            secondary: &mut *self.secondary,
            super_view: &mut *self.super_view,
        }
    }

    fn redraw_interactive(&mut self, kind: RedrawKind) {
        for view in INTERACTIVE {
            self.get(view).request_redraw(kind);
        }
    }
}

impl ViewUpdater for Surfaces<'_> {
    fn request_redraw(&mut self, view: GraphKind, kind: RedrawKind) {
        self.get(view).request_redraw(kind);
    }
}

const INTERACTIVE: [GraphKind; 3] = [GraphKind::Primary, GraphKind::Secondary, GraphKind::Combined];

/// One diff window: the model, an interaction machine per interactive view, and the camera
/// synchronizer.
///
/// The super view is never shown, so it has no machine.
#[derive(Debug)]
pub struct DiffSession<F = MarginFitter> {
    graphs: DiffGraphs,
    primary: InteractionMachine,
    secondary: InteractionMachine,
    combined: InteractionMachine,
    camera: CameraSynchronizer<F>,
}

impl DiffSession<MarginFitter> {
    pub fn new(graphs: DiffGraphs) -> Self {
        Self::with_fitter(graphs, MarginFitter::default())
    }

    pub fn from_json(dataset: &str, settings: GraphSettings) -> Result<Self> {
        let dataset = DiffDataset::from_json(dataset)?;
        Ok(Self::new(DiffGraphs::from_dataset(&dataset, settings)?))
    }
}

impl<F: ContentFitter> DiffSession<F> {
    pub fn with_fitter(graphs: DiffGraphs, fitter: F) -> Self {
        Self {
            graphs,
            primary: InteractionMachine::new(),
            secondary: InteractionMachine::new(),
            combined: InteractionMachine::new(),
            camera: CameraSynchronizer::new(fitter),
        }
    }

    pub fn graphs(&self) -> &DiffGraphs {
        &self.graphs
    }

    pub fn subscribe<C>(&mut self, callback: C) -> Subscription
    where
        C: FnMut(&GraphEvent) + 'static,
    {
        self.graphs.subscribe(callback)
    }

    pub fn machine(&self, view: GraphKind) -> Option<&InteractionMachine> {
        match view {
            GraphKind::Primary => Some(&self.primary),
            GraphKind::Secondary => Some(&self.secondary),
            GraphKind::Combined => Some(&self.combined),
            GraphKind::Super => None,
        }
    }

    fn machine_mut(&mut self, view: GraphKind) -> Option<&mut InteractionMachine> {
        match view {
            GraphKind::Primary => Some(&mut self.primary),
            GraphKind::Secondary => Some(&mut self.secondary),
            GraphKind::Combined => Some(&mut self.combined),
            GraphKind::Super => None,
        }
    }

    /// Feeds a pointer event of `view` through its machine and executes the resulting command.
    ///
    /// Returns `None` for the super view, which takes no input. Context menus are left to the
    /// caller: the transition carries [`Command::ContextMenu`].
    pub fn handle_pointer(
        &mut self,
        view: GraphKind,
        event: &PointerEvent,
        surfaces: &mut Surfaces<'_>,
    ) -> Result<Option<Transition>> {
        let hit = match event.action {
            PointerAction::Pressed | PointerAction::Moved => {
                surfaces.get(view).hit_test(event.position)
            }
            PointerAction::Released | PointerAction::Dragged => Hit::Outside,
        };
        let Some(machine) = self.machine_mut(view) else {
            return Ok(None);
        };
        let transition = machine.handle(event, hit);

        if let Some(kind) = transition.redraw {
            surfaces.get(view).request_redraw(kind);
        }
        if let Some(command) = transition.command {
            self.execute(view, command, surfaces)?;
        }
        Ok(Some(transition))
    }

    fn execute(
        &mut self,
        view: GraphKind,
        command: Command,
        surfaces: &mut Surfaces<'_>,
    ) -> Result<()> {
        match command {
            Command::SelectNode {
                node: NodeRef::Raw(ix),
                additive,
            } => {
                let Some(id) = self.identity_at(view, ix) else {
                    return Ok(());
                };
                if !self.graphs.select(id, additive) {
                    return Ok(());
                }
                tracing::debug!(%view, identity = %id, additive, "node selected");
                if self.graphs.settings().proximity.enabled {
                    self.graphs.apply_proximity_to_selection()?;
                    surfaces.request_redraw_all(RedrawKind::Full);
                } else {
                    surfaces.redraw_interactive(RedrawKind::Light);
                }
            }
            Command::SelectNode {
                node: NodeRef::Marker(attached),
                ..
            } => {
                let Some(id) = self.identity_at(view, attached) else {
                    return Ok(());
                };
                tracing::debug!(%view, identity = %id, "expanding proximity marker");
                self.graphs.reveal_proximity(id)?;
                surfaces.request_redraw_all(RedrawKind::Full);
            }
            Command::ClearSelection => {
                if self.graphs.clear_selection() {
                    surfaces.redraw_interactive(RedrawKind::Light);
                }
            }
            Command::Pan(delta) => self.pan(view, delta, surfaces),
            Command::ContextMenu(_) => {}
        }
        Ok(())
    }

    fn identity_at(&self, view: GraphKind, ix: NodeIx) -> Option<NodeIdentity> {
        let topology = self.graphs.topology();
        match view.side() {
            Some(side) => topology.identity_of_node(side, ix),
            None => topology
                .combined()
                .contains_node(ix)
                .then_some(NodeIdentity(ix)),
        }
    }

    /// Moves the camera of `view` by a canvas (pixel) delta and lets the twin views follow.
    pub fn pan(&mut self, view: GraphKind, canvas_delta: Vector, surfaces: &mut Surfaces<'_>) {
        let surface = surfaces.get(view);
        let vp = surface.viewport();
        let previous = vp.origin;
        surface.set_viewport(vp.world, vp.zoom, previous - vp.to_world_delta(canvas_delta));
        surface.request_redraw(RedrawKind::Light);
        if let Some(side) = view.side() {
            self.follow_view_point(side, previous, surfaces);
        }
    }

    /// Sets the zoom of `view`, keeping its center, and lets the twin views follow.
    pub fn set_zoom(&mut self, view: GraphKind, zoom: f64, surfaces: &mut Surfaces<'_>) {
        if !(zoom.is_finite() && zoom > 0.0) {
            return;
        }
        let surface = surfaces.get(view);
        let vp = surface.viewport();
        let center = vp.center();
        surface.set_viewport(vp.world, zoom, vp.origin);
        surface.set_center(center);
        surface.request_redraw(RedrawKind::Light);
        if let Some(side) = view.side() {
            if self.camera.adopt_zoom(&self.graphs, side, &mut surfaces.twin()) {
                surfaces.get(side.other().view()).request_redraw(RedrawKind::Light);
            }
        }
    }

    fn follow_view_point(&self, side: Side, previous: Point, surfaces: &mut Surfaces<'_>) {
        if self
            .camera
            .adopt_view_point(&self.graphs, side, previous, &mut surfaces.twin())
        {
            surfaces.get(side.other().view()).request_redraw(RedrawKind::Light);
        }
    }

    /// Puts both children on the super view's camera.
    pub fn adopt_super_view(&self, surfaces: &mut Surfaces<'_>) -> Option<Leader> {
        let leader = self
            .camera
            .adopt_super_view_canvas_properties(&self.graphs, &mut surfaces.twin())?;
        surfaces.get(GraphKind::Primary).request_redraw(RedrawKind::Light);
        surfaces.get(GraphKind::Secondary).request_redraw(RedrawKind::Light);
        Some(leader)
    }

    /// Fits the leading child to the whole diff and propagates its camera to the others.
    pub fn fit_to_content(&self, surfaces: &mut Surfaces<'_>) -> Option<Side> {
        let before = child_origins(surfaces);
        let side = self
            .camera
            .fit_to_overall_content(&self.graphs, &mut surfaces.twin())?;
        let previous = match side {
            Side::Primary => before.0,
            Side::Secondary => before.1,
        };
        self.camera.adopt_zoom(&self.graphs, side, &mut surfaces.twin());
        self.camera
            .adopt_view_point(&self.graphs, side, previous, &mut surfaces.twin());
        surfaces.request_redraw_all(RedrawKind::Light);
        Some(side)
    }

    /// Makes everything visible again, asking first when that is expensive.
    pub fn unhide_all(
        &mut self,
        confirmation: &mut dyn Confirmation,
        layout: &mut dyn LayoutEngine,
        surfaces: &mut Surfaces<'_>,
    ) -> Result<Deactivation> {
        self.graphs.deactivate_proximity(confirmation, layout, surfaces)
    }

    /// Switches live proximity browsing. Turning it on collapses around the selection; turning
    /// it off reveals everything (and may be declined, which switches it back on).
    ///
    /// Returns the deactivation outcome when one ran.
    pub fn set_proximity_browsing(
        &mut self,
        enabled: bool,
        confirmation: &mut dyn Confirmation,
        layout: &mut dyn LayoutEngine,
        surfaces: &mut Surfaces<'_>,
    ) -> Result<Option<Deactivation>> {
        if !self.graphs.set_proximity_browsing(enabled) {
            return Ok(None);
        }
        self.on_proximity_toggled(confirmation, layout, surfaces)
    }

    /// Merges partial JSON settings and reacts to the ones that need work.
    pub fn update_settings(
        &mut self,
        overrides: &Value,
        confirmation: &mut dyn Confirmation,
        layout: &mut dyn LayoutEngine,
        surfaces: &mut Surfaces<'_>,
    ) -> Result<Vec<SettingKey>> {
        let changed = self.graphs.update_settings(overrides)?;
        if changed.contains(&SettingKey::ProximityBrowsing) {
            self.on_proximity_toggled(confirmation, layout, surfaces)?;
        } else if changed.contains(&SettingKey::ProximityDepth)
            && self.graphs.settings().proximity.enabled
            && !self.graphs.selection().is_empty()
        {
            self.graphs.apply_proximity_to_selection()?;
            surfaces.request_redraw_all(RedrawKind::Full);
        }
        if changed.contains(&SettingKey::SynchronizedViews)
            && self.graphs.settings().synchronized_views
        {
            self.adopt_super_view(surfaces);
        }
        Ok(changed)
    }

    fn on_proximity_toggled(
        &mut self,
        confirmation: &mut dyn Confirmation,
        layout: &mut dyn LayoutEngine,
        surfaces: &mut Surfaces<'_>,
    ) -> Result<Option<Deactivation>> {
        if self.graphs.settings().proximity.enabled {
            if !self.graphs.selection().is_empty() {
                self.graphs.apply_proximity_to_selection()?;
                surfaces.request_redraw_all(RedrawKind::Full);
            }
            return Ok(None);
        }
        let outcome = self
            .graphs
            .deactivate_proximity(confirmation, layout, surfaces)?;
        Ok(Some(outcome))
    }
}

fn child_origins(surfaces: &mut Surfaces<'_>) -> (Point, Point) {
    (
        surfaces.get(GraphKind::Primary).viewport().origin,
        surfaces.get(GraphKind::Secondary).viewport().origin,
    )
}
