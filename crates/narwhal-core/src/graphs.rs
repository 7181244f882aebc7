//! The four coupled views of one diff, and every mutation that keeps them consistent.

use crate::address::Address;
use crate::confirm::Confirmation;
use crate::dataset::DiffDataset;
use crate::error::Result;
use crate::events::{EventRegistry, GraphEvent, Subscription};
use crate::layout::LayoutEngine;
use crate::model::{Element, GraphKind, NodeIdentity, Side};
use crate::proximity::{self, Deactivation, ProximityBrowser, ProximityUpdate, SingleGraph};
use crate::redraw::ViewUpdater;
use crate::selection::Selection;
use crate::settings::{GraphSettings, SettingKey};
use crate::topology::Topology;
use crate::visibility::VisibilityManager;
use serde_json::Value;

/// Primary, secondary, combined and super views over one immutable [`Topology`].
#[derive(Debug)]
pub struct DiffGraphs {
    pub(crate) topology: Topology,
    pub(crate) visibility: VisibilityManager,
    pub(crate) proximity: ProximityBrowser,
    pub(crate) selection: Selection,
    pub(crate) settings: GraphSettings,
    pub(crate) events: EventRegistry,
}

impl DiffGraphs {
    pub fn new(topology: Topology, settings: GraphSettings) -> Self {
        let visibility = VisibilityManager::new(&topology);
        Self {
            topology,
            visibility,
            proximity: ProximityBrowser::new(),
            selection: Selection::new(),
            settings,
            events: EventRegistry::new(),
        }
    }

    pub fn from_dataset(dataset: &DiffDataset, settings: GraphSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(Topology::from_dataset(dataset)?, settings))
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn visibility(&self) -> &VisibilityManager {
        &self.visibility
    }

    pub fn proximity(&self) -> &ProximityBrowser {
        &self.proximity
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&GraphEvent) + 'static,
    {
        self.events.subscribe(callback)
    }

    pub fn single(&self, side: Side) -> SingleGraph<'_> {
        SingleGraph {
            topology: self.topology.side(side),
            visibility: self.visibility.layer(side.view()),
            markers: self.proximity.markers(side.view()),
        }
    }

    /// Sets one element's visibility on `side` and notifies when anything changed.
    ///
    /// Existing proximity markers are recomputed so they keep matching the hidden structure.
    pub fn set_visible(&mut self, side: Side, element: Element, visible: bool) -> Result<bool> {
        let changed = self
            .visibility
            .set_visible(&self.topology, side, element, visible)?;
        if changed {
            self.emit_visibility_changed();
            if self.proximity.has_markers() {
                self.proximity.rebuild(&self.topology, &self.visibility);
                self.events.emit(GraphEvent::ProximityChanged);
            }
        }
        Ok(changed)
    }

    pub fn set_node_visible_at(
        &mut self,
        side: Side,
        address: Address,
        visible: bool,
    ) -> Result<bool> {
        let ix = self.topology.side(side).node_ix(address)?;
        self.set_visible(side, Element::Node(ix), visible)
    }

    fn emit_visibility_changed(&mut self) {
        for view in GraphKind::ALL {
            self.events.emit(GraphEvent::VisibilityChanged(view));
        }
    }

    pub fn select(&mut self, id: NodeIdentity, additive: bool) -> bool {
        let changed = self.selection.select(id, additive);
        if changed {
            self.events.emit(GraphEvent::SelectionChanged);
        }
        changed
    }

    pub fn toggle_selected(&mut self, id: NodeIdentity) -> bool {
        let changed = self.selection.toggle(id);
        if changed {
            self.events.emit(GraphEvent::SelectionChanged);
        }
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.events.emit(GraphEvent::SelectionChanged);
        }
        changed
    }

    /// Merges a partial JSON settings object; emits one event per changed key.
    pub fn update_settings(&mut self, overrides: &Value) -> Result<Vec<SettingKey>> {
        let changed = self.settings.apply_overrides(overrides)?;
        for key in &changed {
            tracing::debug!(?key, "graph setting changed");
            self.events.emit(GraphEvent::SettingsChanged(*key));
        }
        Ok(changed)
    }

    /// Turns live proximity browsing on or off. Only the settings flag changes here.
    pub fn set_proximity_browsing(&mut self, enabled: bool) -> bool {
        if self.settings.proximity.enabled == enabled {
            return false;
        }
        self.settings.proximity.enabled = enabled;
        tracing::debug!(enabled, "live proximity browsing toggled");
        self.events
            .emit(GraphEvent::SettingsChanged(SettingKey::ProximityBrowsing));
        true
    }

    pub fn has_hidden_nodes(&self) -> bool {
        proximity::has_hidden_nodes(self)
    }

    pub fn deactivate_proximity(
        &mut self,
        confirmation: &mut dyn Confirmation,
        layout: &mut dyn LayoutEngine,
        views: &mut dyn ViewUpdater,
    ) -> Result<Deactivation> {
        proximity::deactivate(self, confirmation, layout, views)
    }

    pub fn apply_proximity(&mut self, focus: &[NodeIdentity]) -> Result<ProximityUpdate> {
        proximity::apply(self, focus)
    }

    /// Collapses around the current selection.
    pub fn apply_proximity_to_selection(&mut self) -> Result<ProximityUpdate> {
        let focus: Vec<NodeIdentity> = self.selection.iter().collect();
        proximity::apply(self, &focus)
    }

    pub fn reveal_proximity(&mut self, id: NodeIdentity) -> Result<ProximityUpdate> {
        proximity::reveal(self, id)
    }
}
