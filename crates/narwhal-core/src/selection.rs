//! Node selection, shared by all views through match identities.
//!
//! Selecting a node in any view selects its identity, so a matched pair is selected on both
//! sides and in the combined view at once.

use crate::model::{NodeIdentity, Side};
use crate::topology::Topology;
use indexmap::IndexSet;
use narwhal_graphlib::NodeIx;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: IndexSet<NodeIdentity>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `id`; without `additive` the previous selection is replaced.
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, id: NodeIdentity, additive: bool) -> bool {
        if !additive {
            if self.nodes.len() == 1 && self.nodes.contains(&id) {
                return false;
            }
            self.nodes.clear();
        }
        self.nodes.insert(id) || !additive
    }

    pub fn toggle(&mut self, id: NodeIdentity) -> bool {
        if !self.nodes.shift_remove(&id) {
            self.nodes.insert(id);
        }
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.nodes.is_empty();
        self.nodes.clear();
        changed
    }

    pub fn is_selected(&self, id: NodeIdentity) -> bool {
        self.nodes.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Selected identities in selection order.
    pub fn iter(&self) -> impl Iterator<Item = NodeIdentity> + '_ {
        self.nodes.iter().copied()
    }

    /// Selected nodes that exist on `side`.
    pub fn on_side(&self, topology: &Topology, side: Side) -> Vec<NodeIx> {
        self.iter()
            .filter_map(|id| topology.combined_node(id).and_then(|n| n.side(side)))
            .collect()
    }
}
