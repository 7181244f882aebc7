//! Per-view visibility flags and the derivation that keeps them consistent.
//!
//! Primary and secondary flags are the base state. Combined and super flags are derived per
//! identity through [`derive_combined`] after every base mutation. The only path in the other
//! direction is [`VisibilityManager::adopt_super_graph_visibility`].

use crate::error::{Error, Result};
use crate::model::{
    EdgeIdentity, Element, ElementKind, GraphKind, MatchState, NodeIdentity, Side,
};
use crate::topology::Topology;
use crate::address::Address;
use narwhal_graphlib::{EdgeIx, NodeIx};

/// Combined/super visibility of an identity from its sides' flags.
///
/// A side that does not hold the identity contributes nothing, whatever flag is passed for it.
pub fn derive_combined(primary: bool, secondary: bool, state: MatchState) -> bool {
    match state {
        MatchState::Matched => primary || secondary,
        MatchState::PrimaryUnmatched => primary,
        MatchState::SecondaryUnmatched => secondary,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Visibility {
    nodes: Vec<bool>,
    edges: Vec<bool>,
}

impl Visibility {
    pub fn all_visible(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: vec![true; nodes],
            edges: vec![true; edges],
        }
    }

    pub fn node(&self, ix: NodeIx) -> bool {
        self.nodes.get(ix.index()).copied().unwrap_or(false)
    }

    pub fn edge(&self, ix: EdgeIx) -> bool {
        self.edges.get(ix.index()).copied().unwrap_or(false)
    }

    pub fn count_invisible(&self, kind: ElementKind) -> usize {
        let flags = match kind {
            ElementKind::Node => &self.nodes,
            ElementKind::Edge => &self.edges,
        };
        flags.iter().filter(|v| !**v).count()
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = NodeIx> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| NodeIx::new(i))
    }

    fn set(&mut self, element: Element, visible: bool) -> bool {
        let slot = match element {
            Element::Node(ix) => self.nodes.get_mut(ix.index()),
            Element::Edge(ix) => self.edges.get_mut(ix.index()),
        };
        match slot {
            Some(flag) if *flag != visible => {
                *flag = visible;
                true
            }
            _ => false,
        }
    }
}

/// A combined/super flag that disagrees with what its sides derive to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationViolation {
    pub view: GraphKind,
    pub element: Element,
    pub expected: bool,
    pub actual: bool,
}

#[derive(Debug, Clone)]
pub struct VisibilityManager {
    primary: Visibility,
    secondary: Visibility,
    combined: Visibility,
    super_: Visibility,
}

impl VisibilityManager {
    /// Everything visible.
    pub fn new(topology: &Topology) -> Self {
        let layer = |view| {
            Visibility::all_visible(topology.node_count(view), topology.edge_count(view))
        };
        Self {
            primary: layer(GraphKind::Primary),
            secondary: layer(GraphKind::Secondary),
            combined: layer(GraphKind::Combined),
            super_: layer(GraphKind::Super),
        }
    }

    pub fn layer(&self, view: GraphKind) -> &Visibility {
        match view {
            GraphKind::Primary => &self.primary,
            GraphKind::Secondary => &self.secondary,
            GraphKind::Combined => &self.combined,
            GraphKind::Super => &self.super_,
        }
    }

    fn layer_mut(&mut self, view: GraphKind) -> &mut Visibility {
        match view {
            GraphKind::Primary => &mut self.primary,
            GraphKind::Secondary => &mut self.secondary,
            GraphKind::Combined => &mut self.combined,
            GraphKind::Super => &mut self.super_,
        }
    }

    pub fn is_node_visible(&self, side: Side, ix: NodeIx) -> bool {
        self.layer(side.view()).node(ix)
    }

    pub fn is_edge_visible(&self, side: Side, ix: EdgeIx) -> bool {
        self.layer(side.view()).edge(ix)
    }

    pub fn is_identity_visible(&self, view: GraphKind, id: NodeIdentity) -> bool {
        self.layer(view).node(id.0)
    }

    pub fn is_edge_identity_visible(&self, view: GraphKind, id: EdgeIdentity) -> bool {
        self.layer(view).edge(id.0)
    }

    pub fn count_invisible(&self, view: GraphKind, kind: ElementKind) -> usize {
        self.layer(view).count_invisible(kind)
    }

    /// Sets a base flag and re-derives the combined/super flags of its identity.
    ///
    /// Returns whether the base flag changed.
    pub fn set_visible(
        &mut self,
        topology: &Topology,
        side: Side,
        element: Element,
        visible: bool,
    ) -> Result<bool> {
        let topo = topology.side(side);
        match element {
            Element::Node(ix) => {
                let node = topo.node(ix).ok_or(Error::UnknownElement {
                    view: side.view(),
                    what: "node",
                    index: ix.index(),
                })?;
                let changed = self.layer_mut(side.view()).set(element, visible);
                self.rederive_node(topology, node.identity);
                Ok(changed)
            }
            Element::Edge(ix) => {
                let edge = topo.edge(ix).ok_or(Error::UnknownElement {
                    view: side.view(),
                    what: "edge",
                    index: ix.index(),
                })?;
                let changed = self.layer_mut(side.view()).set(element, visible);
                self.rederive_edge(topology, edge.identity);
                Ok(changed)
            }
        }
    }

    pub fn set_node_visible_at(
        &mut self,
        topology: &Topology,
        side: Side,
        address: Address,
        visible: bool,
    ) -> Result<bool> {
        let ix = topology.side(side).node_ix(address)?;
        self.set_visible(topology, side, Element::Node(ix), visible)
    }

    pub fn set_edge_visible_at(
        &mut self,
        topology: &Topology,
        side: Side,
        source: Address,
        target: Address,
        visible: bool,
    ) -> Result<bool> {
        let ix = topology.side(side).edge_ix(source, target)?;
        self.set_visible(topology, side, Element::Edge(ix), visible)
    }

    fn rederive_node(&mut self, topology: &Topology, id: NodeIdentity) {
        let Some(node) = topology.combined_node(id) else {
            return;
        };
        let p = node.primary.is_some_and(|ix| self.primary.node(ix));
        let s = node.secondary.is_some_and(|ix| self.secondary.node(ix));
        let derived = derive_combined(p, s, node.state());
        self.combined.set(Element::Node(id.0), derived);
        self.super_.set(Element::Node(id.0), derived);
    }

    fn rederive_edge(&mut self, topology: &Topology, id: EdgeIdentity) {
        let Some(edge) = topology.combined_edge(id) else {
            return;
        };
        let p = edge.primary.is_some_and(|ix| self.primary.edge(ix));
        let s = edge.secondary.is_some_and(|ix| self.secondary.edge(ix));
        let derived = derive_combined(p, s, edge.state());
        self.combined.set(Element::Edge(id.0), derived);
        self.super_.set(Element::Edge(id.0), derived);
    }

    /// Stages a super-graph flag ahead of [`Self::adopt_super_graph_visibility`].
    pub(crate) fn stage_super_node(&mut self, id: NodeIdentity, visible: bool) {
        self.super_.set(Element::Node(id.0), visible);
    }

    pub(crate) fn stage_super_edge(&mut self, id: EdgeIdentity, visible: bool) {
        self.super_.set(Element::Edge(id.0), visible);
    }

    /// Pushes every super-graph flag down onto the combined graph and the side(s) each identity
    /// derives from.
    ///
    /// Bulk restores only; incremental edits go through [`Self::set_visible`].
    pub fn adopt_super_graph_visibility(&mut self, topology: &Topology) {
        for id in topology.node_identities() {
            let Some(node) = topology.combined_node(id) else {
                continue;
            };
            let visible = self.super_.node(id.0);
            self.combined.set(Element::Node(id.0), visible);
            if let Some(p) = node.primary {
                self.primary.set(Element::Node(p), visible);
            }
            if let Some(s) = node.secondary {
                self.secondary.set(Element::Node(s), visible);
            }
        }
        for id in topology.edge_identities() {
            let Some(edge) = topology.combined_edge(id) else {
                continue;
            };
            let visible = self.super_.edge(id.0);
            self.combined.set(Element::Edge(id.0), visible);
            if let Some(p) = edge.primary {
                self.primary.set(Element::Edge(p), visible);
            }
            if let Some(s) = edge.secondary {
                self.secondary.set(Element::Edge(s), visible);
            }
        }
    }

    /// Every identity whose combined or super flag disagrees with its derivation.
    pub fn derivation_violations(&self, topology: &Topology) -> Vec<DerivationViolation> {
        let mut out = Vec::new();
        for id in topology.node_identities() {
            let Some(node) = topology.combined_node(id) else {
                continue;
            };
            let p = node.primary.is_some_and(|ix| self.primary.node(ix));
            let s = node.secondary.is_some_and(|ix| self.secondary.node(ix));
            let expected = derive_combined(p, s, node.state());
            for view in [GraphKind::Combined, GraphKind::Super] {
                let actual = self.layer(view).node(id.0);
                if actual != expected {
                    out.push(DerivationViolation {
                        view,
                        element: Element::Node(id.0),
                        expected,
                        actual,
                    });
                }
            }
        }
        for id in topology.edge_identities() {
            let Some(edge) = topology.combined_edge(id) else {
                continue;
            };
            let p = edge.primary.is_some_and(|ix| self.primary.edge(ix));
            let s = edge.secondary.is_some_and(|ix| self.secondary.edge(ix));
            let expected = derive_combined(p, s, edge.state());
            for view in [GraphKind::Combined, GraphKind::Super] {
                let actual = self.layer(view).edge(id.0);
                if actual != expected {
                    out.push(DerivationViolation {
                        view,
                        element: Element::Edge(id.0),
                        expected,
                        actual,
                    });
                }
            }
        }
        out
    }

    pub fn derivation_holds(&self, topology: &Topology) -> bool {
        self.derivation_violations(topology).is_empty()
    }
}
