//! Immutable topology and match model shared by all four views.
//!
//! Each side keeps its own [`Graph`] of raw nodes/edges. The combined graph holds one node per
//! matched pair or unmatched node (and likewise for edges); its indices are the identities that
//! the combined and super views are built on.

use crate::address::Address;
use crate::dataset::{DiffDataset, SideDataset};
use crate::error::{Error, Result};
use crate::model::{
    EdgeIdentity, GraphFlavor, GraphKind, MatchKind, MatchState, NodeIdentity, Side,
};
use narwhal_graphlib::{EdgeIx, Graph, NodeIx};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub address: Address,
    pub label: String,
    pub kind: MatchKind,
    pub counterpart: Option<NodeIx>,
    pub identity: NodeIdentity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub source: Address,
    pub target: Address,
    pub kind: MatchKind,
    pub counterpart: Option<EdgeIx>,
    pub identity: EdgeIdentity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedNode {
    pub primary: Option<NodeIx>,
    pub secondary: Option<NodeIx>,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedEdge {
    pub primary: Option<EdgeIx>,
    pub secondary: Option<EdgeIx>,
    pub kind: MatchKind,
}

fn state_of<T>(primary: &Option<T>, secondary: &Option<T>) -> MatchState {
    match (primary.is_some(), secondary.is_some()) {
        (true, true) => MatchState::Matched,
        (true, false) => MatchState::PrimaryUnmatched,
        // Construction never produces an identity without any side.
        (false, _) => MatchState::SecondaryUnmatched,
    }
}

impl CombinedNode {
    pub fn state(&self) -> MatchState {
        state_of(&self.primary, &self.secondary)
    }

    pub fn side(&self, side: Side) -> Option<NodeIx> {
        match side {
            Side::Primary => self.primary,
            Side::Secondary => self.secondary,
        }
    }
}

impl CombinedEdge {
    pub fn state(&self) -> MatchState {
        state_of(&self.primary, &self.secondary)
    }

    pub fn side(&self, side: Side) -> Option<EdgeIx> {
        match side {
            Side::Primary => self.primary,
            Side::Secondary => self.secondary,
        }
    }
}

/// One side's raw graph plus its address index.
#[derive(Debug, Clone)]
pub struct SideTopology {
    side: Side,
    name: Option<String>,
    image_name: Option<String>,
    function_address: Option<Address>,
    graph: Graph<RawNode, RawEdge>,
    by_address: HashMap<Address, NodeIx>,
}

impl SideTopology {
    fn build(side: Side, data: &SideDataset) -> Result<Self> {
        let mut graph: Graph<RawNode, RawEdge> =
            Graph::with_capacity(data.nodes.len(), data.edges.len());
        let mut by_address: HashMap<Address, NodeIx> = HashMap::default();

        for record in &data.nodes {
            if by_address.contains_key(&record.address) {
                return Err(Error::InvalidDataset {
                    message: format!("duplicate {side} node address {}", record.address),
                });
            }
            let ix = graph.add_node(RawNode {
                address: record.address,
                label: record.label.clone(),
                kind: MatchKind::Unmatched,
                counterpart: None,
                identity: NodeIdentity(NodeIx::new(0)),
            });
            by_address.insert(record.address, ix);
        }

        for record in &data.edges {
            let lookup = |a: Address| {
                by_address.get(&a).copied().ok_or_else(|| Error::InvalidDataset {
                    message: format!(
                        "{side} edge {} -> {} references unknown node {a}",
                        record.source, record.target
                    ),
                })
            };
            let (v, w) = (lookup(record.source)?, lookup(record.target)?);
            if graph.find_edge(v, w).is_some() {
                return Err(Error::InvalidDataset {
                    message: format!(
                        "duplicate {side} edge {} -> {}",
                        record.source, record.target
                    ),
                });
            }
            graph.add_edge(
                v,
                w,
                RawEdge {
                    source: record.source,
                    target: record.target,
                    kind: MatchKind::Unmatched,
                    counterpart: None,
                    identity: EdgeIdentity(EdgeIx::new(0)),
                },
            );
        }

        Ok(Self {
            side,
            name: data.name.clone(),
            image_name: data.image_name.clone(),
            function_address: data.address,
            graph,
            by_address,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn image_name(&self) -> Option<&str> {
        self.image_name.as_deref()
    }

    pub fn function_address(&self) -> Option<Address> {
        self.function_address
    }

    pub fn graph(&self) -> &Graph<RawNode, RawEdge> {
        &self.graph
    }

    pub fn node_ix(&self, address: Address) -> Result<NodeIx> {
        self.by_address
            .get(&address)
            .copied()
            .ok_or(Error::NotFound {
                side: self.side,
                address,
            })
    }

    pub fn node(&self, ix: NodeIx) -> Option<&RawNode> {
        self.graph.node(ix)
    }

    pub fn edge(&self, ix: EdgeIx) -> Option<&RawEdge> {
        self.graph.edge(ix)
    }

    pub fn node_by_address(&self, address: Address) -> Result<&RawNode> {
        let ix = self.node_ix(address)?;
        self.graph.node(ix).ok_or(Error::NotFound {
            side: self.side,
            address,
        })
    }

    pub fn edge_ix(&self, source: Address, target: Address) -> Result<EdgeIx> {
        let (v, w) = (self.node_ix(source)?, self.node_ix(target)?);
        self.graph.find_edge(v, w).ok_or(Error::EdgeNotFound {
            side: self.side,
            source_address: source,
            target_address: target,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Topology {
    flavor: GraphFlavor,
    primary: SideTopology,
    secondary: SideTopology,
    combined: Graph<CombinedNode, CombinedEdge>,
}

impl Topology {
    pub fn from_dataset(data: &DiffDataset) -> Result<Self> {
        let mut primary = SideTopology::build(Side::Primary, &data.primary)?;
        let mut secondary = SideTopology::build(Side::Secondary, &data.secondary)?;

        for m in &data.matches {
            if m.kind == MatchKind::Unmatched {
                return Err(Error::InvalidDataset {
                    message: format!(
                        "match {} <-> {} cannot have kind `unmatched`",
                        m.primary, m.secondary
                    ),
                });
            }
            let invalid = |e: Error| Error::InvalidDataset {
                message: format!("match {} <-> {}: {e}", m.primary, m.secondary),
            };
            let p = primary.node_ix(m.primary).map_err(invalid)?;
            let s = secondary.node_ix(m.secondary).map_err(invalid)?;
            for (topo, ix, other) in [(&mut primary, p, s), (&mut secondary, s, p)] {
                let Some(node) = topo.graph.node_mut(ix) else {
                    continue;
                };
                if node.counterpart.is_some() {
                    return Err(Error::InvalidDataset {
                        message: format!(
                            "{} node {} is matched more than once",
                            topo.side, node.address
                        ),
                    });
                }
                node.counterpart = Some(other);
                node.kind = m.kind;
            }
        }

        let combined = build_combined(&mut primary, &mut secondary);

        tracing::debug!(
            primary_nodes = primary.graph.node_count(),
            secondary_nodes = secondary.graph.node_count(),
            identities = combined.node_count(),
            edge_identities = combined.edge_count(),
            "built diff topology"
        );

        Ok(Self {
            flavor: data.flavor,
            primary,
            secondary,
            combined,
        })
    }

    pub fn flavor(&self) -> GraphFlavor {
        self.flavor
    }

    pub fn side(&self, side: Side) -> &SideTopology {
        match side {
            Side::Primary => &self.primary,
            Side::Secondary => &self.secondary,
        }
    }

    /// The identity graph behind the combined and super views.
    pub fn combined(&self) -> &Graph<CombinedNode, CombinedEdge> {
        &self.combined
    }

    pub fn combined_node(&self, id: NodeIdentity) -> Option<&CombinedNode> {
        self.combined.node(id.0)
    }

    pub fn combined_edge(&self, id: EdgeIdentity) -> Option<&CombinedEdge> {
        self.combined.edge(id.0)
    }

    pub fn identity_of_node(&self, side: Side, ix: NodeIx) -> Option<NodeIdentity> {
        self.side(side).node(ix).map(|n| n.identity)
    }

    pub fn identity_of_edge(&self, side: Side, ix: EdgeIx) -> Option<EdgeIdentity> {
        self.side(side).edge(ix).map(|e| e.identity)
    }

    pub fn node_identities(&self) -> impl Iterator<Item = NodeIdentity> + use<> {
        self.combined.node_indices().map(NodeIdentity)
    }

    pub fn edge_identities(&self) -> impl Iterator<Item = EdgeIdentity> + use<> {
        self.combined.edge_indices().map(EdgeIdentity)
    }

    pub fn match_state(&self, id: NodeIdentity) -> Option<MatchState> {
        self.combined_node(id).map(CombinedNode::state)
    }

    pub fn node_count(&self, view: GraphKind) -> usize {
        match view.side() {
            Some(side) => self.side(side).graph.node_count(),
            None => self.combined.node_count(),
        }
    }

    pub fn edge_count(&self, view: GraphKind) -> usize {
        match view.side() {
            Some(side) => self.side(side).graph.edge_count(),
            None => self.combined.edge_count(),
        }
    }

    pub fn raw_node(&self, side: Side, address: Address) -> Result<&RawNode> {
        self.side(side).node_by_address(address)
    }

    pub fn raw_edge(&self, side: Side, source: Address, target: Address) -> Result<&RawEdge> {
        let topo = self.side(side);
        let ix = topo.edge_ix(source, target)?;
        topo.edge(ix).ok_or(Error::EdgeNotFound {
            side,
            source_address: source,
            target_address: target,
        })
    }

    /// Address of the matched node on the other side, if any.
    pub fn counterpart(&self, side: Side, address: Address) -> Result<Option<Address>> {
        let node = self.raw_node(side, address)?;
        Ok(node
            .counterpart
            .and_then(|ix| self.side(side.other()).node(ix))
            .map(|n| n.address))
    }

    pub fn match_kind(&self, side: Side, address: Address) -> Result<MatchKind> {
        Ok(self.raw_node(side, address)?.kind)
    }

    pub fn is_matched(&self, side: Side, address: Address) -> Result<bool> {
        Ok(self.match_kind(side, address)? != MatchKind::Unmatched)
    }

    pub fn is_identical_match(&self, side: Side, address: Address) -> Result<bool> {
        Ok(self.match_kind(side, address)? == MatchKind::Identical)
    }

    pub fn is_changed_structural(&self, side: Side, address: Address) -> Result<bool> {
        Ok(self.match_kind(side, address)? == MatchKind::StructurallyChanged)
    }

    pub fn is_changed_instructions_only(&self, side: Side, address: Address) -> Result<bool> {
        Ok(self.match_kind(side, address)? == MatchKind::InstructionsOnlyChanged)
    }

    /// True for the empty side of a flow-graph view of an unmatched function.
    pub fn is_function_missing(&self, side: Side) -> bool {
        self.flavor == GraphFlavor::FlowGraph && self.side(side).function_address.is_none()
    }

    /// Caption for a view, empty when there is nothing to show.
    pub fn title(&self, view: GraphKind) -> String {
        let p = &self.primary;
        let s = &self.secondary;
        match (self.flavor, view) {
            (_, GraphKind::Super) => String::new(),
            (GraphFlavor::CallGraph, GraphKind::Primary) => {
                p.image_name.clone().unwrap_or_default()
            }
            (GraphFlavor::CallGraph, GraphKind::Secondary) => {
                s.image_name.clone().unwrap_or_default()
            }
            (GraphFlavor::CallGraph, GraphKind::Combined) => format!(
                "{} vs {}",
                p.image_name.as_deref().unwrap_or_default(),
                s.image_name.as_deref().unwrap_or_default()
            ),
            (GraphFlavor::FlowGraph, GraphKind::Primary) => match p.function_address {
                Some(addr) => format!("{addr}   {}", p.name.as_deref().unwrap_or_default()),
                None => String::new(),
            },
            (GraphFlavor::FlowGraph, GraphKind::Secondary) => match s.function_address {
                Some(addr) => format!("{}   {addr}", s.name.as_deref().unwrap_or_default()),
                None => String::new(),
            },
            (GraphFlavor::FlowGraph, GraphKind::Combined) => {
                let mut out = String::new();
                if let Some(addr) = p.function_address {
                    out.push_str(&format!("{addr}   "));
                }
                out.push_str(p.name.as_deref().unwrap_or_default());
                if p.function_address.is_some() && s.function_address.is_some() {
                    out.push_str("   vs   ");
                }
                if let Some(addr) = s.function_address {
                    out.push_str(&format!("{addr}   "));
                }
                out.push_str(s.name.as_deref().unwrap_or_default());
                out
            }
        }
    }
}

fn build_combined(
    primary: &mut SideTopology,
    secondary: &mut SideTopology,
) -> Graph<CombinedNode, CombinedEdge> {
    let mut combined: Graph<CombinedNode, CombinedEdge> = Graph::with_capacity(
        primary.graph.node_count() + secondary.graph.node_count(),
        primary.graph.edge_count() + secondary.graph.edge_count(),
    );

    // Nodes: primary order first (matched pairs and primary-only), then secondary-only.
    for p in primary.graph.node_indices() {
        let Some(pn) = primary.graph.node_mut(p) else {
            continue;
        };
        let id = NodeIdentity(combined.add_node(CombinedNode {
            primary: Some(p),
            secondary: pn.counterpart,
            kind: pn.kind,
        }));
        pn.identity = id;
        if let Some(sn) = pn.counterpart.and_then(|s| secondary.graph.node_mut(s)) {
            sn.identity = id;
        }
    }
    for s in secondary.graph.node_indices() {
        let Some(node) = secondary.graph.node_mut(s) else {
            continue;
        };
        if node.counterpart.is_some() {
            continue;
        }
        node.identity = NodeIdentity(combined.add_node(CombinedNode {
            primary: None,
            secondary: Some(s),
            kind: MatchKind::Unmatched,
        }));
    }

    // Edges: a primary edge is matched when the secondary has the edge between the
    // counterparts of both endpoints.
    let mut edge_matches: Vec<(EdgeIx, Option<EdgeIx>, MatchKind)> = Vec::new();
    for e in primary.graph.edge_indices() {
        let Some((v, w)) = primary.graph.endpoints(e) else {
            continue;
        };
        let (Some(vn), Some(wn)) = (primary.graph.node(v), primary.graph.node(w)) else {
            continue;
        };
        let counterpart = match (vn.counterpart, wn.counterpart) {
            (Some(v2), Some(w2)) => secondary.graph.find_edge(v2, w2),
            _ => None,
        };
        let kind = match counterpart {
            Some(_) => MatchKind::of_matched_edge(vn.kind, wn.kind),
            None => MatchKind::Unmatched,
        };
        edge_matches.push((e, counterpart, kind));
    }

    for (e, counterpart, kind) in edge_matches {
        let Some((v, w)) = primary.graph.endpoints(e) else {
            continue;
        };
        let (Some(vid), Some(wid)) = (
            primary.graph.node(v).map(|n| n.identity),
            primary.graph.node(w).map(|n| n.identity),
        ) else {
            continue;
        };
        debug_assert!(combined.find_edge(vid.0, wid.0).is_none());
        let Some(cix) = combined.add_edge(
            vid.0,
            wid.0,
            CombinedEdge {
                primary: Some(e),
                secondary: counterpart,
                kind,
            },
        ) else {
            continue;
        };
        if let Some(pe) = primary.graph.edge_mut(e) {
            pe.counterpart = counterpart;
            pe.kind = kind;
            pe.identity = EdgeIdentity(cix);
        }
        if let Some(se) = counterpart.and_then(|s| secondary.graph.edge_mut(s)) {
            se.counterpart = Some(e);
            se.kind = kind;
            se.identity = EdgeIdentity(cix);
        }
    }

    for e in secondary.graph.edge_indices() {
        let Some(edge) = secondary.graph.edge(e) else {
            continue;
        };
        if edge.counterpart.is_some() {
            continue;
        }
        let Some((v, w)) = secondary.graph.endpoints(e) else {
            continue;
        };
        let (Some(vid), Some(wid)) = (
            secondary.graph.node(v).map(|n| n.identity),
            secondary.graph.node(w).map(|n| n.identity),
        ) else {
            continue;
        };
        debug_assert!(combined.find_edge(vid.0, wid.0).is_none());
        let Some(cix) = combined.add_edge(
            vid.0,
            wid.0,
            CombinedEdge {
                primary: None,
                secondary: Some(e),
                kind: MatchKind::Unmatched,
            },
        ) else {
            continue;
        };
        if let Some(se) = secondary.graph.edge_mut(e) {
            se.identity = EdgeIdentity(cix);
        }
    }

    combined
}
