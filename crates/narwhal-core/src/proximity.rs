//! Proximity browsing: collapsing everything outside a neighbourhood of the focus, and the
//! confirmation protocol for making it visible again.
//!
//! Collapsed regions are represented by [`ProximityNode`] markers attached to the visible nodes
//! that border hidden structure. Markers are synthetic: they carry no identity, cannot be selected,
//! and expose no mutators.

use crate::confirm::Confirmation;
use crate::error::{Error, Result};
use crate::events::GraphEvent;
use crate::graphs::DiffGraphs;
use crate::layout::LayoutEngine;
use crate::model::{Element, ElementKind, GraphKind, NodeIdentity, Side};
use crate::redraw::{RedrawKind, ViewUpdater};
use crate::topology::{RawNode, SideTopology, Topology};
use crate::visibility::{Visibility, VisibilityManager};
use narwhal_graphlib::{Direction, Graph, NodeIx, alg};

/// Placeholder standing in for the hidden neighbourhood of one real node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityNode {
    attached: NodeIx,
    hidden_neighbors: usize,
}

impl ProximityNode {
    /// The real node this marker hangs off. For combined/super markers this is the identity index.
    pub fn attached(&self) -> NodeIx {
        self.attached
    }

    pub fn hidden_neighbors(&self) -> usize {
        self.hidden_neighbors
    }
}

/// A node as a single-side view presents it.
#[derive(Debug, Clone, Copy)]
pub enum ViewNode<'a> {
    Raw(RawNodeRef<'a>),
    Proximity(&'a ProximityNode),
}

/// A real node of a side graph; the only kind of node that can be selected.
#[derive(Debug, Clone, Copy)]
pub struct RawNodeRef<'a> {
    pub ix: NodeIx,
    pub node: &'a RawNode,
    pub visible: bool,
}

impl RawNodeRef<'_> {
    pub fn identity(&self) -> NodeIdentity {
        self.node.identity
    }
}

/// Borrowed view of one side: raw nodes with their flags, plus that side's markers.
#[derive(Debug, Clone, Copy)]
pub struct SingleGraph<'a> {
    pub(crate) topology: &'a SideTopology,
    pub(crate) visibility: &'a Visibility,
    pub(crate) markers: &'a [ProximityNode],
}

impl<'a> SingleGraph<'a> {
    pub fn side(&self) -> Side {
        self.topology.side()
    }

    pub fn raw_nodes(&self) -> impl Iterator<Item = RawNodeRef<'a>> + 'a {
        let visibility = self.visibility;
        self.topology.graph().nodes().map(move |(ix, node)| RawNodeRef {
            ix,
            node,
            visible: visibility.node(ix),
        })
    }

    pub fn proximity_nodes(&self) -> &'a [ProximityNode] {
        self.markers
    }

    /// Every node the view would draw: visible raw nodes followed by markers.
    pub fn nodes(&self) -> impl Iterator<Item = ViewNode<'a>> + 'a {
        self.raw_nodes()
            .filter(|n| n.visible)
            .map(ViewNode::Raw)
            .chain(self.markers.iter().map(ViewNode::Proximity))
    }
}

/// Collapse state of all four views.
#[derive(Debug, Clone, Default)]
pub struct ProximityBrowser {
    primary: Vec<ProximityNode>,
    secondary: Vec<ProximityNode>,
    combined: Vec<ProximityNode>,
    super_: Vec<ProximityNode>,
}

impl ProximityBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self, view: GraphKind) -> &[ProximityNode] {
        match view {
            GraphKind::Primary => &self.primary,
            GraphKind::Secondary => &self.secondary,
            GraphKind::Combined => &self.combined,
            GraphKind::Super => &self.super_,
        }
    }

    pub fn marker_count(&self, view: GraphKind) -> usize {
        self.markers(view).len()
    }

    pub fn has_markers(&self) -> bool {
        GraphKind::ALL.iter().any(|v| !self.markers(*v).is_empty())
    }

    fn markers_mut(&mut self, view: GraphKind) -> &mut Vec<ProximityNode> {
        match view {
            GraphKind::Primary => &mut self.primary,
            GraphKind::Secondary => &mut self.secondary,
            GraphKind::Combined => &mut self.combined,
            GraphKind::Super => &mut self.super_,
        }
    }

    pub(crate) fn delete_all_proximity_nodes(&mut self, side: Side) -> usize {
        let markers = self.markers_mut(side.view());
        let n = markers.len();
        markers.clear();
        n
    }

    pub(crate) fn delete_browsing_state(&mut self, view: GraphKind) {
        self.markers_mut(view).clear();
    }

    /// Recomputes every view's markers from the current visibility.
    pub(crate) fn rebuild(&mut self, topology: &Topology, visibility: &VisibilityManager) {
        for side in Side::BOTH {
            let view = side.view();
            *self.markers_mut(view) =
                boundary_markers(topology.side(side).graph(), visibility.layer(view));
        }
        for view in [GraphKind::Combined, GraphKind::Super] {
            *self.markers_mut(view) = boundary_markers(topology.combined(), visibility.layer(view));
        }
    }
}

fn boundary_markers<N, E>(graph: &Graph<N, E>, layer: &Visibility) -> Vec<ProximityNode> {
    layer
        .visible_nodes()
        .filter_map(|v| {
            let hidden = graph
                .neighbors(v)
                .into_iter()
                .filter(|w| !layer.node(*w))
                .count();
            (hidden > 0).then_some(ProximityNode {
                attached: v,
                hidden_neighbors: hidden,
            })
        })
        .collect()
}

/// True if any primary or secondary node is hidden.
pub fn has_hidden_nodes(graphs: &DiffGraphs) -> bool {
    let vis = graphs.visibility();
    Side::BOTH
        .iter()
        .any(|s| vis.count_invisible(s.view(), ElementKind::Node) > 0)
}

/// Outcome of [`deactivate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deactivation {
    /// Nothing was hidden; nothing happened.
    NothingHidden,
    /// The user declined the reveal; live proximity browsing was switched on instead.
    Declined,
    /// Everything is visible again.
    Revealed { nodes: usize, edges: usize },
}

pub fn reveal_warning_message(nodes: usize, edges: usize) -> String {
    format!(
        "The selected operation makes {nodes} more nodes with {edges} edges visible. Do you want to continue?"
    )
}

/// Makes every hidden node and edge visible again, asking first when the reveal is expensive.
///
/// A layout failure is returned after the reveal has been committed; the graph then stays fully
/// visible without a fresh layout.
pub fn deactivate(
    graphs: &mut DiffGraphs,
    confirmation: &mut dyn Confirmation,
    layout: &mut dyn LayoutEngine,
    views: &mut dyn ViewUpdater,
) -> Result<Deactivation> {
    if !has_hidden_nodes(graphs) {
        tracing::debug!("proximity deactivation skipped: nothing hidden");
        return Ok(Deactivation::NothingHidden);
    }

    let invisible_edges = graphs
        .visibility()
        .count_invisible(GraphKind::Combined, ElementKind::Edge);
    let invisible_nodes = graphs
        .visibility()
        .count_invisible(GraphKind::Combined, ElementKind::Node);
    let threshold = graphs.settings().visibility_warning_threshold;

    if invisible_edges >= threshold {
        let message = reveal_warning_message(invisible_nodes, invisible_edges);
        let decision = confirmation.ask_yes_no(&message);
        tracing::debug!(?decision, invisible_nodes, invisible_edges, threshold, "reveal confirmation");
        if !decision.is_yes() {
            graphs.set_proximity_browsing(true);
            return Ok(Deactivation::Declined);
        }
    }

    let removed = graphs.proximity.delete_all_proximity_nodes(Side::Primary)
        + graphs.proximity.delete_all_proximity_nodes(Side::Secondary);
    graphs.proximity.delete_browsing_state(GraphKind::Combined);
    graphs.proximity.delete_browsing_state(GraphKind::Super);

    for id in graphs.topology.node_identities() {
        graphs.visibility.stage_super_node(id, true);
    }
    for id in graphs.topology.edge_identities() {
        graphs.visibility.stage_super_edge(id, true);
    }
    graphs.visibility.adopt_super_graph_visibility(&graphs.topology);

    tracing::info!(
        nodes = invisible_nodes,
        edges = invisible_edges,
        markers_removed = removed,
        "proximity browsing deactivated"
    );

    views.request_redraw_all(RedrawKind::Full);
    for view in GraphKind::ALL {
        graphs.events.emit(GraphEvent::VisibilityChanged(view));
    }
    graphs.events.emit(GraphEvent::ProximityChanged);
    graphs.events.emit(GraphEvent::IntermediateVisibilityChanged);

    if graphs.settings().automatic_layouting {
        if let Err(err) = layout.layout(graphs) {
            tracing::warn!(error = %err, "layout after reveal failed; graph left visible but not laid out");
            return Err(Error::Layout(err));
        }
        views.request_redraw_all(RedrawKind::Full);
    }

    Ok(Deactivation::Revealed {
        nodes: invisible_nodes,
        edges: invisible_edges,
    })
}

/// Result of a collapse or expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProximityUpdate {
    pub visible_nodes: usize,
    pub hidden_nodes: usize,
    pub markers: usize,
}

/// Collapses everything outside the neighbourhood of `focus`.
///
/// An identity stays visible when it is within `child_depth` hops along edges or `parent_depth`
/// hops against edges of any focus identity. Edges are visible iff both endpoints are.
///
/// An empty focus leaves everything as it is.
pub fn apply(graphs: &mut DiffGraphs, focus: &[NodeIdentity]) -> Result<ProximityUpdate> {
    if focus.is_empty() {
        tracing::debug!("proximity browsing not applied: empty focus");
        return Ok(current_update(graphs));
    }
    let topology = &graphs.topology;
    let combined = topology.combined();
    for id in focus {
        if !combined.contains_node(id.0) {
            return Err(Error::UnknownElement {
                view: GraphKind::Combined,
                what: "node",
                index: id.0.index(),
            });
        }
    }

    let seeds: Vec<NodeIx> = focus.iter().map(|id| id.0).collect();
    let settings = &graphs.settings.proximity;
    let down = alg::directed_depths(combined, &seeds, Direction::Outgoing, settings.child_depth);
    let up = alg::directed_depths(combined, &seeds, Direction::Incoming, settings.parent_depth);
    let keep: Vec<bool> = down
        .iter()
        .zip(&up)
        .map(|(d, u)| d.is_some() || u.is_some())
        .collect();

    set_identities_visible(graphs, |id| keep[id.0.index()])?;
    let update = finish_update(graphs);
    tracing::debug!(
        focus = focus.len(),
        visible = update.visible_nodes,
        hidden = update.hidden_nodes,
        markers = update.markers,
        "proximity browsing applied"
    );
    Ok(update)
}

/// Expands the collapsed neighbourhood around `id`: its hidden neighbours become visible.
pub fn reveal(graphs: &mut DiffGraphs, id: NodeIdentity) -> Result<ProximityUpdate> {
    let combined = graphs.topology.combined();
    if !combined.contains_node(id.0) {
        return Err(Error::UnknownElement {
            view: GraphKind::Combined,
            what: "node",
            index: id.0.index(),
        });
    }
    let mut keep: Vec<bool> = combined
        .node_indices()
        .map(|ix| graphs.visibility.layer(GraphKind::Combined).node(ix))
        .collect();
    keep[id.0.index()] = true;
    for w in combined.neighbors(id.0) {
        keep[w.index()] = true;
    }

    set_identities_visible(graphs, |nid| keep[nid.0.index()])?;
    Ok(finish_update(graphs))
}

fn set_identities_visible(
    graphs: &mut DiffGraphs,
    keep: impl Fn(NodeIdentity) -> bool,
) -> Result<()> {
    let topology = &graphs.topology;
    let visibility = &mut graphs.visibility;
    for id in topology.node_identities() {
        let Some(node) = topology.combined_node(id).copied() else {
            continue;
        };
        let visible = keep(id);
        for side in Side::BOTH {
            if let Some(ix) = node.side(side) {
                visibility.set_visible(topology, side, Element::Node(ix), visible)?;
            }
        }
    }
    for id in topology.edge_identities() {
        let (Some(edge), Some((v, w))) = (
            topology.combined_edge(id).copied(),
            topology.combined().endpoints(id.0),
        ) else {
            continue;
        };
        let visible = keep(NodeIdentity(v)) && keep(NodeIdentity(w));
        for side in Side::BOTH {
            if let Some(ix) = edge.side(side) {
                visibility.set_visible(topology, side, Element::Edge(ix), visible)?;
            }
        }
    }
    Ok(())
}

fn finish_update(graphs: &mut DiffGraphs) -> ProximityUpdate {
    graphs.proximity.rebuild(&graphs.topology, &graphs.visibility);
    for view in GraphKind::ALL {
        graphs.events.emit(GraphEvent::VisibilityChanged(view));
    }
    graphs.events.emit(GraphEvent::ProximityChanged);
    current_update(graphs)
}

fn current_update(graphs: &DiffGraphs) -> ProximityUpdate {
    let layer = graphs.visibility.layer(GraphKind::Combined);
    let hidden = layer.count_invisible(ElementKind::Node);
    ProximityUpdate {
        visible_nodes: graphs.topology.node_count(GraphKind::Combined) - hidden,
        hidden_nodes: hidden,
        markers: graphs.proximity.marker_count(GraphKind::Combined),
    }
}
