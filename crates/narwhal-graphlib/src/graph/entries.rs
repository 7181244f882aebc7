//! Internal storage entries for [`Graph`](super::Graph).

use super::{EdgeIx, NodeIx};

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry<N> {
    pub(in crate::graph) label: N,
    pub(in crate::graph) out_edges: Vec<EdgeIx>,
    pub(in crate::graph) in_edges: Vec<EdgeIx>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry<E> {
    pub(in crate::graph) source: NodeIx,
    pub(in crate::graph) target: NodeIx,
    pub(in crate::graph) label: E,
}
