//! The core `Graph` container plus the traversal helpers in [`alg`].
//!
//! The container is a simple directed, non-multi graph: adding an edge between a pair of nodes
//! that already has one replaces the label instead of creating a parallel edge. Nodes and edges
//! are never removed, so indices stay stable for the lifetime of the graph.

use rustc_hash::FxBuildHasher;

pub mod alg;
mod entries;
mod ix;

pub use ix::{Direction, EdgeIx, NodeIx};

use entries::{EdgeEntry, NodeEntry};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<NodeEntry<N>>,
    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<(NodeIx, NodeIx), EdgeIx>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            edge_index: HashMap::with_capacity_and_hasher(edges, FxBuildHasher),
        }
    }

    pub fn add_node(&mut self, label: N) -> NodeIx {
        let ix = NodeIx::new(self.nodes.len());
        self.nodes.push(NodeEntry {
            label,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        });
        ix
    }

    /// Adds `source -> target`, or replaces the label of the existing edge between them.
    ///
    /// Returns `None` when either endpoint is not a node of this graph.
    pub fn add_edge(&mut self, source: NodeIx, target: NodeIx, label: E) -> Option<EdgeIx> {
        if !self.contains_node(source) || !self.contains_node(target) {
            return None;
        }
        if let Some(&existing) = self.edge_index.get(&(source, target)) {
            self.edges[existing.index()].label = label;
            return Some(existing);
        }
        let ix = EdgeIx::new(self.edges.len());
        self.edges.push(EdgeEntry {
            source,
            target,
            label,
        });
        self.edge_index.insert((source, target), ix);
        self.nodes[source.index()].out_edges.push(ix);
        self.nodes[target.index()].in_edges.push(ix);
        Some(ix)
    }

    pub fn contains_node(&self, ix: NodeIx) -> bool {
        ix.index() < self.nodes.len()
    }

    pub fn contains_edge(&self, ix: EdgeIx) -> bool {
        ix.index() < self.edges.len()
    }

    pub fn node(&self, ix: NodeIx) -> Option<&N> {
        self.nodes.get(ix.index()).map(|n| &n.label)
    }

    pub fn node_mut(&mut self, ix: NodeIx) -> Option<&mut N> {
        self.nodes.get_mut(ix.index()).map(|n| &mut n.label)
    }

    pub fn edge(&self, ix: EdgeIx) -> Option<&E> {
        self.edges.get(ix.index()).map(|e| &e.label)
    }

    pub fn edge_mut(&mut self, ix: EdgeIx) -> Option<&mut E> {
        self.edges.get_mut(ix.index()).map(|e| &mut e.label)
    }

    pub fn endpoints(&self, ix: EdgeIx) -> Option<(NodeIx, NodeIx)> {
        self.edges.get(ix.index()).map(|e| (e.source, e.target))
    }

    pub fn find_edge(&self, source: NodeIx, target: NodeIx) -> Option<EdgeIx> {
        self.edge_index.get(&(source, target)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIx> + use<N, E> {
        (0..self.nodes.len()).map(NodeIx::new)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIx> + use<N, E> {
        (0..self.edges.len()).map(EdgeIx::new)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIx, &N)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIx::new(i), &n.label))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIx, &E)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeIx::new(i), &e.label))
    }

    pub fn out_edges(&self, v: NodeIx) -> &[EdgeIx] {
        self.nodes
            .get(v.index())
            .map(|n| n.out_edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn in_edges(&self, v: NodeIx) -> &[EdgeIx] {
        self.nodes
            .get(v.index())
            .map(|n| n.in_edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn edges_directed(&self, v: NodeIx, dir: Direction) -> &[EdgeIx] {
        match dir {
            Direction::Outgoing => self.out_edges(v),
            Direction::Incoming => self.in_edges(v),
        }
    }

    pub fn successors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.out_edges(v)
            .iter()
            .map(|&e| self.edges[e.index()].target)
    }

    pub fn predecessors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.in_edges(v)
            .iter()
            .map(|&e| self.edges[e.index()].source)
    }

    /// The node on the far side of `edge`, following it in `dir`.
    pub fn opposite(&self, edge: EdgeIx, dir: Direction) -> Option<NodeIx> {
        let e = self.edges.get(edge.index())?;
        Some(match dir {
            Direction::Outgoing => e.target,
            Direction::Incoming => e.source,
        })
    }

    /// Successors and predecessors, deduplicated, successors first.
    pub fn neighbors(&self, v: NodeIx) -> Vec<NodeIx> {
        let mut out: Vec<NodeIx> = Vec::new();
        for w in self.successors(v).chain(self.predecessors(v)) {
            if w != v && !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }
}
