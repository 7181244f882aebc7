//! Traversal helpers.

use super::{Direction, Graph, NodeIx};
use std::collections::VecDeque;

/// Breadth-first hop counts from `seeds`, following edges in `dir` only.
///
/// The returned vector is indexed by node; unreached nodes (and nodes farther than `max_depth`)
/// are `None`. Seeds that are not nodes of `g` are ignored.
pub fn directed_depths<N, E>(
    g: &Graph<N, E>,
    seeds: &[NodeIx],
    dir: Direction,
    max_depth: usize,
) -> Vec<Option<usize>> {
    let mut depth: Vec<Option<usize>> = vec![None; g.node_count()];
    let mut q: VecDeque<NodeIx> = VecDeque::new();
    for &s in seeds {
        if g.contains_node(s) && depth[s.index()].is_none() {
            depth[s.index()] = Some(0);
            q.push_back(s);
        }
    }

    while let Some(v) = q.pop_front() {
        let Some(d) = depth[v.index()] else {
            debug_assert!(false, "queued node without depth");
            continue;
        };
        if d >= max_depth {
            continue;
        }
        for &e in g.edges_directed(v, dir) {
            let Some(w) = g.opposite(e, dir) else {
                continue;
            };
            if depth[w.index()].is_none() {
                depth[w.index()] = Some(d + 1);
                q.push_back(w);
            }
        }
    }

    depth
}
