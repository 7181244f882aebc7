//! Graph container APIs used by `narwhal`.
//!
//! Every diff view (primary, secondary, combined, super) is backed by the same small container:
//! insertion-ordered node/edge storage addressed by dense indices, plus a handful of traversal
//! helpers that the proximity browser needs.

pub mod graph;

pub use graph::{Direction, EdgeIx, Graph, NodeIx, alg};
