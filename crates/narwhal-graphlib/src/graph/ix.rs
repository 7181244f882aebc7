//! Dense index types for [`Graph`](super::Graph).
//!
//! Indices are assigned in insertion order and never reused; a graph only grows.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIx(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIx(u32);

impl NodeIx {
    pub const fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIx overflow");
        Self(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeIx {
    pub const fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "EdgeIx overflow");
        Self(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for EdgeIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Which way a traversal follows edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Source to target (successors).
    Outgoing,
    /// Target to source (predecessors).
    Incoming,
}
