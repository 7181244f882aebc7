#![forbid(unsafe_code)]

//! `narwhal` keeps four views of a program diff in sync: the primary and secondary graphs, their
//! combined overlay, and a topology-only super graph that drives the cameras.
//!
//! The model lives in `narwhal-core` (re-exported at the crate root), cameras and pointer
//! interaction in [`view`]. [`DiffSession`] wires both together for one diff window.

pub use narwhal_core::*;

pub mod view {
    pub use narwhal_view::*;
}

mod session;

pub use session::{DiffSession, Surfaces};
