#![forbid(unsafe_code)]

//! Four-view diff graph model (headless).
//!
//! A diff between two programs is shown as four coupled graphs: the primary and secondary sides,
//! the combined overlay of both, and a topology-only super graph that drives camera
//! synchronization. This crate owns everything those views share:
//!
//! - the immutable topology and match relation ([`Topology`], built from a [`DiffDataset`])
//! - per-view visibility with derived combined/super flags ([`VisibilityManager`])
//! - proximity browsing: collapse markers and the reveal-cost confirmation ([`proximity`])
//! - shared selection, settings, and change notifications
//!
//! Rendering, layout and dialogs are external; they plug in through [`LayoutEngine`],
//! [`ViewUpdater`] and [`Confirmation`].

pub mod address;
pub mod confirm;
pub mod dataset;
pub mod error;
pub mod events;
pub mod graphs;
pub mod layout;
pub mod model;
pub mod proximity;
pub mod redraw;
pub mod selection;
pub mod settings;
pub mod topology;
pub mod visibility;

pub use address::Address;
pub use confirm::{Confirmation, Decision};
pub use dataset::{DiffDataset, EdgeRecord, NodeMatch, NodeRecord, SideDataset};
pub use error::{Error, LayoutError, Result};
pub use events::{EventRegistry, GraphEvent, Subscription};
pub use graphs::DiffGraphs;
pub use layout::{LayoutEngine, NoLayout};
pub use model::{
    EdgeIdentity, Element, ElementKind, GraphFlavor, GraphKind, MatchKind, MatchState,
    NodeIdentity, Side,
};
pub use proximity::{Deactivation, ProximityBrowser, ProximityNode, ProximityUpdate, ViewNode};
pub use redraw::{RedrawKind, ViewUpdater};
pub use selection::Selection;
pub use settings::{GraphSettings, ProximitySettings, SettingKey};
pub use topology::Topology;
pub use visibility::VisibilityManager;

pub use narwhal_graphlib::{EdgeIx, NodeIx};

#[cfg(test)]
mod tests;
