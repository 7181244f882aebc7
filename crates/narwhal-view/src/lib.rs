#![forbid(unsafe_code)]

//! Camera synchronization and pointer interaction for the four diff views.
//!
//! Surfaces are external; this crate talks to them through [`RenderSurface`].

pub mod camera;
pub mod geom;
pub mod interaction;
pub mod surface;
pub mod viewport;

pub use camera::{
    CameraSynchronizer, ContentFitter, Fit, Leader, MarginFitter, TwinViews, fit_leader,
    leader_by_width,
};
pub use interaction::{
    Button, Command, EditState, InteractionMachine, Modifiers, PointerAction, PointerEvent,
    Transition,
};
pub use surface::{BendRef, ContentHandle, Hit, NodeRef, RenderSurface};
pub use viewport::Viewport;

#[cfg(test)]
mod tests;
