//! Hit transformers: map a fresh hit-test to the next state.

use super::state::{Button, EditState};
use crate::surface::Hit;

pub(crate) fn pressed_state(hit: Hit, button: Button) -> EditState {
    match hit {
        Hit::Outside => EditState::Idle,
        Hit::Background => EditState::BackgroundPressed(button),
        Hit::Node(n) => EditState::NodePressed(button, n),
        Hit::Edge(e) => EditState::EdgePressed(button, e),
        Hit::Bend(b) => EditState::BendPressed(button, b),
    }
}

/// The `*Clicked` counterpart of a `*Pressed` state; other states are returned unchanged.
pub(crate) fn clicked_state(pressed: EditState) -> EditState {
    match pressed {
        EditState::BackgroundPressed(b) => EditState::BackgroundClicked(b),
        EditState::NodePressed(b, n) => EditState::NodeClicked(b, n),
        EditState::EdgePressed(b, e) => EditState::EdgeClicked(b, e),
        EditState::BendPressed(b, r) => EditState::BendClicked(b, r),
        other => other,
    }
}

/// Exit-only transformer: whatever is under the pointer decides, with `background` used over the
/// empty canvas.
pub(crate) fn exit_state(hit: Hit, background: EditState) -> EditState {
    match hit {
        Hit::Node(n) => EditState::NodeHovered(n),
        Hit::Edge(e) => EditState::EdgeHovered(e),
        Hit::Background => background,
        Hit::Bend(_) | Hit::Outside => EditState::Idle,
    }
}

/// Keeps `current` while the pointer stays on its element, otherwise exits.
pub(crate) fn same_element(current: EditState, hit: Hit, background: EditState) -> EditState {
    if current.target() == hit {
        current
    } else {
        exit_state(hit, background)
    }
}

/// Next state for a pointer move without a button held.
pub(crate) fn moved_state(current: EditState, hit: Hit) -> EditState {
    match current {
        EditState::NodeClicked(b, _) | EditState::EdgeClicked(b, _) => {
            same_element(current, hit, EditState::BackgroundClicked(b))
        }
        EditState::BackgroundClicked(b) | EditState::BendClicked(b, _) => {
            exit_state(hit, EditState::BackgroundClicked(b))
        }
        EditState::NodeHovered(_) | EditState::EdgeHovered(_) => {
            same_element(current, hit, EditState::Idle)
        }
        EditState::Idle => exit_state(hit, EditState::Idle),
        pressed => pressed,
    }
}
