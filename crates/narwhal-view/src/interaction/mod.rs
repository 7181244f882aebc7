//! Pointer-driven interaction state machine, one per interactive view.
//!
//! The machine consumes pointer events together with the hit-test result for the event position
//! and answers with a [`Transition`]: the new [`EditState`], the redraw it needs, and at most one
//! [`Command`] for the owner to execute.

mod state;
mod transform;

pub use state::{Button, Command, EditState, Modifiers, PointerAction, PointerEvent};

use crate::geom::{Point, Vector};
use crate::surface::Hit;
use narwhal_core::RedrawKind;
use transform::{clicked_state, moved_state, pressed_state};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: EditState,
    pub to: EditState,
    pub redraw: Option<RedrawKind>,
    pub command: Option<Command>,
}

impl Transition {
    fn unchanged(state: EditState) -> Self {
        Self {
            from: state,
            to: state,
            redraw: None,
            command: None,
        }
    }

    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionMachine {
    state: EditState,
    /// Last pointer position of a left-button background drag.
    pan_anchor: Option<Point>,
    panned: bool,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Back to `Idle`, e.g. when the view loses focus.
    pub fn reset(&mut self) {
        self.state = EditState::Idle;
        self.pan_anchor = None;
        self.panned = false;
    }

    /// `hit` is the hit-test result at `event.position`; drags and releases ignore it.
    pub fn handle(&mut self, event: &PointerEvent, hit: Hit) -> Transition {
        match event.action {
            PointerAction::Pressed => self.pointer_pressed(event, hit),
            PointerAction::Released => self.pointer_released(event),
            PointerAction::Dragged => self.pointer_dragged(event),
            PointerAction::Moved => self.pointer_moved(hit),
        }
    }

    pub fn pointer_pressed(&mut self, event: &PointerEvent, hit: Hit) -> Transition {
        let from = self.state;
        if from.is_clicked() && from.button() == Some(Button::Right) {
            self.reset();
            return self.finish(from, Some(RedrawKind::Light), None);
        }
        if from.is_pressed() {
            return Transition::unchanged(from);
        }

        self.state = pressed_state(hit, event.button);
        self.panned = false;
        self.pan_anchor =
            (self.state == EditState::BackgroundPressed(Button::Left)).then_some(event.position);
        self.finish(from, Some(RedrawKind::Light), None)
    }

    pub fn pointer_released(&mut self, event: &PointerEvent) -> Transition {
        let from = self.state;
        if !from.is_pressed() || from.button() != Some(event.button) {
            return Transition::unchanged(from);
        }

        self.state = clicked_state(from);
        let command = match (event.button, self.state) {
            (Button::Right, to) => Some(Command::ContextMenu(to.target())),
            (Button::Left, EditState::NodeClicked(_, node)) => Some(Command::SelectNode {
                node,
                additive: event.modifiers.additive(),
            }),
            (Button::Left, EditState::BackgroundClicked(_)) if !self.panned => {
                Some(Command::ClearSelection)
            }
            _ => None,
        };
        self.pan_anchor = None;
        self.finish(from, Some(RedrawKind::Light), command)
    }

    pub fn pointer_dragged(&mut self, event: &PointerEvent) -> Transition {
        let from = self.state;
        if !from.is_pressed() {
            return Transition::unchanged(from);
        }

        let mut command = None;
        if let Some(anchor) = self.pan_anchor {
            let delta: Vector = event.position - anchor;
            self.pan_anchor = Some(event.position);
            if delta != Vector::zero() {
                self.panned = true;
                command = Some(Command::Pan(delta));
            }
        }
        self.finish(from, Some(RedrawKind::Light), command)
    }

    pub fn pointer_moved(&mut self, hit: Hit) -> Transition {
        let from = self.state;
        self.state = moved_state(from, hit);
        let redraw = (self.state != from).then_some(RedrawKind::Light);
        self.finish(from, redraw, None)
    }

    fn finish(
        &self,
        from: EditState,
        redraw: Option<RedrawKind>,
        command: Option<Command>,
    ) -> Transition {
        if from != self.state {
            tracing::trace!(?from, to = ?self.state, "edit state transition");
        }
        Transition {
            from,
            to: self.state,
            redraw,
            command,
        }
    }
}
