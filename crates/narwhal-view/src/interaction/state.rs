use crate::geom::{Point, Vector};
use crate::surface::{BendRef, Hit, NodeRef};
use narwhal_core::EdgeIx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    /// Extends the selection instead of replacing it.
    pub fn additive(self) -> bool {
        self.shift || self.ctrl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    Pressed,
    Released,
    Dragged,
    Moved,
}

/// A pointer event in canvas (pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub button: Button,
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(action: PointerAction, button: Button, position: Point) -> Self {
        Self {
            action,
            button,
            position,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Interaction mode of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditState {
    #[default]
    Idle,
    BackgroundPressed(Button),
    BackgroundClicked(Button),
    NodePressed(Button, NodeRef),
    NodeClicked(Button, NodeRef),
    EdgePressed(Button, EdgeIx),
    EdgeClicked(Button, EdgeIx),
    BendPressed(Button, BendRef),
    BendClicked(Button, BendRef),
    NodeHovered(NodeRef),
    EdgeHovered(EdgeIx),
}

impl EditState {
    pub fn button(self) -> Option<Button> {
        match self {
            EditState::Idle | EditState::NodeHovered(_) | EditState::EdgeHovered(_) => None,
            EditState::BackgroundPressed(b)
            | EditState::BackgroundClicked(b)
            | EditState::NodePressed(b, _)
            | EditState::NodeClicked(b, _)
            | EditState::EdgePressed(b, _)
            | EditState::EdgeClicked(b, _)
            | EditState::BendPressed(b, _)
            | EditState::BendClicked(b, _) => Some(b),
        }
    }

    pub fn is_pressed(self) -> bool {
        matches!(
            self,
            EditState::BackgroundPressed(_)
                | EditState::NodePressed(..)
                | EditState::EdgePressed(..)
                | EditState::BendPressed(..)
        )
    }

    pub fn is_clicked(self) -> bool {
        matches!(
            self,
            EditState::BackgroundClicked(_)
                | EditState::NodeClicked(..)
                | EditState::EdgeClicked(..)
                | EditState::BendClicked(..)
        )
    }

    pub fn is_hovered(self) -> bool {
        matches!(self, EditState::NodeHovered(_) | EditState::EdgeHovered(_))
    }

    /// The element this state is about, as a hit.
    pub fn target(self) -> Hit {
        match self {
            EditState::Idle => Hit::Outside,
            EditState::BackgroundPressed(_) | EditState::BackgroundClicked(_) => Hit::Background,
            EditState::NodePressed(_, n) | EditState::NodeClicked(_, n) | EditState::NodeHovered(n) => {
                Hit::Node(n)
            }
            EditState::EdgePressed(_, e) | EditState::EdgeClicked(_, e) | EditState::EdgeHovered(e) => {
                Hit::Edge(e)
            }
            EditState::BendPressed(_, b) | EditState::BendClicked(_, b) => Hit::Bend(b),
        }
    }
}

/// Work for the owner of the view; the machine itself never touches the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectNode { node: NodeRef, additive: bool },
    ClearSelection,
    /// Canvas (pixel) delta the camera should follow.
    Pan(Vector),
    ContextMenu(Hit),
}
