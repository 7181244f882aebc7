//! Small vocabulary types shared by every layer of the model.

use narwhal_graphlib::{EdgeIx, NodeIx};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Primary,
    Secondary,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Primary, Side::Secondary];

    pub fn other(self) -> Self {
        match self {
            Side::Primary => Side::Secondary,
            Side::Secondary => Side::Primary,
        }
    }

    pub fn view(self) -> GraphKind {
        match self {
            Side::Primary => GraphKind::Primary,
            Side::Secondary => GraphKind::Secondary,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Primary => "primary",
            Side::Secondary => "secondary",
        })
    }
}

/// The four coupled views of one diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphKind {
    Primary,
    Secondary,
    Combined,
    Super,
}

impl GraphKind {
    pub const ALL: [GraphKind; 4] = [
        GraphKind::Primary,
        GraphKind::Secondary,
        GraphKind::Combined,
        GraphKind::Super,
    ];

    pub fn side(self) -> Option<Side> {
        match self {
            GraphKind::Primary => Some(Side::Primary),
            GraphKind::Secondary => Some(Side::Secondary),
            GraphKind::Combined | GraphKind::Super => None,
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GraphKind::Primary => "primary",
            GraphKind::Secondary => "secondary",
            GraphKind::Combined => "combined",
            GraphKind::Super => "super",
        })
    }
}

/// How a matched pair differs, or that the element has no counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    Identical,
    InstructionsOnlyChanged,
    StructurallyChanged,
    Unmatched,
}

impl MatchKind {
    /// Classification of a matched edge from its endpoints' classifications.
    pub fn of_matched_edge(source: MatchKind, target: MatchKind) -> MatchKind {
        use MatchKind::*;
        match (source, target) {
            (Identical, Identical) => Identical,
            (StructurallyChanged, _) | (_, StructurallyChanged) => StructurallyChanged,
            _ => InstructionsOnlyChanged,
        }
    }
}

/// Which sides an identity exists on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchState {
    Matched,
    PrimaryUnmatched,
    SecondaryUnmatched,
}

impl MatchState {
    pub fn has_side(self, side: Side) -> bool {
        matches!(
            (self, side),
            (MatchState::Matched, _)
                | (MatchState::PrimaryUnmatched, Side::Primary)
                | (MatchState::SecondaryUnmatched, Side::Secondary)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Edge,
}

/// A node or edge of one side graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Node(NodeIx),
    Edge(EdgeIx),
}

impl Element {
    pub fn kind(self) -> ElementKind {
        match self {
            Element::Node(_) => ElementKind::Node,
            Element::Edge(_) => ElementKind::Edge,
        }
    }
}

/// A combined-graph node index. The super graph shares these identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIdentity(pub NodeIx);

/// A combined-graph edge index. The super graph shares these identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIdentity(pub EdgeIx);

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

impl fmt::Display for EdgeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

/// Dataset flavor; decides how views are titled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphFlavor {
    #[default]
    FlowGraph,
    CallGraph,
}
