use crate::*;

mod events;
mod proximity;

/// Two small flow graphs with every match state:
///
/// primary:   A(1000) -> B(1010) -> C(1020) -> D(1030), A -> C
/// secondary: A(2000) -> B(2010) -> C(2020) -> E(2040)
///
/// A, B and C are matched (identical, instructions-only, structural); D and E are unmatched.
/// Identities: A #0, B #1, C #2, D #3, E #4. Edge identities: A->B #0, B->C #1, C->D #2,
/// A->C #3, C->E #4.
pub(crate) fn fixture_dataset() -> DiffDataset {
    DiffDataset {
        flavor: GraphFlavor::FlowGraph,
        primary: SideDataset {
            name: Some("sub_401000".to_string()),
            address: Some(Address(0x401000)),
            ..SideDataset::default()
        }
        .node(0x1000, "A")
        .node(0x1010, "B")
        .node(0x1020, "C")
        .node(0x1030, "D")
        .edge(0x1000, 0x1010)
        .edge(0x1010, 0x1020)
        .edge(0x1020, 0x1030)
        .edge(0x1000, 0x1020),
        secondary: SideDataset {
            name: Some("sub_402000".to_string()),
            address: Some(Address(0x402000)),
            ..SideDataset::default()
        }
        .node(0x2000, "A")
        .node(0x2010, "B")
        .node(0x2020, "C")
        .node(0x2040, "E")
        .edge(0x2000, 0x2010)
        .edge(0x2010, 0x2020)
        .edge(0x2020, 0x2040),
        matches: vec![
            NodeMatch {
                primary: Address(0x1000),
                secondary: Address(0x2000),
                kind: MatchKind::Identical,
            },
            NodeMatch {
                primary: Address(0x1010),
                secondary: Address(0x2010),
                kind: MatchKind::InstructionsOnlyChanged,
            },
            NodeMatch {
                primary: Address(0x1020),
                secondary: Address(0x2020),
                kind: MatchKind::StructurallyChanged,
            },
        ],
    }
}

pub(crate) fn fixture() -> DiffGraphs {
    DiffGraphs::from_dataset(&fixture_dataset(), GraphSettings::default()).unwrap()
}

/// Two identical matched chains `0 -> 1 -> ... -> n-1`.
pub(crate) fn chain(n: u64, settings: GraphSettings) -> DiffGraphs {
    let mut primary = SideDataset::default();
    let mut secondary = SideDataset::default();
    let mut matches = Vec::new();
    for i in 0..n {
        primary = primary.node(0x1000 + i, format!("p{i}"));
        secondary = secondary.node(0x2000 + i, format!("s{i}"));
        matches.push(NodeMatch {
            primary: Address(0x1000 + i),
            secondary: Address(0x2000 + i),
            kind: MatchKind::Identical,
        });
    }
    for i in 1..n {
        primary = primary.edge(0x1000 + i - 1, 0x1000 + i);
        secondary = secondary.edge(0x2000 + i - 1, 0x2000 + i);
    }
    let dataset = DiffDataset {
        flavor: GraphFlavor::FlowGraph,
        primary,
        secondary,
        matches,
    };
    DiffGraphs::from_dataset(&dataset, settings).unwrap()
}

pub(crate) fn id(i: usize) -> NodeIdentity {
    NodeIdentity(NodeIx::new(i))
}
