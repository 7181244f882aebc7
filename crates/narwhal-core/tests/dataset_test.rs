use narwhal_core::{
    Address, DiffDataset, DiffGraphs, Error, GraphFlavor, GraphKind, GraphSettings, MatchKind,
    Side,
};
use serde_json::json;

fn dataset() -> DiffDataset {
    DiffDataset::from_value(json!({
        "flavor": "flowGraph",
        "primary": {
            "name": "parse_header",
            "address": "0x401000",
            "nodes": [
                { "address": "0x401000", "label": "entry" },
                { "address": "0x401020", "label": "loop" },
                { "address": "0x401080", "label": "exit" }
            ],
            "edges": [
                { "source": "0x401000", "target": "0x401020" },
                { "source": "0x401020", "target": "0x401020" },
                { "source": "0x401020", "target": "0x401080" }
            ]
        },
        "secondary": {
            "name": "parse_header",
            "address": "0x501000",
            "nodes": [
                { "address": "0x501000", "label": "entry" },
                { "address": "0x501020", "label": "loop" },
                { "address": "0x501040", "label": "check" },
                { "address": "0x501080", "label": "exit" }
            ],
            "edges": [
                { "source": "0x501000", "target": "0x501020" },
                { "source": "0x501020", "target": "0x501020" },
                { "source": "0x501020", "target": "0x501040" },
                { "source": "0x501040", "target": "0x501080" }
            ]
        },
        "matches": [
            { "primary": "0x401000", "secondary": "0x501000", "kind": "identical" },
            { "primary": "0x401020", "secondary": "0x501020", "kind": "instructionsOnlyChanged" },
            { "primary": "0x401080", "secondary": "0x501080", "kind": "identical" }
        ]
    }))
    .unwrap()
}

#[test]
fn json_dataset_builds_four_consistent_views() {
    let graphs = DiffGraphs::from_dataset(&dataset(), GraphSettings::default()).unwrap();
    let t = graphs.topology();
    assert_eq!(t.flavor(), GraphFlavor::FlowGraph);
    assert_eq!(t.node_count(GraphKind::Primary), 3);
    assert_eq!(t.node_count(GraphKind::Secondary), 4);
    assert_eq!(t.node_count(GraphKind::Combined), 4);
    // entry->loop and the loop self-edge match; loop->exit and the check path do not.
    assert_eq!(t.edge_count(GraphKind::Combined), 5);

    let self_loop = t
        .raw_edge(Side::Secondary, Address(0x501020), Address(0x501020))
        .unwrap();
    assert_eq!(self_loop.kind, MatchKind::InstructionsOnlyChanged);
    assert!(self_loop.counterpart.is_some());

    assert_eq!(t.title(GraphKind::Primary), "00401000   parse_header");
    assert!(graphs.visibility().derivation_holds(t));
    assert!(!graphs.has_hidden_nodes());
}

#[test]
fn dataset_round_trips_through_json_text() {
    let original = dataset();
    let text = serde_json::to_string(&original).unwrap();
    assert!(text.contains("\"imageName\":null"));
    assert_eq!(DiffDataset::from_json(&text).unwrap(), original);
}

#[test]
fn malformed_json_is_a_json_error() {
    assert!(matches!(
        DiffDataset::from_json("{ \"primary\": "),
        Err(Error::Json(_))
    ));
    assert!(matches!(
        DiffDataset::from_value(json!({ "primary": {}, "secondary": {}, "flavor": "treeGraph" })),
        Err(Error::Json(_))
    ));
}

#[test]
fn invalid_settings_fail_construction() {
    let settings = GraphSettings {
        zoom_out_factor: 2.0,
        ..GraphSettings::default()
    };
    assert!(matches!(
        DiffGraphs::from_dataset(&dataset(), settings),
        Err(Error::InvalidSettings { .. })
    ));
}
