use super::*;
use crate::proximity::{ViewNode, has_hidden_nodes, reveal_warning_message};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct CountingLayout {
    calls: usize,
    fail: bool,
}

impl LayoutEngine for CountingLayout {
    fn layout(&mut self, _graphs: &DiffGraphs) -> std::result::Result<(), LayoutError> {
        self.calls += 1;
        if self.fail {
            return Err(LayoutError::new("layouter crashed"));
        }
        Ok(())
    }
}

fn record_events(graphs: &mut DiffGraphs) -> (Rc<RefCell<Vec<GraphEvent>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let sub = graphs.subscribe(move |e| sink.borrow_mut().push(*e));
    (seen, sub)
}

fn visible_identities(graphs: &DiffGraphs) -> Vec<usize> {
    graphs
        .visibility()
        .layer(GraphKind::Combined)
        .visible_nodes()
        .map(|ix| ix.index())
        .collect()
}

#[test]
fn apply_hides_everything_beyond_the_depth() {
    let mut graphs = chain(6, GraphSettings::default());
    let update = graphs.apply_proximity(&[id(0)]).unwrap();
    assert_eq!(
        update,
        ProximityUpdate {
            visible_nodes: 3,
            hidden_nodes: 3,
            markers: 1
        }
    );
    assert_eq!(visible_identities(&graphs), vec![0, 1, 2]);
    assert_eq!(
        graphs
            .visibility()
            .count_invisible(GraphKind::Combined, ElementKind::Edge),
        3
    );
    for view in GraphKind::ALL {
        let markers = graphs.proximity().markers(view);
        assert_eq!(markers.len(), 1, "{view}");
        assert_eq!(markers[0].attached(), NodeIx::new(2));
        assert_eq!(markers[0].hidden_neighbors(), 1);
    }
    assert!(graphs.visibility().derivation_holds(graphs.topology()));
}

#[test]
fn apply_walks_parents_and_children_separately() {
    let settings = GraphSettings {
        proximity: ProximitySettings {
            enabled: true,
            child_depth: 1,
            parent_depth: 2,
        },
        ..GraphSettings::default()
    };
    let mut graphs = chain(8, settings);
    graphs.apply_proximity(&[id(4)]).unwrap();
    assert_eq!(visible_identities(&graphs), vec![2, 3, 4, 5]);
    let attached: Vec<usize> = graphs
        .proximity()
        .markers(GraphKind::Primary)
        .iter()
        .map(|m| m.attached().index())
        .collect();
    assert_eq!(attached, vec![2, 5]);
}

#[test]
fn single_graph_lists_visible_raw_nodes_then_markers() {
    let mut graphs = chain(5, GraphSettings::default());
    graphs.apply_proximity(&[id(0)]).unwrap();
    let single = graphs.single(Side::Secondary);
    let nodes: Vec<ViewNode<'_>> = single.nodes().collect();
    assert_eq!(nodes.len(), 4);
    let raw: Vec<NodeIdentity> = nodes
        .iter()
        .filter_map(|n| match n {
            ViewNode::Raw(raw) => Some(raw.identity()),
            ViewNode::Proximity(_) => None,
        })
        .collect();
    assert_eq!(raw, vec![id(0), id(1), id(2)]);
    assert!(matches!(nodes[3], ViewNode::Proximity(m) if m.attached() == NodeIx::new(2)));
    assert_eq!(single.raw_nodes().filter(|n| !n.visible).count(), 2);
}

#[test]
fn reveal_expands_one_marker() {
    let mut graphs = chain(6, GraphSettings::default());
    graphs.apply_proximity(&[id(0)]).unwrap();
    let update = graphs.reveal_proximity(id(2)).unwrap();
    assert_eq!(update.visible_nodes, 4);
    assert_eq!(visible_identities(&graphs), vec![0, 1, 2, 3]);
    assert_eq!(
        graphs.proximity().markers(GraphKind::Combined)[0].attached(),
        NodeIx::new(3)
    );
    assert!(graphs.visibility().derivation_holds(graphs.topology()));
}

#[test]
fn apply_rejects_unknown_focus() {
    let mut graphs = chain(3, GraphSettings::default());
    assert!(matches!(
        graphs.apply_proximity(&[id(7)]),
        Err(Error::UnknownElement { index: 7, .. })
    ));
}

#[test]
fn deactivate_without_hidden_nodes_is_a_no_op() {
    let mut graphs = chain(4, GraphSettings::default());
    let (seen, _sub) = record_events(&mut graphs);
    let mut asked = false;
    let mut layout = CountingLayout::default();
    let mut redraws = Vec::new();

    let outcome = graphs
        .deactivate_proximity(
            &mut |_: &str| {
                asked = true;
                Decision::Yes
            },
            &mut layout,
            &mut |view: GraphKind, kind: RedrawKind| redraws.push((view, kind)),
        )
        .unwrap();

    assert_eq!(outcome, Deactivation::NothingHidden);
    assert!(!asked);
    assert_eq!(layout.calls, 0);
    assert!(redraws.is_empty());
    assert!(seen.borrow().is_empty());
}

#[test]
fn deactivate_declined_keeps_visibility_and_enables_live_browsing() {
    let settings = GraphSettings {
        visibility_warning_threshold: 3,
        ..GraphSettings::default()
    };
    let mut graphs = chain(6, settings);
    graphs.apply_proximity(&[id(0)]).unwrap();
    let before = graphs.visibility().clone();
    let markers_before = graphs.proximity().marker_count(GraphKind::Primary);
    let mut question = None;

    for answer in [Decision::No, Decision::Dismissed] {
        graphs.set_proximity_browsing(false);
        let outcome = graphs
            .deactivate_proximity(
                &mut |msg: &str| {
                    question = Some(msg.to_string());
                    answer
                },
                &mut CountingLayout::default(),
                &mut |_: GraphKind, _: RedrawKind| {},
            )
            .unwrap();
        assert_eq!(outcome, Deactivation::Declined);
        assert!(graphs.settings().proximity.enabled);
    }

    assert_eq!(
        question.as_deref(),
        Some("The selected operation makes 3 more nodes with 3 edges visible. Do you want to continue?")
    );
    for view in GraphKind::ALL {
        assert_eq!(graphs.visibility().layer(view), before.layer(view));
    }
    assert_eq!(
        graphs.proximity().marker_count(GraphKind::Primary),
        markers_before
    );
}

#[test]
fn deactivate_below_threshold_reveals_without_asking() {
    let mut graphs = chain(6, GraphSettings::default());
    graphs.apply_proximity(&[id(0)]).unwrap();
    let (seen, _sub) = record_events(&mut graphs);
    let mut asked = false;
    let mut layout = CountingLayout::default();
    let mut redraws = Vec::new();

    let outcome = graphs
        .deactivate_proximity(
            &mut |_: &str| {
                asked = true;
                Decision::No
            },
            &mut layout,
            &mut |view: GraphKind, kind: RedrawKind| redraws.push((view, kind)),
        )
        .unwrap();

    assert_eq!(outcome, Deactivation::Revealed { nodes: 3, edges: 3 });
    assert!(!asked);
    assert!(!has_hidden_nodes(&graphs));
    for view in GraphKind::ALL {
        assert_eq!(
            graphs.visibility().count_invisible(view, ElementKind::Node),
            0
        );
        assert_eq!(
            graphs.visibility().count_invisible(view, ElementKind::Edge),
            0
        );
        assert!(graphs.proximity().markers(view).is_empty());
    }
    assert_eq!(layout.calls, 1);
    assert_eq!(redraws.len(), 8);
    assert!(redraws.iter().all(|(_, kind)| *kind == RedrawKind::Full));

    let seen = seen.borrow();
    for view in GraphKind::ALL {
        assert!(seen.contains(&GraphEvent::VisibilityChanged(view)));
    }
    assert!(seen.contains(&GraphEvent::IntermediateVisibilityChanged));
}

#[test]
fn deactivate_at_threshold_asks_and_proceeds_on_yes() {
    let settings = GraphSettings {
        visibility_warning_threshold: 3,
        automatic_layouting: false,
        ..GraphSettings::default()
    };
    let mut graphs = chain(6, settings);
    graphs.apply_proximity(&[id(0)]).unwrap();
    let mut asked = 0;
    let mut layout = CountingLayout::default();

    let outcome = graphs
        .deactivate_proximity(
            &mut |_: &str| {
                asked += 1;
                Decision::Yes
            },
            &mut layout,
            &mut |_: GraphKind, _: RedrawKind| {},
        )
        .unwrap();
    assert_eq!(outcome, Deactivation::Revealed { nodes: 3, edges: 3 });
    assert_eq!(asked, 1);
    assert_eq!(layout.calls, 0);
    assert!(!graphs.settings().proximity.enabled);
}

#[test]
fn layout_failure_is_reported_after_the_reveal_is_committed() {
    let mut graphs = chain(6, GraphSettings::default());
    graphs.apply_proximity(&[id(0)]).unwrap();
    let mut layout = CountingLayout {
        calls: 0,
        fail: true,
    };
    let mut redraws = 0;

    let err = graphs
        .deactivate_proximity(
            &mut |_: &str| Decision::Yes,
            &mut layout,
            &mut |_: GraphKind, _: RedrawKind| redraws += 1,
        )
        .unwrap_err();
    assert!(matches!(err, Error::Layout(_)));
    assert_eq!(err.to_string(), "Graph layout failed: layouter crashed");
    assert!(!graphs.has_hidden_nodes());
    assert!(!graphs.proximity().has_markers());
    assert_eq!(redraws, 4);
}

#[test]
fn warning_message_format() {
    assert_eq!(
        reveal_warning_message(12, 40),
        "The selected operation makes 12 more nodes with 40 edges visible. Do you want to continue?"
    );
}

#[test]
fn apply_with_an_empty_focus_changes_nothing() {
    let mut graphs = chain(4, GraphSettings::default());
    let (seen, _sub) = record_events(&mut graphs);
    let update = graphs.apply_proximity_to_selection().unwrap();
    assert_eq!(
        update,
        ProximityUpdate {
            visible_nodes: 4,
            hidden_nodes: 0,
            markers: 0
        }
    );
    assert!(!has_hidden_nodes(&graphs));
    assert!(!graphs.proximity().has_markers());
    assert!(seen.borrow().is_empty());

    // An existing collapse survives an empty focus as well.
    graphs.apply_proximity(&[id(0)]).unwrap();
    let before = visible_identities(&graphs);
    let update = graphs.apply_proximity(&[]).unwrap();
    assert_eq!(visible_identities(&graphs), before);
    assert_eq!(update.markers, 1);
}

#[test]
fn hiding_a_node_by_hand_moves_the_markers() {
    let settings = GraphSettings {
        proximity: ProximitySettings {
            enabled: true,
            child_depth: 1,
            parent_depth: 1,
        },
        ..GraphSettings::default()
    };
    let mut graphs = chain(4, settings);
    graphs.apply_proximity(&[id(0)]).unwrap();
    let markers = |graphs: &DiffGraphs, view: GraphKind| -> Vec<(usize, usize)> {
        graphs
            .proximity()
            .markers(view)
            .iter()
            .map(|m| (m.attached().index(), m.hidden_neighbors()))
            .collect()
    };
    assert_eq!(markers(&graphs, GraphKind::Primary), vec![(1, 1)]);

    let (seen, _sub) = record_events(&mut graphs);
    for side in Side::BOTH {
        assert!(
            graphs
                .set_visible(side, Element::Node(NodeIx::new(1)), false)
                .unwrap()
        );
    }

    for view in GraphKind::ALL {
        assert_eq!(markers(&graphs, view), vec![(0, 1)], "{view}");
        let layer = graphs.visibility().layer(view);
        for m in graphs.proximity().markers(view) {
            assert!(layer.node(m.attached()), "{view}");
        }
    }
    for side in Side::BOTH {
        let single = graphs.single(side);
        assert!(single.nodes().all(|n| match n {
            ViewNode::Raw(raw) => raw.visible,
            ViewNode::Proximity(p) => single.raw_nodes().any(|r| r.ix == p.attached() && r.visible),
        }));
    }
    assert!(seen.borrow().contains(&GraphEvent::ProximityChanged));
}

#[test]
fn set_visible_without_markers_emits_no_proximity_change() {
    let mut graphs = chain(3, GraphSettings::default());
    let (seen, _sub) = record_events(&mut graphs);
    graphs
        .set_visible(Side::Primary, Element::Node(NodeIx::new(2)), false)
        .unwrap();
    assert!(!graphs.proximity().has_markers());
    assert!(!seen.borrow().contains(&GraphEvent::ProximityChanged));
}
