use narwhal_graphlib::{Direction, EdgeIx, Graph, NodeIx, alg};

fn chain(n: usize) -> (Graph<usize, ()>, Vec<NodeIx>) {
    let mut g: Graph<usize, ()> = Graph::new();
    let ids: Vec<NodeIx> = (0..n).map(|i| g.add_node(i)).collect();
    for w in ids.windows(2) {
        g.add_edge(w[0], w[1], ()).unwrap();
    }
    (g, ids)
}

#[test]
fn add_edge_replaces_label_of_existing_pair() {
    let mut g: Graph<(), i32> = Graph::new();
    let a = g.add_node(());
    let b = g.add_node(());

    let first = g.add_edge(a, b, 1).unwrap();
    let second = g.add_edge(a, b, 7).unwrap();

    assert_eq!(first, second);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge(first), Some(&7));
    assert_eq!(g.find_edge(a, b), Some(first));
    assert_eq!(g.find_edge(b, a), None);
}

#[test]
fn add_edge_rejects_unknown_endpoints() {
    let mut g: Graph<(), ()> = Graph::new();
    let a = g.add_node(());
    assert_eq!(g.add_edge(a, NodeIx::new(5), ()), None);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn successors_predecessors_and_neighbors() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    g.add_edge(a, b, ());
    g.add_edge(b, c, ());
    g.add_edge(c, b, ());

    assert_eq!(g.successors(b).collect::<Vec<_>>(), vec![c]);
    let mut pred: Vec<_> = g.predecessors(b).collect();
    pred.sort();
    assert_eq!(pred, vec![a, c]);
    assert_eq!(g.neighbors(b), vec![c, a]);
}

#[test]
fn self_loop_is_not_a_neighbor() {
    let mut g: Graph<(), ()> = Graph::new();
    let a = g.add_node(());
    let e = g.add_edge(a, a, ()).unwrap();
    assert_eq!(g.endpoints(e), Some((a, a)));
    assert_eq!(g.out_edges(a), &[e]);
    assert!(g.neighbors(a).is_empty());
}

#[test]
fn directed_depths_respects_direction_and_limit() {
    let (g, ids) = chain(5);

    let down = alg::directed_depths(&g, &[ids[1]], Direction::Outgoing, 2);
    assert_eq!(down, vec![None, Some(0), Some(1), Some(2), None]);

    let up = alg::directed_depths(&g, &[ids[3]], Direction::Incoming, 1);
    assert_eq!(up, vec![None, None, Some(1), Some(0), None]);
}

#[test]
fn directed_depths_with_zero_depth_only_marks_seeds() {
    let (g, ids) = chain(3);
    let d = alg::directed_depths(&g, &[ids[0], ids[2]], Direction::Outgoing, 0);
    assert_eq!(d, vec![Some(0), None, Some(0)]);
}

#[test]
fn largest_index_round_trips() {
    let max = u32::MAX as usize;
    assert_eq!(NodeIx::new(max).index(), max);
    assert_eq!(EdgeIx::new(max).index(), max);
}

#[cfg(all(debug_assertions, target_pointer_width = "64"))]
#[test]
#[should_panic(expected = "NodeIx overflow")]
fn node_index_past_u32_is_rejected() {
    let _ = NodeIx::new(u32::MAX as usize + 1);
}
