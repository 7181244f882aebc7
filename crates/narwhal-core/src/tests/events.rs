use super::*;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn dropping_a_subscription_stops_delivery() {
    let mut graphs = fixture();
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let sub = graphs.subscribe(move |e| {
        if *e == GraphEvent::SelectionChanged {
            counter.set(counter.get() + 1);
        }
    });

    assert!(graphs.select(id(0), false));
    assert_eq!(hits.get(), 1);
    drop(sub);
    assert!(graphs.select(id(1), false));
    assert_eq!(hits.get(), 1);
}

#[test]
fn registry_prunes_cancelled_subscribers() {
    let mut registry = EventRegistry::new();
    let a = registry.subscribe(|_| {});
    let b = registry.subscribe(|_| {});
    assert_eq!(registry.subscriber_count(), 2);
    a.cancel();
    assert_eq!(registry.subscriber_count(), 1);
    registry.emit(GraphEvent::ProximityChanged);
    drop(b);
    assert_eq!(registry.subscriber_count(), 0);
}

#[test]
fn selection_is_shared_by_identity() {
    let mut graphs = fixture();
    graphs.select(id(1), false);
    let t = graphs.topology();
    let on_primary = graphs.selection().on_side(t, Side::Primary);
    let on_secondary = graphs.selection().on_side(t, Side::Secondary);
    assert_eq!(
        on_primary,
        vec![t.side(Side::Primary).node_ix(Address(0x1010)).unwrap()]
    );
    assert_eq!(
        on_secondary,
        vec![t.side(Side::Secondary).node_ix(Address(0x2010)).unwrap()]
    );

    // The primary-only node has nothing to select on the secondary side.
    graphs.select(id(3), true);
    assert_eq!(graphs.selection().len(), 2);
    assert_eq!(
        graphs
            .selection()
            .on_side(graphs.topology(), Side::Secondary)
            .len(),
        1
    );
}

#[test]
fn selection_events_fire_only_on_change() {
    let mut graphs = fixture();
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let _sub = graphs.subscribe(move |e| {
        if *e == GraphEvent::SelectionChanged {
            counter.set(counter.get() + 1);
        }
    });
    assert!(!graphs.clear_selection());
    assert!(graphs.select(id(2), false));
    assert!(!graphs.select(id(2), false));
    assert!(graphs.toggle_selected(id(2)));
    assert!(graphs.selection().is_empty());
    assert_eq!(hits.get(), 2);
}

#[test]
fn visibility_changes_notify_every_view() {
    let mut graphs = fixture();
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = seen.clone();
    let _sub = graphs.subscribe(move |e| sink.borrow_mut().push(*e));
    graphs
        .set_node_visible_at(Side::Primary, Address(0x1030), false)
        .unwrap();
    graphs
        .set_node_visible_at(Side::Primary, Address(0x1030), false)
        .unwrap();
    assert_eq!(
        *seen.borrow(),
        GraphKind::ALL
            .iter()
            .map(|v| GraphEvent::VisibilityChanged(*v))
            .collect::<Vec<_>>()
    );
}
