//! Change notifications fanned out to unrelated UI (legends, charts, menus).
//!
//! The registry only holds weak references. A subscriber keeps its [`Subscription`] guard alive
//! for as long as it wants events; dropping the guard unsubscribes, so the registry can never call
//! into a subscriber that is gone.

use crate::model::GraphKind;
use crate::settings::SettingKey;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphEvent {
    VisibilityChanged(GraphKind),
    /// Visibility settled after a multi-step operation (e.g. unhide all), before any relayout.
    IntermediateVisibilityChanged,
    SelectionChanged,
    /// Proximity markers were created or deleted.
    ProximityChanged,
    SettingsChanged(SettingKey),
}

type Callback = RefCell<dyn FnMut(&GraphEvent)>;

/// Keeps a callback registered. Drop it (or call [`Subscription::cancel`]) to unsubscribe.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _slot: Rc<Callback>,
}

impl Subscription {
    pub fn cancel(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct EventRegistry {
    slots: Vec<Weak<Callback>>,
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&GraphEvent) + 'static,
    {
        let slot: Rc<Callback> = Rc::new(RefCell::new(callback));
        self.slots.push(Rc::downgrade(&slot));
        Subscription { _slot: slot }
    }

    /// Delivers `event` to every live subscriber in subscription order.
    pub fn emit(&mut self, event: GraphEvent) {
        self.slots.retain(|slot| slot.strong_count() > 0);
        tracing::trace!(?event, subscribers = self.slots.len(), "emit graph event");
        for slot in &self.slots {
            let Some(live) = slot.upgrade() else {
                continue;
            };
            // A subscriber that is already running (re-entrant emit) is skipped.
            let Ok(mut callback) = live.try_borrow_mut() else {
                continue;
            };
            (*callback)(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.iter().filter(|s| s.strong_count() > 0).count()
    }
}
