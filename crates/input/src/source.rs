use crate::action::ActionEvent;
use crate::cache::InputCache;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Receiver of action events.
pub trait InputSink {
    fn on_action(&mut self, event: &ActionEvent);
}

impl InputSink for InputCache {
    fn on_action(&mut self, event: &ActionEvent) {
        self.apply(event);
    }
}

/// Sinks are shared with the source on a single logical thread. A
/// multi-threaded scheduler needs a synchronized cache instead.
pub type SharedSink = Rc<RefCell<dyn InputSink>>;

/// Token returned by `InputSource::subscribe`, required to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Provider of move/look/jump action events.
pub trait InputSource {
    /// Register a sink. Every call yields a fresh id.
    fn subscribe(&mut self, sink: SharedSink) -> SubscriptionId;

    /// Remove a registration. Returns false if the id was unknown.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// In-process input source that fans events out to its subscribers.
///
/// Holds sinks weakly: a sink dropped without unsubscribing is pruned on the
/// next dispatch instead of being kept alive.
#[derive(Default)]
pub struct InputBus {
    next_id: u64,
    subscribers: BTreeMap<SubscriptionId, Weak<RefCell<dyn InputSink>>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver one event to every live subscriber in subscription order.
    /// Returns how many sinks received it.
    pub fn dispatch(&mut self, event: ActionEvent) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, weak) in &self.subscribers {
            match weak.upgrade() {
                Some(sink) => {
                    sink.borrow_mut().on_action(&event);
                    delivered += 1;
                }
                None => dead.push(*id),
            }
        }
        for id in dead {
            tracing::debug!(?id, "pruning dropped input subscriber");
            self.subscribers.remove(&id);
        }
        delivered
    }
}

impl InputSource for InputBus {
    fn subscribe(&mut self, sink: SharedSink) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, Rc::downgrade(&sink));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }
}
