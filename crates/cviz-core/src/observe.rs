#![forbid(unsafe_code)]

//! Listener registry with RAII subscriptions.
//!
//! A source (scroll surface, page) owns an [`ObserverRegistry`] keyed by the
//! kind of change it can report. Interested parties call
//! [`ObserverRegistry::subscribe`] and hold the returned [`Subscription`];
//! dropping it unregisters. The source consults [`ObserverRegistry::is_observed`]
//! before queueing a notification, so nothing is delivered to a listener that
//! has been torn down.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`): the host runs all
//! handlers on its event loop.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug)]
struct Slots<K> {
    next_id: u64,
    active: Vec<(u64, K)>,
    released: u64,
}

trait Release {
    fn release(&self, id: u64);
}

impl<K> Release for RefCell<Slots<K>> {
    fn release(&self, id: u64) {
        let mut slots = self.borrow_mut();
        let before = slots.active.len();
        slots.active.retain(|(slot, _)| *slot != id);
        if slots.active.len() != before {
            slots.released += 1;
        }
    }
}

/// Registry of live listeners, keyed by change kind `K`.
pub struct ObserverRegistry<K> {
    slots: Rc<RefCell<Slots<K>>>,
}

impl<K: Copy + PartialEq + 'static> ObserverRegistry<K> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 1,
                active: Vec::new(),
                released: 0,
            })),
        }
    }

    /// Register a listener for `key`. The listener lives as long as the guard.
    #[must_use = "dropping the subscription unregisters it immediately"]
    pub fn subscribe(&self, key: K) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.active.push((id, key));
            id
        };
        let slots: Rc<dyn Release> = self.slots.clone();
        Subscription {
            id,
            registry: Rc::downgrade(&slots),
        }
    }

    /// Whether at least one listener for `key` is alive.
    pub fn is_observed(&self, key: K) -> bool {
        self.count(key) > 0
    }

    /// Number of live listeners for `key`.
    pub fn count(&self, key: K) -> usize {
        self.slots
            .borrow()
            .active
            .iter()
            .filter(|(_, k)| *k == key)
            .count()
    }

    /// Number of live listeners across all keys.
    pub fn active(&self) -> usize {
        self.slots.borrow().active.len()
    }

    /// Total listeners released over the registry's lifetime.
    pub fn released(&self) -> u64 {
        self.slots.borrow().released
    }
}

impl<K: Copy + PartialEq + 'static> Default for ObserverRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for ObserverRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for ObserverRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("slots", &self.slots.borrow())
            .finish()
    }
}

/// Live listener handle. Dropping it unregisters the listener exactly once.
///
/// Outliving the registry is fine: the release becomes a no-op.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Release>,
}

impl Subscription {
    /// Explicitly unregister (same as dropping).
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.release(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &(self.registry.strong_count() > 0))
            .finish()
    }
}
