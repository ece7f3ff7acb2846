#![forbid(unsafe_code)]

//! The ambient page a chat transcript lives in.
//!
//! Overlays (the gallery lightbox) need two things from the page while they
//! are open: the transcript must stop scrolling underneath them, and key
//! presses must be routed to them. Both are modelled as guards so every exit
//! path, including dropping the overlay state outright, gives them back.
//!
//! Scroll locks nest: the page is unlocked when the last [`ScrollLock`] drops,
//! and each transition from locked to unlocked is counted once.

use std::cell::Cell;
use std::rc::Rc;

use crate::observe::{ObserverRegistry, Subscription};

/// Page-level event channels a widget can listen on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageChannel {
    KeyDown,
}

#[derive(Debug, Default)]
struct LockState {
    holds: Cell<usize>,
    locks: Cell<u64>,
    restores: Cell<u64>,
}

/// Shared handle to the ambient page. Cloning shares the same page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    lock: Rc<LockState>,
    listeners: ObserverRegistry<PageChannel>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the page from scrolling until the returned guard drops.
    #[must_use = "the page unlocks as soon as the guard is dropped"]
    pub fn lock_scroll(&self) -> ScrollLock {
        let holds = self.lock.holds.get() + 1;
        self.lock.holds.set(holds);
        if holds == 1 {
            self.lock.locks.set(self.lock.locks.get() + 1);
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "page.scroll_lock", locked = true);
        }
        ScrollLock {
            lock: Rc::clone(&self.lock),
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.holds.get() > 0
    }

    /// Times the page went from unlocked to locked.
    pub fn lock_count(&self) -> u64 {
        self.lock.locks.get()
    }

    /// Times page scrolling was restored after a lock.
    pub fn restore_count(&self) -> u64 {
        self.lock.restores.get()
    }

    /// Start receiving events on `channel` until the guard drops.
    pub fn listen(&self, channel: PageChannel) -> Subscription {
        self.listeners.subscribe(channel)
    }

    pub fn has_listener(&self, channel: PageChannel) -> bool {
        self.listeners.is_observed(channel)
    }

    pub fn listener_count(&self, channel: PageChannel) -> usize {
        self.listeners.count(channel)
    }
}

/// Holds the page scroll lock. Restores scrolling on drop.
#[derive(Debug)]
pub struct ScrollLock {
    lock: Rc<LockState>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        let holds = self.lock.holds.get().saturating_sub(1);
        self.lock.holds.set(holds);
        if holds == 0 {
            self.lock.restores.set(self.lock.restores.get() + 1);
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "page.scroll_lock", locked = false);
        }
    }
}
