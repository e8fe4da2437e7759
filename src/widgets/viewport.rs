//! The page-level host widgets borrow global behaviour from.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Counters {
    scroll_locks: Cell<usize>,
    key_listeners: Cell<usize>,
}

/// Shared handle to the page's scroll and keyboard state.
///
/// Cloning is cheap and every clone refers to the same page. Scroll stays
/// suppressed while at least one [`ScrollLock`] is alive.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    counters: Rc<Counters>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_suppressed(&self) -> bool {
        self.counters.scroll_locks.get() > 0
    }

    /// Number of live global key listeners.
    pub fn key_listeners(&self) -> usize {
        self.counters.key_listeners.get()
    }

    pub fn lock_scroll(&self) -> ScrollLock {
        bump(&self.counters.scroll_locks, 1);
        ScrollLock {
            counters: Rc::clone(&self.counters),
        }
    }

    pub fn subscribe_keys(&self) -> KeySubscription {
        bump(&self.counters.key_listeners, 1);
        KeySubscription {
            counters: Rc::clone(&self.counters),
        }
    }
}

fn bump(cell: &Cell<usize>, delta: isize) {
    cell.set(cell.get().saturating_add_signed(delta));
}

/// Suppresses page scroll until dropped.
#[derive(Debug)]
#[must_use = "scroll is restored as soon as the lock is dropped"]
pub struct ScrollLock {
    counters: Rc<Counters>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        bump(&self.counters.scroll_locks, -1);
    }
}

/// A global key listener registration, removed when dropped.
#[derive(Debug)]
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct KeySubscription {
    counters: Rc<Counters>,
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        bump(&self.counters.key_listeners, -1);
    }
}
