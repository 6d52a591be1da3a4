//! Tick-source handles.
//!
//! A [`TickHandle`] stands for "this timer is currently allowed to receive
//! ticks". It has exactly one owner (the timer), cannot be cloned, and is
//! cancelled when dropped, so a timer that goes away never leaves a live tick
//! source behind. Hosts that schedule ticks observe liveness through a
//! [`TickWatcher`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub struct TickHandle {
    id: u64,
    active: Arc<AtomicBool>,
}

impl TickHandle {
    pub(crate) fn arm() -> Self {
        Self {
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn watcher(&self) -> TickWatcher {
        TickWatcher {
            id: self.id,
            active: Arc::clone(&self.active),
        }
    }

    /// Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Read-only view of a [`TickHandle`]'s liveness.
#[derive(Debug, Clone)]
pub struct TickWatcher {
    id: u64,
    active: Arc<AtomicBool>,
}

impl TickWatcher {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}
