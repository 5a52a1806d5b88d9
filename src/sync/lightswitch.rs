use super::{Mutex, Semaphore};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lets a group share one gate: the first member in takes `room`, the last member out returns it.
///
/// The member count is only touched while holding `mutex`, which also orders it. Relaxed atomics
/// are enough for the count itself.
#[derive(Debug)]
pub struct Lightswitch {
    count: AtomicUsize,
    mutex: Semaphore,
}

impl Default for Lightswitch {
    fn default() -> Self {
        Self {
            count: AtomicUsize::new(0),
            mutex: Semaphore::new(1),
        }
    }
}

impl Lightswitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the group, blocking on `room` if this is the first member.
    ///
    /// While the first member waits for `room` it keeps `mutex`, so later members queue behind it
    /// instead of walking into a room they don't own yet.
    pub fn lock(&self, room: &Semaphore) {
        let _guard = self.mutex.acquire();
        let count = self.count.load(Ordering::Relaxed) + 1;
        self.count.store(count, Ordering::Relaxed);
        if count == 1 {
            room.wait();
        }
    }

    /// Leaves the group, returning `room` if this was the last member.
    pub fn unlock(&self, room: &Semaphore) {
        let _guard = self.mutex.acquire();
        let count = self.count.load(Ordering::Relaxed) - 1;
        self.count.store(count, Ordering::Relaxed);
        if count == 0 {
            room.signal();
        }
    }

    /// Members currently inside. Stale as soon as it returns.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}
