//! Hooks for watching store activity.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Receives a callback for every key read from or written to a
/// `LocalStore`. Both methods do nothing by default.
pub trait StoreObserver {
    fn on_read(&self, _key: &str) {}
    fn on_write(&self, _key: &str) {}
}

/// Counts store reads and writes.
///
/// Clones share the same counters, so one clone can be handed to the
/// store while another is kept for reporting.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl Tally {
    pub fn new() -> Tally {
        Tally::default()
    }

    /// Returns the number of keys read so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of keys written so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl StoreObserver for Tally {
    fn on_read(&self, key: &str) {
        let n = self.reads.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(key, reads = n, "store read");
    }

    fn on_write(&self, key: &str) {
        let n = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(key, writes = n, "store write");
    }
}
