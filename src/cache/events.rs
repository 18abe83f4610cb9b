//! Monotonic epochs for ordering fetches against invalidations.

use std::sync::atomic::{AtomicU64, Ordering};

/// Each fetch and each invalidation gets a unique, increasing epoch. A fetch
/// whose epoch is older than the entry's last invalidation produced data
/// that may already be outdated.
pub type Epoch = u64;

#[derive(Debug, Default)]
pub struct EpochClock {
    current: AtomicU64,
}

impl EpochClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> Epoch {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> Epoch {
        self.current.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epochs_increase() {
        let clock = EpochClock::new();
        assert_eq!(clock.current(), 0);
        let a = clock.next();
        let b = clock.next();
        assert!(b > a);
        assert_eq!(clock.current(), b);
    }
}
