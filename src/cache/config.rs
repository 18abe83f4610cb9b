//! Cache configuration.

use std::time::Duration;

const DEFAULT_KEEP_UNUSED: Duration = Duration::from_secs(60);
const DEFAULT_GC_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long an entry with no subscribers is retained. `None` keeps
    /// unused entries forever.
    pub keep_unused: Option<Duration>,
    /// Cadence of the background janitor.
    pub gc_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            keep_unused: Some(DEFAULT_KEEP_UNUSED),
            gc_interval: DEFAULT_GC_INTERVAL,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            keep_unused: settings.keep_unused,
            gc_interval: settings.gc_interval,
        }
    }
}

impl CacheConfig {
    pub fn evicts(&self) -> bool {
        self.keep_unused.is_some()
    }
}
