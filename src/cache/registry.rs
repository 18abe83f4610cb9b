//! Bidirectional tag registry.
//!
//! Tracks which cache entries currently provide which tags, so that an
//! invalidation can be resolved to a set of entries at invalidation time.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use super::keys::{QueryKey, Tag};
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::registry";

/// Tracks tag → keys and key → tags mappings.
#[derive(Debug, Default)]
pub struct TagRegistry {
    tag_to_keys: RwLock<HashMap<Tag, HashSet<QueryKey>>>,
    key_to_tags: RwLock<HashMap<QueryKey, HashSet<Tag>>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the tags `key` provides, replacing what it provided before.
    ///
    /// A refetched list may no longer contain a record, so stale id tags
    /// must not keep pointing at the entry.
    pub fn provide(&self, key: QueryKey, tags: HashSet<Tag>) {
        let mut t2k = rw_write(&self.tag_to_keys, SOURCE, "provide");
        let mut k2t = rw_write(&self.key_to_tags, SOURCE, "provide");

        if let Some(previous) = k2t.remove(&key) {
            detach(&mut t2k, &key, previous);
        }
        for tag in &tags {
            t2k.entry(tag.clone()).or_default().insert(key);
        }
        if !tags.is_empty() {
            k2t.insert(key, tags);
        }
    }

    /// Entries providing any of `tags`.
    pub fn keys_for_tags(&self, tags: &[Tag]) -> HashSet<QueryKey> {
        let t2k = rw_read(&self.tag_to_keys, SOURCE, "keys_for_tags");
        tags.iter()
            .filter_map(|tag| t2k.get(tag))
            .flat_map(|keys| keys.iter().copied())
            .collect()
    }

    pub fn tags_for_key(&self, key: &QueryKey) -> HashSet<Tag> {
        rw_read(&self.key_to_tags, SOURCE, "tags_for_key")
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Remove a key and clean up its tag mappings.
    pub fn unregister(&self, key: &QueryKey) {
        let mut t2k = rw_write(&self.tag_to_keys, SOURCE, "unregister");
        let mut k2t = rw_write(&self.key_to_tags, SOURCE, "unregister");

        if let Some(tags) = k2t.remove(key) {
            detach(&mut t2k, key, tags);
        }
    }

    pub fn clear(&self) {
        rw_write(&self.tag_to_keys, SOURCE, "clear").clear();
        rw_write(&self.key_to_tags, SOURCE, "clear").clear();
    }

    pub fn tag_count(&self) -> usize {
        rw_read(&self.tag_to_keys, SOURCE, "tag_count").len()
    }

    pub fn key_count(&self) -> usize {
        rw_read(&self.key_to_tags, SOURCE, "key_count").len()
    }
}

fn detach(t2k: &mut HashMap<Tag, HashSet<QueryKey>>, key: &QueryKey, tags: HashSet<Tag>) {
    for tag in tags {
        if let Some(keys) = t2k.get_mut(&tag) {
            keys.remove(key);
            if keys.is_empty() {
                t2k.remove(&tag);
            }
        }
    }
}
