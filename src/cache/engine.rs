//! The shared resource cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::FutureExt;
use metrics::counter;
use time::OffsetDateTime;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::infra::rest::{ApiClient, ApiError};

use super::config::CacheConfig;
use super::endpoint::{Mutated, Mutation, Query};
use super::entry::{
    CacheEntry, FetchResult, Fetched, InFlight, QueryState, QueryStatus, Snapshot, downcast,
};
use super::events::{Epoch, EpochClock};
use super::keys::{QueryKey, Tag};
use super::lock::mutex_lock;
use super::registry::TagRegistry;
use super::subscription::Subscription;

const SOURCE: &str = "cache::engine";

const METRIC_HIT: &str = "mealdesk_cache_hit_total";
const METRIC_MISS: &str = "mealdesk_cache_miss_total";
const METRIC_DEDUP: &str = "mealdesk_cache_dedup_total";
const METRIC_INVALIDATED: &str = "mealdesk_cache_invalidated_total";
const METRIC_EVICT: &str = "mealdesk_cache_evict_total";

/// Process-wide cache of typed query results.
///
/// Cloning is cheap and every clone shares the same entries. Queries provide
/// tags, successful mutations invalidate tags, and invalidated entries that
/// still have subscribers are refetched in the background.
#[derive(Clone)]
pub struct ResourceCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    client: ApiClient,
    config: CacheConfig,
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    registry: TagRegistry,
    clock: EpochClock,
}

impl ResourceCache {
    pub fn new(client: ApiClient, config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                client,
                config,
                entries: Mutex::new(HashMap::new()),
                registry: TagRegistry::new(),
                clock: EpochClock::new(),
            }),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Return fresh cached data, or fetch it.
    ///
    /// Identical queries issued while a request is in flight join that
    /// request and resolve with the same result.
    pub async fn query<Q: Query>(&self, query: Q) -> QueryState<Q::Output> {
        let key = query.key();
        let pending = {
            let mut entries = mutex_lock(&self.inner.entries, SOURCE, "query");
            let now = Instant::now();
            let entry = entries
                .entry(key)
                .or_insert_with(|| self.new_entry(&query, now));
            if entry.subscribers == 0 {
                entry.unused_since = Some(now);
            }

            let snapshot = entry.snapshot();
            if snapshot.is_fresh() {
                counter!(METRIC_HIT).increment(1);
                debug!(resource = %key.kind, endpoint = key.endpoint, key = %key, "cache hit");
                return QueryState::from_snapshot(&snapshot);
            }
            self.join_or_start(key, entry)
        };

        let result = pending.await;
        self.settle(key, result)
    }

    /// Register a long-lived interest in `query`.
    ///
    /// The entry is fetched unless it is already fresh or loading. It is
    /// refetched whenever one of its tags is invalidated while the returned
    /// handle is alive.
    pub fn subscribe<Q: Query>(&self, query: Q) -> Subscription<Q::Output> {
        let key = query.key();
        let mut entries = mutex_lock(&self.inner.entries, SOURCE, "subscribe");
        let entry = entries
            .entry(key)
            .or_insert_with(|| self.new_entry(&query, Instant::now()));
        entry.subscribers += 1;
        entry.unused_since = None;
        let receiver = entry.state.subscribe();

        if !entry.snapshot().is_fresh() && entry.inflight.is_none() && can_spawn() {
            counter!(METRIC_MISS).increment(1);
            self.start_fetch(key, entry);
        }
        debug!(key = %key, subscribers = entry.subscribers, "subscribed");
        let generation = entry.generation;
        drop(entries);

        Subscription::new(self.clone(), key, generation, receiver)
    }

    /// Fetch regardless of staleness, joining a request already in flight.
    pub async fn refetch<Q: Query>(&self, query: &Q) -> QueryState<Q::Output> {
        let key = query.key();
        let pending = {
            let mut entries = mutex_lock(&self.inner.entries, SOURCE, "refetch");
            let entry = entries
                .entry(key)
                .or_insert_with(|| self.new_entry(query, Instant::now()));
            self.join_or_start(key, entry)
        };
        let result = pending.await;
        self.settle(key, result)
    }

    /// Refetch an entry that is known to exist, e.g. from a subscription.
    pub(crate) async fn refetch_key<T: Send + Sync + 'static>(
        &self,
        key: QueryKey,
    ) -> QueryState<T> {
        let pending = {
            let mut entries = mutex_lock(&self.inner.entries, SOURCE, "refetch_key");
            match entries.get_mut(&key) {
                Some(entry) => self.join_or_start(key, entry),
                None => return QueryState::default(),
            }
        };
        let result = pending.await;
        self.settle(key, result)
    }

    /// Current state without fetching.
    pub fn peek<Q: Query>(&self, query: &Q) -> QueryState<Q::Output> {
        self.snapshot(&query.key())
            .map(|snapshot| QueryState::from_snapshot(&snapshot))
            .unwrap_or_default()
    }

    /// Perform a write and invalidate the tags it declares.
    ///
    /// A failed write returns the error and leaves every entry untouched.
    pub async fn mutate<M: Mutation>(&self, mutation: M) -> Result<Mutated<M::Output>, ApiError> {
        let request = mutation.request()?;
        let payload = match self.inner.client.send(request).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(
                    resource = %mutation.kind(),
                    endpoint = M::ENDPOINT,
                    error = %err,
                    "mutation failed"
                );
                return Err(err);
            }
        };
        let message = payload.message.clone();
        let data = mutation.decode(payload)?;

        let tags = mutation.invalidates(&data);
        let affected = self.invalidate_tags(&tags);
        info!(
            resource = %mutation.kind(),
            endpoint = M::ENDPOINT,
            tags = %render_tags(&tags),
            affected,
            "mutation applied"
        );
        Ok(Mutated { data, message })
    }

    /// Mark every entry providing any of `tags` as stale.
    ///
    /// Entries with subscribers are refetched in the background; others are
    /// refetched by their next query. Returns the number of entries marked.
    pub fn invalidate_tags(&self, tags: &[Tag]) -> usize {
        let keys = self.inner.registry.keys_for_tags(tags);
        if keys.is_empty() {
            debug!(tags = %render_tags(tags), "invalidation matched no entries");
            return 0;
        }

        let epoch = self.inner.clock.next();
        let spawn = can_spawn();
        let mut marked = 0usize;
        let mut entries = mutex_lock(&self.inner.entries, SOURCE, "invalidate_tags");
        for key in keys {
            let Some(entry) = entries.get_mut(&key) else {
                continue;
            };
            entry.invalidated_at = epoch;
            entry.state.send_modify(|snapshot| snapshot.stale = true);
            marked += 1;

            if entry.subscribers > 0 && entry.inflight.is_none() && spawn {
                self.start_fetch(key, entry);
            }
        }
        drop(entries);

        counter!(METRIC_INVALIDATED).increment(marked as u64);
        debug!(tags = %render_tags(tags), epoch, marked, "tags invalidated");
        marked
    }

    /// Evict entries that have had no subscribers for the retention window.
    pub fn collect_garbage(&self) -> usize {
        self.collect_garbage_at(Instant::now())
    }

    pub fn collect_garbage_at(&self, now: Instant) -> usize {
        let Some(keep_unused) = self.inner.config.keep_unused else {
            return 0;
        };

        let mut entries = mutex_lock(&self.inner.entries, SOURCE, "collect_garbage");
        let expired: Vec<QueryKey> = entries
            .iter()
            .filter(|(_, entry)| {
                entry.subscribers == 0
                    && entry.inflight.is_none()
                    && entry
                        .unused_since
                        .is_some_and(|since| now.duration_since(since) >= keep_unused)
            })
            .map(|(key, _)| *key)
            .collect();

        for key in &expired {
            entries.remove(key);
            self.inner.registry.unregister(key);
        }
        drop(entries);

        if !expired.is_empty() {
            counter!(METRIC_EVICT).increment(expired.len() as u64);
            debug!(evicted = expired.len(), "unused cache entries evicted");
        }
        expired.len()
    }

    /// Run [`collect_garbage`](Self::collect_garbage) on the configured
    /// cadence until every handle to the cache is dropped.
    ///
    /// Returns `None` when eviction is disabled or the interval is zero.
    pub fn spawn_janitor(&self) -> Option<JoinHandle<()>> {
        let period = self.inner.config.gc_interval;
        if !self.inner.config.evicts() || period.is_zero() {
            return None;
        }
        let weak = Arc::downgrade(&self.inner);
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                ResourceCache { inner }.collect_garbage();
            }
        }))
    }

    pub fn entry_count(&self) -> usize {
        mutex_lock(&self.inner.entries, SOURCE, "entry_count").len()
    }

    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        mutex_lock(&self.inner.entries, SOURCE, "subscriber_count")
            .get(key)
            .map_or(0, |entry| entry.subscribers)
    }

    /// Drop every entry and tag mapping.
    ///
    /// Subscriptions taken before the clear keep their last state and no
    /// longer count towards any entry.
    pub fn clear(&self) {
        mutex_lock(&self.inner.entries, SOURCE, "clear").clear();
        self.inner.registry.clear();
    }

    pub(crate) fn unsubscribe(&self, key: &QueryKey, generation: Epoch) {
        let mut entries = mutex_lock(&self.inner.entries, SOURCE, "unsubscribe");
        if let Some(entry) = entries
            .get_mut(key)
            .filter(|entry| entry.generation == generation)
        {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers == 0 {
                entry.unused_since = Some(Instant::now());
            }
            debug!(key = %key, subscribers = entry.subscribers, "unsubscribed");
        }
    }

    fn new_entry<Q: Query>(&self, query: &Q, now: Instant) -> CacheEntry {
        CacheEntry::new(query, now, self.inner.clock.next())
    }

    fn snapshot(&self, key: &QueryKey) -> Option<Snapshot> {
        mutex_lock(&self.inner.entries, SOURCE, "snapshot")
            .get(key)
            .map(CacheEntry::snapshot)
    }

    fn join_or_start(&self, key: QueryKey, entry: &mut CacheEntry) -> InFlight {
        if let Some((_, pending)) = &entry.inflight {
            counter!(METRIC_DEDUP).increment(1);
            debug!(key = %key, "joining in-flight request");
            return pending.clone();
        }
        counter!(METRIC_MISS).increment(1);
        self.start_fetch(key, entry)
    }

    /// Spawn the request for `key`. Must be called with the entries lock
    /// held so that a second caller sees the in-flight marker.
    fn start_fetch(&self, key: QueryKey, entry: &mut CacheEntry) -> InFlight {
        if let Some((_, pending)) = &entry.inflight {
            return pending.clone();
        }

        let epoch = self.inner.clock.next();
        entry
            .state
            .send_modify(|snapshot| snapshot.status = QueryStatus::Loading);
        if self.inner.registry.tags_for_key(&key).is_empty() && !entry.seed_tags.is_empty() {
            self.inner
                .registry
                .provide(key, entry.seed_tags.iter().cloned().collect());
        }

        let fetch = (entry.fetcher)(self.inner.client.clone());
        let cache = self.clone();
        let handle = tokio::spawn(async move {
            let fetched = fetch.await;
            cache.complete(key, epoch, fetched)
        });
        let pending: InFlight = async move { handle.await.unwrap_or(Err(ApiError::Aborted)) }
            .boxed()
            .shared();

        debug!(resource = %key.kind, endpoint = key.endpoint, key = %key, epoch, "fetch started");
        entry.inflight = Some((epoch, pending.clone()));
        pending
    }

    /// Write a finished request into its entry.
    fn complete(&self, key: QueryKey, epoch: Epoch, fetched: Fetched) -> FetchResult {
        let Fetched { result, tags } = fetched;
        let mut entries = mutex_lock(&self.inner.entries, SOURCE, "complete");
        let Some(entry) = entries.get_mut(&key) else {
            return result;
        };
        if entry.inflight_epoch() != Some(epoch) {
            return result;
        }
        entry.inflight = None;

        let invalidated_during_flight = entry.invalidated_at > epoch;
        match &result {
            Ok(data) => {
                self.inner.registry.provide(key, tags.into_iter().collect());
                let fetched_at = OffsetDateTime::now_utc();
                entry.state.send_modify(|snapshot| {
                    snapshot.status = QueryStatus::Success;
                    snapshot.data = data.clone();
                    snapshot.error = None;
                    snapshot.fetched_at = Some(fetched_at);
                    snapshot.stale = invalidated_during_flight;
                });
            }
            Err(err) => {
                entry.state.send_modify(|snapshot| {
                    snapshot.status = QueryStatus::Error;
                    snapshot.error = Some(err.clone());
                    snapshot.stale |= invalidated_during_flight;
                });
            }
        }
        debug!(key = %key, epoch, ok = result.is_ok(), "fetch completed");

        if invalidated_during_flight && entry.subscribers > 0 {
            debug!(key = %key, epoch, "invalidated during flight; refetching");
            self.start_fetch(key, entry);
        }
        result
    }

    fn settle<T: Send + Sync + 'static>(&self, key: QueryKey, result: FetchResult) -> QueryState<T> {
        let mut state = self
            .snapshot(&key)
            .map(|snapshot| QueryState::from_snapshot(&snapshot))
            .unwrap_or_default();
        match result {
            Ok(data) => {
                state.status = QueryStatus::Success;
                state.data = data.and_then(downcast);
                state.error = None;
                if state.fetched_at.is_none() {
                    state.fetched_at = Some(OffsetDateTime::now_utc());
                }
            }
            Err(err) => {
                state.status = QueryStatus::Error;
                state.error = Some(err);
            }
        }
        state
    }
}

fn can_spawn() -> bool {
    Handle::try_current().is_ok()
}

fn render_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(Tag::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::MockServer;
    use serde_json::Value;

    use super::*;
    use crate::cache::keys::ResourceKind;
    use crate::infra::auth::TokenStore;
    use crate::infra::rest::{ApiRequest, Payload};

    #[derive(Debug, Clone, Hash)]
    struct Names;

    impl Query for Names {
        type Output = Vec<String>;
        const ENDPOINT: &'static str = "names";

        fn kind(&self) -> ResourceKind {
            ResourceKind::Faq
        }

        fn request(&self) -> ApiRequest {
            ApiRequest::get("names")
        }

        fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
            payload.into_data()
        }

        fn provides(&self, _output: Option<&Self::Output>) -> Vec<Tag> {
            vec![Tag::list(ResourceKind::Faq)]
        }
    }

    struct AddName(&'static str);

    impl Mutation for AddName {
        type Output = Value;
        const ENDPOINT: &'static str = "add_name";

        fn kind(&self) -> ResourceKind {
            ResourceKind::Faq
        }

        fn request(&self) -> Result<ApiRequest, ApiError> {
            ApiRequest::post("names").json(&serde_json::json!({ "name": self.0 }))
        }

        fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError> {
            Ok(payload.data)
        }

        fn invalidates(&self, _output: &Self::Output) -> Vec<Tag> {
            vec![Tag::list(ResourceKind::Faq)]
        }
    }

    fn cache(server: &MockServer, config: CacheConfig) -> ResourceCache {
        let client = ApiClient::with_base(&server.base_url(), TokenStore::with_token("t"))
            .expect("client");
        ResourceCache::new(client, config)
    }

    fn names_body(names: &[&str]) -> String {
        serde_json::json!({ "success": true, "data": names }).to_string()
    }

    #[tokio::test]
    async fn fresh_entry_is_served_from_cache() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&["a"]));
        });
        let cache = cache(&server, CacheConfig::default());

        let first = cache.query(Names).await;
        let second = cache.query(Names).await;

        assert_eq!(mock.hits(), 1);
        assert!(first.is_success());
        assert_eq!(second.data(), Some(&vec!["a".to_string()]));
    }

    #[tokio::test]
    async fn concurrent_queries_share_one_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .delay(Duration::from_millis(50))
                .body(names_body(&["a", "b"]));
        });
        let cache = cache(&server, CacheConfig::default());

        let (a, b, c) = futures::join!(
            cache.query(Names),
            cache.query(Names),
            cache.refetch(&Names)
        );

        assert_eq!(mock.hits(), 1);
        assert_eq!(a.data(), b.data());
        assert_eq!(b.data(), c.data());
        assert_eq!(a.data().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn refetch_ignores_freshness() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&["a"]));
        });
        let cache = cache(&server, CacheConfig::default());

        cache.query(Names).await;
        cache.refetch(&Names).await;
        assert_eq!(mock.hits(), 2);
    }

    #[tokio::test]
    async fn failed_refetch_keeps_previous_data() {
        let server = MockServer::start();
        let mut ok = server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&["kept"]));
        });
        let cache = cache(&server, CacheConfig::default());
        assert!(cache.query(Names).await.is_success());

        ok.delete();
        server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(503).body("");
        });

        let state = cache.refetch(&Names).await;
        assert!(state.is_error());
        assert_eq!(state.error.as_ref().and_then(ApiError::http_status), Some(503));
        assert_eq!(state.data(), Some(&vec!["kept".to_string()]));
    }

    #[tokio::test]
    async fn invalidation_without_providers_is_a_noop() {
        let server = MockServer::start();
        let cache = cache(&server, CacheConfig::default());
        assert_eq!(cache.invalidate_tags(&[Tag::list(ResourceKind::Menu)]), 0);
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn invalidation_marks_unsubscribed_entries_stale() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&["a"]));
        });
        let cache = cache(&server, CacheConfig::default());
        cache.query(Names).await;

        assert_eq!(cache.invalidate_tags(&[Tag::list(ResourceKind::Faq)]), 1);
        assert!(cache.peek(&Names).stale);
        // Nobody is subscribed, so nothing refetches until the next query.
        assert_eq!(mock.hits(), 1);

        let state = cache.query(Names).await;
        assert!(!state.stale);
        assert_eq!(mock.hits(), 2);
    }

    #[tokio::test]
    async fn mutation_refetches_subscribed_entries() {
        let server = MockServer::start();
        let mut list = server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&["a"]));
        });
        server.mock(|when, then| {
            when.method("POST").path("/names");
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"message":"Created","data":{"name":"b"}}"#);
        });
        let cache = cache(&server, CacheConfig::default());

        let mut sub = cache.subscribe(Names);
        let first = sub.settled().await.expect("settled");
        assert_eq!(first.data().map(Vec::len), Some(1));

        list.delete();
        server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&["a", "b"]));
        });

        let outcome = cache.mutate(AddName("b")).await.expect("mutate");
        assert_eq!(outcome.message.as_deref(), Some("Created"));
        assert!(sub.state().is_loading());

        let refreshed = sub.settled().await.expect("settled");
        assert!(refreshed.is_success());
        assert_eq!(refreshed.data().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn failed_mutation_leaves_entries_untouched() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&["a"]));
        });
        server.mock(|when, then| {
            when.method("POST").path("/names");
            then.status(500)
                .header("content-type", "application/json")
                .body(r#"{"message":"boom"}"#);
        });
        let cache = cache(&server, CacheConfig::default());
        cache.query(Names).await;

        let err = cache.mutate(AddName("b")).await.expect_err("fails");
        assert_eq!(err.user_message(), "boom");

        let state = cache.peek(&Names);
        assert!(state.is_success());
        assert!(!state.stale);
        assert_eq!(state.data().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn unused_entries_are_collected_after_retention() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&["a"]));
        });
        let cache = cache(
            &server,
            CacheConfig {
                keep_unused: Some(Duration::from_secs(60)),
                ..CacheConfig::default()
            },
        );

        cache.query(Names).await;
        let sub = cache.subscribe(Names);
        let later = Instant::now() + Duration::from_secs(120);
        assert_eq!(cache.collect_garbage_at(later), 0);

        drop(sub);
        assert_eq!(cache.subscriber_count(&Names.key()), 0);
        assert_eq!(cache.collect_garbage_at(Instant::now()), 0);
        assert_eq!(cache.collect_garbage_at(later), 1);
        assert_eq!(cache.entry_count(), 0);
        assert_eq!(cache.invalidate_tags(&[Tag::list(ResourceKind::Faq)]), 0);
    }

    #[tokio::test]
    async fn disabled_retention_never_evicts() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .body(names_body(&[]));
        });
        let cache = cache(
            &server,
            CacheConfig {
                keep_unused: None,
                ..CacheConfig::default()
            },
        );
        cache.query(Names).await;

        let much_later = Instant::now() + Duration::from_secs(86_400);
        assert_eq!(cache.collect_garbage_at(much_later), 0);
        assert!(cache.spawn_janitor().is_none());
    }

    #[tokio::test]
    async fn invalidation_during_first_fetch_keeps_the_result_stale() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/names");
            then.status(200)
                .header("content-type", "application/json")
                .delay(Duration::from_millis(150))
                .body(names_body(&["before"]));
        });
        let cache = cache(&server, CacheConfig::default());

        let reader = cache.clone();
        let pending = tokio::spawn(async move { reader.query(Names).await });
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.invalidate_tags(&[Tag::list(ResourceKind::Faq)]), 1);
        let state = pending.await.expect("query task");
        assert!(state.is_success());
        assert!(state.stale);
        assert!(cache.peek(&Names).stale);

        cache.query(Names).await;
        assert_eq!(mock.hits(), 2);
    }

    #[tokio::test]
    async fn zero_interval_janitor_is_not_spawned() {
        let server = MockServer::start();
        let cache = cache(
            &server,
            CacheConfig {
                keep_unused: Some(Duration::from_secs(60)),
                gc_interval: Duration::ZERO,
            },
        );
        assert!(cache.spawn_janitor().is_none());
    }
}
