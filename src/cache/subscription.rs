use std::marker::PhantomData;

use tokio::sync::watch;

use super::engine::ResourceCache;
use super::entry::{QueryState, Snapshot};
use super::events::Epoch;
use super::keys::QueryKey;

/// Live handle on one cache entry.
///
/// While the handle exists the entry counts it as a subscriber, is never
/// garbage collected, and is refetched whenever one of its tags is
/// invalidated. Dropping it releases the subscription; requests already in
/// flight keep running but nothing reaches the dropped handle.
pub struct Subscription<T> {
    cache: ResourceCache,
    key: QueryKey,
    generation: Epoch,
    receiver: watch::Receiver<Snapshot>,
    _output: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> Subscription<T> {
    pub(crate) fn new(
        cache: ResourceCache,
        key: QueryKey,
        generation: Epoch,
        receiver: watch::Receiver<Snapshot>,
    ) -> Self {
        Self {
            cache,
            key,
            generation,
            receiver,
            _output: PhantomData,
        }
    }

    pub fn key(&self) -> QueryKey {
        self.key
    }

    pub fn state(&self) -> QueryState<T> {
        QueryState::from_snapshot(&self.receiver.borrow())
    }

    /// Wait for the next state change. `None` once the entry is gone.
    pub async fn changed(&mut self) -> Option<QueryState<T>> {
        self.receiver.changed().await.ok()?;
        Some(QueryState::from_snapshot(&self.receiver.borrow_and_update()))
    }

    /// Wait until the state satisfies `predicate`, checking the current
    /// state first.
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Option<QueryState<T>>
    where
        F: FnMut(&QueryState<T>) -> bool,
    {
        let snapshot = self
            .receiver
            .wait_for(|snapshot| predicate(&QueryState::from_snapshot(snapshot)))
            .await
            .ok()?;
        Some(QueryState::from_snapshot(&snapshot))
    }

    /// Wait until no request is pending for the entry.
    pub async fn settled(&mut self) -> Option<QueryState<T>> {
        self.wait_for(QueryState::is_settled).await
    }

    pub async fn refetch(&self) -> QueryState<T> {
        self.cache.refetch_key(self.key).await
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.cache.unsubscribe(&self.key, self.generation);
    }
}
