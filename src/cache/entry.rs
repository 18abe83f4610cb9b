//! Per-key cache entry state.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::infra::rest::{ApiClient, ApiError};

use super::endpoint::Query;
use super::events::Epoch;
use super::keys::Tag;

pub(crate) type AnyData = Arc<dyn Any + Send + Sync>;
pub(crate) type FetchResult = Result<Option<AnyData>, ApiError>;
pub(crate) type InFlight = Shared<BoxFuture<'static, FetchResult>>;
pub(crate) type Fetcher = Arc<dyn Fn(ApiClient) -> BoxFuture<'static, Fetched> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Uninitialized,
    Loading,
    Success,
    Error,
}

/// Type-erased view published to subscribers.
#[derive(Clone, Default)]
pub(crate) struct Snapshot {
    pub status: QueryStatus,
    pub data: Option<AnyData>,
    pub error: Option<ApiError>,
    pub fetched_at: Option<OffsetDateTime>,
    pub stale: bool,
}

impl Snapshot {
    pub fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Success && !self.stale
    }
}

/// State of one query as seen by a caller.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<ApiError>,
    pub fetched_at: Option<OffsetDateTime>,
    /// Invalidated since the data was fetched.
    pub stale: bool,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Uninitialized,
            data: None,
            error: None,
            fetched_at: None,
            stale: false,
        }
    }
}

impl<T: Send + Sync + 'static> QueryState<T> {
    pub(crate) fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            status: snapshot.status,
            data: snapshot.data.clone().and_then(downcast),
            error: snapshot.error.clone(),
            fetched_at: snapshot.fetched_at,
            stale: snapshot.stale,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    /// A request finished and none is pending.
    pub fn is_settled(&self) -> bool {
        matches!(self.status, QueryStatus::Success | QueryStatus::Error)
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }

    /// Data on success (possibly absent), the error on failure.
    pub fn into_result(self) -> Result<Option<Arc<T>>, ApiError> {
        match (self.status, self.error) {
            (QueryStatus::Error, Some(err)) => Err(err),
            _ => Ok(self.data),
        }
    }
}

pub(crate) fn downcast<T: Send + Sync + 'static>(data: AnyData) -> Option<Arc<T>> {
    data.downcast::<T>().ok()
}

/// Outcome of one network round trip, before it is written to the entry.
pub(crate) struct Fetched {
    pub result: FetchResult,
    pub tags: Vec<Tag>,
}

pub(crate) struct CacheEntry {
    pub state: watch::Sender<Snapshot>,
    pub inflight: Option<(Epoch, InFlight)>,
    pub subscribers: usize,
    /// When the subscriber count last dropped to zero.
    pub unused_since: Option<Instant>,
    pub invalidated_at: Epoch,
    /// Distinguishes this entry from one recreated under the same key
    /// after a clear.
    pub generation: Epoch,
    /// Tags known before any response, e.g. `LIST` or the requested id.
    pub seed_tags: Vec<Tag>,
    pub fetcher: Fetcher,
}

impl CacheEntry {
    pub fn new<Q: Query>(query: &Q, now: Instant, generation: Epoch) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        let seed_tags = query.provides(None);
        let query = query.clone();
        let fetcher: Fetcher = Arc::new(move |client: ApiClient| {
            let query = query.clone();
            async move { run_query(&client, &query).await }.boxed()
        });
        Self {
            state,
            inflight: None,
            subscribers: 0,
            unused_since: Some(now),
            invalidated_at: 0,
            generation,
            seed_tags,
            fetcher,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn inflight_epoch(&self) -> Option<Epoch> {
        self.inflight.as_ref().map(|(epoch, _)| *epoch)
    }
}

async fn run_query<Q: Query>(client: &ApiClient, query: &Q) -> Fetched {
    let outcome = match client.send(query.request()).await {
        Ok(payload) => query.decode(payload).map(Some),
        Err(err) if query.not_found_as_empty() && err.is_not_found() => {
            debug!(
                resource = %query.kind(),
                endpoint = Q::ENDPOINT,
                "resource not created yet; treating as empty"
            );
            Ok(None)
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(output) => Fetched {
            tags: query.provides(output.as_ref()),
            result: Ok(output.map(|value| Arc::new(value) as AnyData)),
        },
        Err(err) => {
            warn!(
                resource = %query.kind(),
                endpoint = Q::ENDPOINT,
                error = %err,
                "query failed"
            );
            Fetched {
                result: Err(err),
                tags: Vec::new(),
            }
        }
    }
}
