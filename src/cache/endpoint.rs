//! Endpoint definitions consumed by the cache engine.

use std::hash::Hash;

use crate::infra::rest::{ApiError, ApiRequest, Payload};

use super::keys::{QueryKey, ResourceKind, Tag};

/// A cacheable read.
///
/// The implementing value doubles as the parameter set: its `Hash` decides
/// which entry it shares with other queries of the same endpoint.
pub trait Query: Hash + Clone + Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    /// Stable endpoint name, part of the entry key.
    const ENDPOINT: &'static str;

    fn kind(&self) -> ResourceKind;

    fn request(&self) -> ApiRequest;

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError>;

    /// Tags the entry provides once it holds `output` (`None` for an empty
    /// singleton).
    fn provides(&self, output: Option<&Self::Output>) -> Vec<Tag>;

    /// Treat a 404 as a successful empty result.
    fn not_found_as_empty(&self) -> bool {
        false
    }

    fn key(&self) -> QueryKey {
        QueryKey::new(self.kind(), Self::ENDPOINT, self)
    }
}

/// A write that invalidates tags when it succeeds.
pub trait Mutation: Send + 'static {
    type Output: Send + 'static;

    const ENDPOINT: &'static str;

    fn kind(&self) -> ResourceKind;

    fn request(&self) -> Result<ApiRequest, ApiError>;

    fn decode(&self, payload: Payload) -> Result<Self::Output, ApiError>;

    fn invalidates(&self, output: &Self::Output) -> Vec<Tag>;
}

/// Successful mutation result.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutated<T> {
    pub data: T,
    /// Server-provided confirmation text, if any.
    pub message: Option<String>,
}
