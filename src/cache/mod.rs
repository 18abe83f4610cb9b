//! Mealdesk resource cache.
//!
//! One shared, typed cache in front of the REST API:
//!
//! - **Queries** declare the tags they provide (`MealPlan:LIST`,
//!   `MealPlan:<id>`, `AboutUs:SINGLE`, ...).
//! - **Mutations** declare the tags they invalidate; a successful mutation
//!   marks every providing entry stale and refetches the subscribed ones.
//! - Identical queries in flight at the same time share one request.
//! - Entries without subscribers are evicted after `keep_unused`.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! keep_unused_seconds = 60   # 0 keeps unused entries forever
//! gc_interval_seconds = 30
//! ```

mod config;
mod endpoint;
mod engine;
mod entry;
mod events;
mod keys;
pub(crate) mod lock;
mod registry;
mod subscription;

pub use config::CacheConfig;
pub use endpoint::{Mutated, Mutation, Query};
pub use engine::ResourceCache;
pub use entry::{QueryState, QueryStatus};
pub use events::{Epoch, EpochClock};
pub use keys::{QueryKey, ResourceKind, Tag, TagId, hash_value};
pub use registry::TagRegistry;
pub use subscription::Subscription;
