//! Back-office services built on the resource cache.

pub mod error;
pub mod feedback;
pub mod resources;
