//! Data layer and POS core of the Mealdesk back office.
//!
//! [`cache::ResourceCache`] is the shared, tag-invalidated cache every
//! resource screen reads through; [`application::resources`] declares the
//! REST endpoints it serves; [`pos`] holds the point-of-sale state.

pub mod application;
pub mod cache;
pub mod config;
pub mod infra;
pub mod pos;
