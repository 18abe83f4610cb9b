//! Infrastructure adapters: REST transport, session storage, uploads and telemetry.

pub mod auth;
pub mod error;
pub mod rest;
pub mod telemetry;
pub mod uploads;
