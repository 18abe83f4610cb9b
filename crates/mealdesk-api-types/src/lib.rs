//! Wire types shared by the mealdesk client and its tooling.
//!
//! Every resource exposed by the back-office REST API has a record type (what
//! the server returns) and a draft type (what create/update calls send). The
//! server wraps payloads in an [`Envelope`]; list endpoints add a
//! [`Pagination`] block next to the data.

pub mod auth;
pub mod catalog;
pub mod content;
pub mod envelope;
pub mod finance;
pub mod locations;
pub mod orders;
pub mod people;
pub mod uploads;

pub use envelope::{Envelope, Page, Pagination};
