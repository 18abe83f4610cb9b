//! REST transport: request model, envelope decoding and error taxonomy.

mod client;
mod envelope;
mod error;
mod request;

pub use client::ApiClient;
pub use envelope::{Payload, decode_payload};
pub use error::ApiError;
pub use request::{ApiRequest, FormPart, MultipartForm, RequestBody};
