//! Wire contract of the recruitment backend: envelopes, row shapes and the HTTP client.

pub mod client;
pub mod dto;
mod envelope;
pub mod error;

pub use client::RestClient;
pub use dto::{HireRequestDto, InvalidHireRequest, ResponseSubmission};
pub use error::FetchError;
