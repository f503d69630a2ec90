//! HTTP client module with bounded redirect following and typed errors.

mod client;
mod error;

pub use client::{ClientOptions, HttpClient, MAX_REDIRECTS, USER_AGENT};
pub use error::FetchError;
