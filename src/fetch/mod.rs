//! HTTP transport used by the address and location lookups.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The transport abstraction ([`HttpClient`])
//! - The production client ([`ReqwestClient`])
//!
//! Lookups only ever see this narrow "fetch a URL with a timeout" surface,
//! which keeps them testable with in-memory clients.

mod client;
mod error;
mod request;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod request_tests;

use std::time::Duration;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};

/// Timeout applied to every provider request.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
