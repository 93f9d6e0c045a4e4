//! Public address and origin lookups.
//!
//! This module provides:
//! - [`AddressResolver`]: walks an ordered provider list until one reports an address
//! - [`LocationResolver`]: asks a geolocation provider for the [`Origin`] of an address
//! - [`first_success`]: the "try next" combinator both are built around
//! - [`AddressLookup`] / [`OriginLookup`]: the seams the monitor depends on
//!
//! A single provider failing is never an error for the caller: the address
//! resolver moves on to the next provider and the location resolver reports
//! the origin as unknown. Only running out of address providers is surfaced.

mod address;
mod error;
mod location;

#[cfg(test)]
mod mod_tests;

use std::future::Future;

pub use address::{AddressResolver, extract_address};
pub use error::{LookupError, ProviderError};
pub use location::{
    IP_PLACEHOLDER, LocationResolver, SUCCESS_STATUS, expand_template, parse_origin,
};

use crate::observation::Origin;

/// Source of the current public address.
pub trait AddressLookup: Send + Sync {
    /// Returns the current public address.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoAddressAvailable`] when no provider could
    /// report an address.
    fn lookup(&self) -> impl Future<Output = Result<String, LookupError>> + Send;
}

/// Source of the apparent origin of an address.
pub trait OriginLookup: Send + Sync {
    /// Returns the origin of `address`, or `None` if it could not be determined.
    fn lookup(&self, address: &str) -> impl Future<Output = Option<Origin>> + Send;
}

/// Tries `attempt` against each provider in order and returns the first success.
///
/// Providers after the first success are never attempted. Failures are only
/// traced at debug level; they carry no information the caller acts on.
pub async fn first_success<'a, P, T, F, Fut>(providers: P, mut attempt: F) -> Option<T>
where
    P: IntoIterator<Item = &'a str>,
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    for provider in providers {
        match attempt(provider).await {
            Ok(value) => return Some(value),
            Err(e) => tracing::debug!("Provider {provider} unavailable: {e}"),
        }
    }
    None
}
