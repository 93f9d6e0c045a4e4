//! Public address resolution over an ordered provider list.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::fetch::{HttpClient, HttpRequest, PROVIDER_TIMEOUT};

use super::{AddressLookup, LookupError, ProviderError, first_success};

/// Resolves the public address by asking providers in priority order.
///
/// Stateless per call: there is no retry within a provider and no
/// reordering based on past results.
#[derive(Debug, Clone)]
pub struct AddressResolver<H> {
    client: H,
    providers: Vec<String>,
    timeout: Duration,
}

impl<H> AddressResolver<H> {
    /// Creates a resolver for `providers` using the default 10 s timeout.
    #[must_use]
    pub const fn new(client: H, providers: Vec<String>) -> Self {
        Self {
            client,
            providers,
            timeout: PROVIDER_TIMEOUT,
        }
    }
}

impl<H: HttpClient> AddressResolver<H> {
    /// Asks a single provider for the public address.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the provider URL is invalid, the request
    /// fails, the status is not `200`, or the body carries no address.
    pub async fn query(&self, provider: &str) -> Result<String, ProviderError> {
        let url = Url::parse(provider).map_err(|source| ProviderError::InvalidUrl {
            url: provider.to_string(),
            source,
        })?;

        let response = self
            .client
            .request(HttpRequest::get_json(url, self.timeout))
            .await?;
        if !response.is_ok() {
            return Err(ProviderError::Status(response.status));
        }

        let body: Value =
            serde_json::from_slice(&response.body).map_err(ProviderError::InvalidBody)?;
        extract_address(&body).ok_or(ProviderError::MissingAddress)
    }

    /// Returns the address reported by the first provider that answers usefully.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoAddressAvailable`] if every provider fails.
    pub async fn resolve(&self) -> Result<String, LookupError> {
        let providers = self.providers.iter().map(String::as_str);

        first_success(providers, |provider| self.query(provider))
            .await
            .ok_or(LookupError::NoAddressAvailable {
                attempted: self.providers.len(),
            })
    }
}

impl<H: HttpClient> AddressLookup for AddressResolver<H> {
    async fn lookup(&self) -> Result<String, LookupError> {
        self.resolve().await
    }
}

/// Extracts the address from a provider response body.
///
/// Accepts either shape seen in the wild:
/// - `{"ip": "203.0.113.5"}`
/// - `{"origin": "203.0.113.5, 10.0.0.1"}` (first element, trimmed)
///
/// Empty values count as missing.
#[must_use]
pub fn extract_address(body: &Value) -> Option<String> {
    let direct = body
        .get("ip")
        .and_then(Value::as_str)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = direct {
        return Some(ip.to_string());
    }

    body.get("origin")
        .and_then(Value::as_str)
        .and_then(|origin| origin.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}
