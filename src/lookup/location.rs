//! Origin lookup against a single geolocation provider.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::fetch::{HttpClient, HttpRequest, PROVIDER_TIMEOUT};
use crate::observation::{Origin, UNKNOWN};

use super::{OriginLookup, ProviderError};

/// Placeholder replaced by the address in the location URL template.
pub const IP_PLACEHOLDER: &str = "{ip}";

/// `status` value the provider reports for a successful lookup.
pub const SUCCESS_STATUS: &str = "success";

/// Resolves the [`Origin`] of an address.
///
/// All-or-nothing per call: any failure yields `None`, while a successful
/// answer may still leave individual fields as [`UNKNOWN`].
#[derive(Debug, Clone)]
pub struct LocationResolver<H> {
    client: H,
    template: String,
    timeout: Duration,
}

impl<H> LocationResolver<H> {
    /// Creates a resolver for the given URL template.
    #[must_use]
    pub fn new(client: H, template: impl Into<String>) -> Self {
        Self {
            client,
            template: template.into(),
            timeout: PROVIDER_TIMEOUT,
        }
    }
}

impl<H: HttpClient> LocationResolver<H> {
    /// Queries the provider for the origin of `address`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the expanded URL is invalid, the
    /// request fails, the status is not `200`, the body is not JSON, or the
    /// provider does not report success.
    pub async fn query(&self, address: &str) -> Result<Origin, ProviderError> {
        let raw = expand_template(&self.template, address);
        let url =
            Url::parse(&raw).map_err(|source| ProviderError::InvalidUrl { url: raw, source })?;

        let response = self
            .client
            .request(HttpRequest::get_json(url, self.timeout))
            .await?;
        if !response.is_ok() {
            return Err(ProviderError::Status(response.status));
        }

        let body: Value =
            serde_json::from_slice(&response.body).map_err(ProviderError::InvalidBody)?;
        parse_origin(&body)
    }

    /// Returns the origin of `address`, or `None` on any failure.
    pub async fn resolve(&self, address: &str) -> Option<Origin> {
        match self.query(address).await {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::debug!("Location lookup for {address} failed: {e}");
                None
            }
        }
    }
}

impl<H: HttpClient> OriginLookup for LocationResolver<H> {
    async fn lookup(&self, address: &str) -> Option<Origin> {
        self.resolve(address).await
    }
}

/// Substitutes `address` for every [`IP_PLACEHOLDER`] in `template`.
#[must_use]
pub fn expand_template(template: &str, address: &str) -> String {
    template.replace(IP_PLACEHOLDER, address)
}

/// Maps a provider response body onto an [`Origin`].
///
/// Reads `country`, `regionName`, `city` and `isp`; any field that is
/// missing or not a string becomes [`UNKNOWN`].
///
/// # Errors
///
/// Returns [`ProviderError::Rejected`] unless `status` is [`SUCCESS_STATUS`].
pub fn parse_origin(body: &Value) -> Result<Origin, ProviderError> {
    let status = body.get("status").and_then(Value::as_str).unwrap_or_default();
    if status != SUCCESS_STATUS {
        return Err(ProviderError::Rejected {
            status: status.to_string(),
        });
    }

    let field = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN)
            .to_string()
    };

    Ok(Origin::new(
        field("country"),
        field("regionName"),
        field("city"),
        field("isp"),
    ))
}
