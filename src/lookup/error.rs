//! Error types for address and origin lookups.

use thiserror::Error;

use crate::fetch::HttpError;

/// Why a single provider could not be used.
///
/// Always recovered locally by the resolvers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider entry (or expanded template) is not a valid URL.
    #[error("Invalid provider URL '{url}': {source}")]
    InvalidUrl {
        /// The offending URL string
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// The request itself failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The provider answered with something other than `200 OK`.
    #[error("Unexpected HTTP status {0}")]
    Status(http::StatusCode),

    /// The body is not valid JSON.
    #[error("Invalid response body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The body carries no usable address.
    #[error("Response contains no address")]
    MissingAddress,

    /// The geolocation provider reported a non-success status.
    #[error("Lookup rejected with status '{status}'")]
    Rejected {
        /// Status value reported by the provider
        status: String,
    },
}

/// Error returned when resolving the public address fails as a whole.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Every configured address provider failed.
    #[error("No public address available ({attempted} provider(s) tried)")]
    NoAddressAvailable {
        /// Number of providers that were attempted
        attempted: usize,
    },
}
