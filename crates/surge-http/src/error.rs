//! Error types for the write client.

/// Errors from constructing the write client or building a request.
///
/// Transport errors that occur after a request has started are not
/// represented here; they resolve to a failed
/// [`Outcome`](surge_core::Outcome) instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed or a request could not
    /// be built.
    #[error("transport setup error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The base URL and resource path do not form a valid URL.
    #[error("invalid target URL {url}: {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },
}
