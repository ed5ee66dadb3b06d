//! Error types for the dispatcher.

/// Boxed error returned by request issuers at admission time.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from building a dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The request budget must be positive.
    #[error("total_requests must be greater than zero")]
    ZeroTotalRequests,
    /// The concurrency ceiling must be positive.
    #[error("max_in_flight must be greater than zero")]
    ZeroMaxInFlight,
}

/// Errors that abort a dispatcher run.
///
/// Per-request failures never surface here; they are converted to
/// [`Outcome::Fail`](crate::Outcome::Fail) and observed like any other
/// completion.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The issuer failed synchronously while starting a request.
    #[error("failed to start request {seq}: {source}")]
    Admission {
        /// Sequence number of the request that could not be started.
        seq: u64,
        /// The issuer's error.
        #[source]
        source: BoxError,
    },
}
