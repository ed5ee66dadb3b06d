//! Outcome and reporting types for dispatched requests.

use std::fmt;

/// Result of one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request completed with a successful response.
    Pass {
        /// HTTP status code of the response.
        status: u16,
    },
    /// The request failed with an error response or a transport error.
    Fail {
        /// HTTP status code, if a response was received at all.
        status: Option<u16>,
        /// Failure detail: the response body or the transport error message.
        message: String,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }

    /// Status code of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Pass { status } => Some(*status),
            Outcome::Fail { status, .. } => *status,
        }
    }
}

/// A resolved request paired with its sequence number.
///
/// `Display` renders the per-request report line:
///
/// ```text
/// PASS - 3 [202]
/// FAIL - 7 [500]: server error
/// FAIL - 9 []: connection refused
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Sequence number assigned at admission.
    pub seq: u64,
    /// The observed outcome.
    pub outcome: Outcome,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Pass { status } => write!(f, "PASS - {} [{}]", self.seq, status),
            Outcome::Fail {
                status: Some(status),
                message,
            } => write!(f, "FAIL - {} [{}]: {}", self.seq, status, message),
            Outcome::Fail {
                status: None,
                message,
            } => write!(f, "FAIL - {} []: {}", self.seq, message),
        }
    }
}

/// Counters accumulated over one dispatcher run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Requests admitted into the in-flight set.
    pub admitted: u64,
    /// Outcomes observed as a pass.
    pub passed: u64,
    /// Outcomes observed as a failure.
    pub failed: u64,
    /// Requests still unresolved when the run returned. Always zero under
    /// [`DrainPolicy::AwaitAll`](crate::DrainPolicy::AwaitAll).
    pub abandoned: usize,
}
