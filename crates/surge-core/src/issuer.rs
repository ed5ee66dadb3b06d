//! The request-issuing seam between the dispatcher and the transport.

use crate::error::BoxError;
use crate::outcome::Outcome;
use futures::future::BoxFuture;

/// A pending outcome: the eventual pass/fail result of one issued request.
pub type OutcomeFuture = BoxFuture<'static, Outcome>;

/// Capability that starts one request per sequence number.
///
/// `issue` must not block or suspend: it constructs the request and
/// returns a future that resolves to the request's outcome once the
/// transport is done with it. Per-request failures belong inside that
/// future as [`Outcome::Fail`]; a synchronous `Err` means the request
/// could not be started at all and aborts the whole run.
pub trait RequestIssuer: Send + Sync {
    /// Starts the request identified by `seq` and returns its pending outcome.
    fn issue(&self, seq: u64) -> Result<OutcomeFuture, BoxError>;
}

/// A [`RequestIssuer`] wrapping a closure.
pub struct IssuerFn<F> {
    f: F,
}

/// Creates a [`RequestIssuer`] from a closure.
///
/// ```rust
/// use futures::FutureExt;
/// use surge_core::{issuer_fn, Outcome};
///
/// let issuer = issuer_fn(|seq| {
///     Ok(async move { Outcome::Pass { status: 200 + (seq % 2) as u16 } }.boxed())
/// });
/// ```
pub fn issuer_fn<F>(f: F) -> IssuerFn<F>
where
    F: Fn(u64) -> Result<OutcomeFuture, BoxError> + Send + Sync,
{
    IssuerFn { f }
}

impl<F> RequestIssuer for IssuerFn<F>
where
    F: Fn(u64) -> Result<OutcomeFuture, BoxError> + Send + Sync,
{
    fn issue(&self, seq: u64) -> Result<OutcomeFuture, BoxError> {
        (self.f)(seq)
    }
}
