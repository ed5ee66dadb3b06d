//! The bounded admission/reclaim loop.

use crate::config::{DispatcherConfig, DrainPolicy};
use crate::error::DispatchError;
use crate::events::DispatcherEvent;
use crate::issuer::RequestIssuer;
use crate::outcome::{Outcome, RunSummary};
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, warn};

#[cfg(feature = "metrics")]
use metrics::{counter, gauge};

/// Issues a fixed budget of requests while never holding more than the
/// configured ceiling of them unresolved at once.
pub struct Dispatcher {
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Creates a dispatcher from a built configuration.
    pub fn new(config: DispatcherConfig) -> Self {
        Self { config }
    }

    /// Runs the full request budget to completion.
    ///
    /// Sequence numbers are assigned contiguously from 1 in admission
    /// order. Admission never suspends: each issued request is spawned as
    /// its own task and starts progressing immediately. The loop suspends
    /// only while the in-flight set is at capacity, resuming as soon as
    /// any one request resolves; completion order carries no relation to
    /// admission order.
    ///
    /// Per-request failures are observed as [`Outcome::Fail`] and never
    /// abort the run. A synchronous error from the issuer aborts the run
    /// with [`DispatchError::Admission`]; requests already in flight are
    /// dropped and aborted.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run<I>(&self, issuer: &I) -> Result<RunSummary, DispatchError>
    where
        I: RequestIssuer + ?Sized,
    {
        let mut in_flight: JoinSet<(u64, Outcome)> = JoinSet::new();
        let mut seq: u64 = 0;
        let mut summary = RunSummary::default();

        debug!(
            name = %self.config.name,
            total_requests = self.config.total_requests,
            max_in_flight = self.config.max_in_flight,
            "dispatch loop starting"
        );

        while seq < self.config.total_requests {
            if in_flight.len() < self.config.max_in_flight {
                seq += 1;
                let n = seq;
                let pending = issuer
                    .issue(n)
                    .map_err(|source| DispatchError::Admission { seq: n, source })?;
                in_flight.spawn(async move { (n, pending.await) });
                summary.admitted += 1;

                debug!(seq = n, in_flight = in_flight.len(), "request admitted");
                self.config.event_listeners.emit(&DispatcherEvent::Admitted {
                    name: self.config.name.clone(),
                    timestamp: Instant::now(),
                    seq: n,
                    in_flight: in_flight.len(),
                });

                #[cfg(feature = "metrics")]
                {
                    counter!("surge_requests_admitted_total", "dispatcher" => self.config.name.clone())
                        .increment(1);
                    gauge!("surge_requests_in_flight", "dispatcher" => self.config.name.clone())
                        .set(in_flight.len() as f64);
                }
            } else {
                // At capacity: wait for the first of the in-flight set to
                // resolve, whichever that is, and reclaim its slot.
                match in_flight.join_next().await {
                    Some(Ok((n, outcome))) => {
                        self.observe(n, outcome, in_flight.len(), &mut summary);
                    }
                    Some(Err(err)) => {
                        // A request task only disappears by panicking; the
                        // slot is reclaimed either way.
                        warn!(error = %err, "in-flight request task did not complete");
                    }
                    // The set is non-empty at capacity, so join_next always
                    // yields here.
                    None => {}
                }
            }
        }

        match self.config.drain {
            DrainPolicy::AwaitAll => {
                let mut observed = 0usize;
                while let Some(joined) = in_flight.join_next().await {
                    match joined {
                        Ok((n, outcome)) => {
                            self.observe(n, outcome, in_flight.len(), &mut summary);
                            observed += 1;
                        }
                        Err(err) => {
                            warn!(error = %err, "in-flight request task did not complete");
                        }
                    }
                }
                debug!(observed, "in-flight set drained");
                self.config.event_listeners.emit(&DispatcherEvent::Drained {
                    name: self.config.name.clone(),
                    timestamp: Instant::now(),
                    observed,
                });
            }
            DrainPolicy::Abandon => {
                summary.abandoned = in_flight.len();
                if summary.abandoned > 0 {
                    warn!(
                        abandoned = summary.abandoned,
                        "returning with requests still in flight"
                    );
                }
                // Dropping the set aborts the remaining tasks.
            }
        }

        debug!(
            admitted = summary.admitted,
            passed = summary.passed,
            failed = summary.failed,
            abandoned = summary.abandoned,
            "dispatch loop finished"
        );
        Ok(summary)
    }

    fn observe(&self, seq: u64, outcome: Outcome, in_flight: usize, summary: &mut RunSummary) {
        if outcome.is_pass() {
            summary.passed += 1;
            #[cfg(feature = "metrics")]
            counter!("surge_requests_passed_total", "dispatcher" => self.config.name.clone())
                .increment(1);
        } else {
            summary.failed += 1;
            #[cfg(feature = "metrics")]
            counter!("surge_requests_failed_total", "dispatcher" => self.config.name.clone())
                .increment(1);
        }

        #[cfg(feature = "metrics")]
        gauge!("surge_requests_in_flight", "dispatcher" => self.config.name.clone())
            .set(in_flight as f64);

        debug!(seq, pass = outcome.is_pass(), in_flight, "request resolved");
        self.config.event_listeners.emit(&DispatcherEvent::Completed {
            name: self.config.name.clone(),
            timestamp: Instant::now(),
            seq,
            outcome,
            in_flight,
        });
    }
}
