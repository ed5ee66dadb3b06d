//! Configuration for the bounded dispatcher.

use crate::error::ConfigError;
use crate::events::{DispatcherEvent, EventListeners, FnListener};
use crate::outcome::Outcome;

/// How the dispatcher treats work still in flight after the last admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainPolicy {
    /// Wait for every remaining request and observe its outcome before
    /// returning. The in-flight set is empty when the run completes.
    #[default]
    AwaitAll,
    /// Return as soon as the budget is admitted. Remaining requests are
    /// counted as abandoned and aborted; their outcomes are never observed.
    Abandon,
}

/// Configuration for a dispatcher run.
#[derive(Clone)]
pub struct DispatcherConfig {
    pub(crate) total_requests: u64,
    pub(crate) max_in_flight: usize,
    pub(crate) drain: DrainPolicy,
    pub(crate) name: String,
    pub(crate) event_listeners: EventListeners,
}

impl std::fmt::Debug for DispatcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatcherConfig")
            .field("total_requests", &self.total_requests)
            .field("max_in_flight", &self.max_in_flight)
            .field("drain", &self.drain)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl DispatcherConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> DispatcherConfigBuilder {
        DispatcherConfigBuilder::new()
    }

    /// Total number of requests issued over the run.
    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Maximum number of requests allowed in flight simultaneously.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// The configured drain policy.
    pub fn drain(&self) -> DrainPolicy {
        self.drain
    }

    /// Name of this dispatcher instance.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for dispatcher configuration.
pub struct DispatcherConfigBuilder {
    total_requests: u64,
    max_in_flight: usize,
    drain: DrainPolicy,
    name: String,
    event_listeners: EventListeners,
}

impl DispatcherConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            total_requests: 10_000,
            max_in_flight: 100,
            drain: DrainPolicy::default(),
            name: "dispatcher".to_string(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the total number of requests to issue.
    ///
    /// Default: 10000
    pub fn total_requests(mut self, total: u64) -> Self {
        self.total_requests = total;
        self
    }

    /// Sets the maximum number of requests in flight at once.
    ///
    /// Default: 100
    pub fn max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max;
        self
    }

    /// Sets the drain policy applied after the last admission.
    ///
    /// Default: [`DrainPolicy::AwaitAll`]
    pub fn drain(mut self, drain: DrainPolicy) -> Self {
        self.drain = drain;
        self
    }

    /// Sets the name of this dispatcher instance.
    ///
    /// Default: "dispatcher"
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked when a request is admitted.
    ///
    /// Called with the request's sequence number and the size of the
    /// in-flight set after admission.
    pub fn on_admitted<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let DispatcherEvent::Admitted { seq, in_flight, .. } = event {
                f(*seq, *in_flight);
            }
        }));
        self
    }

    /// Registers a callback invoked when a request's outcome is observed.
    ///
    /// Called with the request's sequence number and its outcome. This is
    /// where a caller prints the per-request report line.
    pub fn on_completed<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, &Outcome) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let DispatcherEvent::Completed { seq, outcome, .. } = event {
                f(*seq, outcome);
            }
        }));
        self
    }

    /// Registers a callback invoked when the drain phase finishes.
    ///
    /// Called with the number of outcomes observed during the drain.
    /// Never invoked under [`DrainPolicy::Abandon`].
    pub fn on_drained<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let DispatcherEvent::Drained { observed, .. } = event {
                f(*observed);
            }
        }));
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> Result<DispatcherConfig, ConfigError> {
        if self.total_requests == 0 {
            return Err(ConfigError::ZeroTotalRequests);
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::ZeroMaxInFlight);
        }
        Ok(DispatcherConfig {
            total_requests: self.total_requests,
            max_in_flight: self.max_in_flight,
            drain: self.drain,
            name: self.name,
            event_listeners: self.event_listeners,
        })
    }
}

impl Default for DispatcherConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
