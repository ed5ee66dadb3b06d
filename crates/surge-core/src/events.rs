//! Event system for dispatcher observability.
//!
//! Listeners are registered through the configuration builder and are
//! invoked synchronously from the dispatch loop. A panicking listener is
//! isolated so the remaining listeners still run.

use crate::outcome::Outcome;
use std::sync::Arc;
use std::time::Instant;

/// Events emitted by a dispatcher run.
#[derive(Debug, Clone)]
pub enum DispatcherEvent {
    /// A request was admitted into the in-flight set.
    Admitted {
        /// Name of the dispatcher instance.
        name: String,
        /// When the admission happened.
        timestamp: Instant,
        /// Sequence number assigned to the request.
        seq: u64,
        /// Size of the in-flight set after admission.
        in_flight: usize,
    },
    /// A request's outcome was observed and its slot reclaimed.
    Completed {
        /// Name of the dispatcher instance.
        name: String,
        /// When the outcome was observed.
        timestamp: Instant,
        /// Sequence number of the resolved request.
        seq: u64,
        /// The observed outcome.
        outcome: Outcome,
        /// Size of the in-flight set after removal.
        in_flight: usize,
    },
    /// The drain phase finished and the in-flight set is empty.
    Drained {
        /// Name of the dispatcher instance.
        name: String,
        /// When the drain finished.
        timestamp: Instant,
        /// Outcomes observed during the drain phase.
        observed: usize,
    },
}

impl DispatcherEvent {
    /// Returns the type of event ("admitted", "completed", "drained").
    pub fn event_type(&self) -> &'static str {
        match self {
            DispatcherEvent::Admitted { .. } => "admitted",
            DispatcherEvent::Completed { .. } => "completed",
            DispatcherEvent::Drained { .. } => "drained",
        }
    }

    /// Returns when this event occurred.
    pub fn timestamp(&self) -> Instant {
        match self {
            DispatcherEvent::Admitted { timestamp, .. }
            | DispatcherEvent::Completed { timestamp, .. }
            | DispatcherEvent::Drained { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the name of the dispatcher instance that emitted this event.
    pub fn name(&self) -> &str {
        match self {
            DispatcherEvent::Admitted { name, .. }
            | DispatcherEvent::Completed { name, .. }
            | DispatcherEvent::Drained { name, .. } => name,
        }
    }
}

/// Trait for listening to dispatcher events.
pub trait EventListener: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: &DispatcherEvent);
}

/// Type alias for boxed event listeners.
pub type BoxedEventListener = Arc<dyn EventListener>;

/// A collection of event listeners.
#[derive(Clone, Default)]
pub struct EventListeners {
    listeners: Vec<BoxedEventListener>,
}

impl EventListeners {
    /// Creates a new empty event listener collection.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener to the collection.
    pub fn add<L>(&mut self, listener: L)
    where
        L: EventListener + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Emits an event to all registered listeners.
    ///
    /// If a listener panics, the panic is caught and the remaining
    /// listeners are still called.
    pub fn emit(&self, event: &DispatcherEvent) {
        for listener in &self.listeners {
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener.on_event(event);
            }));
        }
    }

    /// Returns true if there are no listeners.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns the number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

/// A simple function-based event listener.
pub struct FnListener<F>
where
    F: Fn(&DispatcherEvent) + Send + Sync,
{
    f: F,
}

impl<F> FnListener<F>
where
    F: Fn(&DispatcherEvent) + Send + Sync,
{
    /// Creates a new function-based listener.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventListener for FnListener<F>
where
    F: Fn(&DispatcherEvent) + Send + Sync,
{
    fn on_event(&self, event: &DispatcherEvent) {
        (self.f)(event)
    }
}
