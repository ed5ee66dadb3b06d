//! Bounded-concurrency request dispatcher.
//!
//! The dispatcher issues a fixed budget of requests through a
//! [`RequestIssuer`] while never holding more than a configured ceiling
//! of them unresolved at once. Admission is fire-and-forget: each issued
//! request runs as its own task, and the dispatch loop suspends only
//! when the in-flight set is at capacity, resuming as soon as any one
//! request resolves.
//!
//! # Basic Example
//!
//! ```rust,no_run
//! use futures::FutureExt;
//! use surge_core::{issuer_fn, Dispatcher, DispatcherConfig, Outcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DispatcherConfig::builder()
//!     .total_requests(1000)
//!     .max_in_flight(50)
//!     .name("example")
//!     .build()?;
//!
//! let issuer = issuer_fn(|_seq| {
//!     Ok(async move { Outcome::Pass { status: 202 } }.boxed())
//! });
//!
//! let summary = Dispatcher::new(config).run(&issuer).await?;
//! assert_eq!(summary.admitted, 1000);
//! # Ok(())
//! # }
//! ```
//!
//! # Observing Outcomes
//!
//! The dispatch loop itself never prints. Outcomes are observed through
//! event listeners registered on the configuration; the per-request
//! report line lives on [`Report`]:
//!
//! ```rust,no_run
//! use surge_core::{DispatcherConfig, Report};
//!
//! # fn example() -> Result<(), surge_core::ConfigError> {
//! let config = DispatcherConfig::builder()
//!     .total_requests(100)
//!     .max_in_flight(10)
//!     .on_completed(|seq, outcome| {
//!         println!("{}", Report { seq, outcome: outcome.clone() });
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod issuer;
pub mod outcome;

pub use config::{DispatcherConfig, DispatcherConfigBuilder, DrainPolicy};
pub use dispatcher::Dispatcher;
pub use error::{BoxError, ConfigError, DispatchError};
pub use events::{DispatcherEvent, EventListener, EventListeners, FnListener};
pub use issuer::{issuer_fn, IssuerFn, OutcomeFuture, RequestIssuer};
pub use outcome::{Outcome, Report, RunSummary};
