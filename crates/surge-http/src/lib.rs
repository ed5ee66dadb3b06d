//! HTTP write client for the surge load generator.
//!
//! Implements the request-issuing side of a run: every sequence number
//! becomes one authenticated POST against a fixed resource path, with a
//! small JSON payload derived from the sequence number. Connection
//! pooling, TLS and per-request timeouts are delegated to reqwest.
//!
//! ```rust,no_run
//! use surge_http::{TargetConfig, WriteClient};
//!
//! # fn example() -> Result<(), surge_http::ClientError> {
//! let config = TargetConfig::builder()
//!     .base_url("https://gateway.example.com")
//!     .username("app")
//!     .password("s3cret")
//!     .resource("instances/abc123/set")
//!     .origin("wallet-1")
//!     .max_sockets(100)
//!     .build();
//!
//! let client = WriteClient::new(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::WriteClient;
pub use config::{TargetConfig, TargetConfigBuilder};
pub use error::ClientError;
