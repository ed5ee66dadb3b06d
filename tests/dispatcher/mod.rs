//! Comprehensive tests for the bounded dispatcher.
//!
//! Test organization:
//! - admission.rs: budget accounting and admission-time failures
//! - capacity.rs: concurrency ceiling enforcement
//! - scenarios.rs: fixed end-to-end scenarios (all-fail, wide ceiling, ordering)
//! - drain.rs: drain policy behavior after the last admission

mod capacity;
