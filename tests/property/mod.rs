//! Property-based tests for the bounded dispatcher.

pub mod dispatcher;
