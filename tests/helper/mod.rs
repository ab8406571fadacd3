//! Shared test utilities

pub mod fixtures;

pub use fixtures::*;
