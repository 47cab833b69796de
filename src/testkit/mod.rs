//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`dataset`] - Builders for in-memory coincidence, trigger and bank
//!   tables.
//! - [`fixture`] - A three-detector event written as JSON input files.

pub mod dataset;
pub mod fixture;
