//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Loading the input datasets for a report
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
