//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the input storage and the pluggable
//! single-detector statistic.

pub mod dataset;
pub mod ranking;
