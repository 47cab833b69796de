//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`DatasetSource`] - Loading columnar input datasets
//! - [`SingleRanking`] - Single-detector ranking statistic

pub mod outbound;

pub use outbound::dataset::DatasetSource;
pub use outbound::ranking::SingleRanking;
