//! Coincinfo - single-event reports for compact binary coalescence searches.
//!
//! Given a coincidence statistic file, one trigger file per detector and a
//! template bank, the crate picks one coincident event (by rank or by
//! index) and produces two tables: a summary of the coincidence and one
//! row per participating detector.
//!
//! # Architecture
//!
//! - **`domain`** - Column tables, detector ids, event queries, ranking
//!   functions, chirp mass and GPS time conversion
//! - **`port`** - Traits at the seams: dataset loading and single-detector
//!   ranking
//! - **`application`** - Event selection, statistic resolution, the
//!   detector join and table formatting
//! - **`adapter`** - JSON dataset reader and the command-line interface
//! - **`infrastructure`** - Configuration and input bootstrapping
//!
//! # Example
//!
//! ```no_run
//! use coincinfo::adapter::outbound::json::JsonDatasetSource;
//! use coincinfo::application::{build_report, ReportRequest};
//! use coincinfo::domain::{EventQuery, SortOrder};
//! use coincinfo::infrastructure::bootstrap::{load_inputs, InputPaths};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let paths = InputPaths {
//!         coinc: "coinc.json".into(),
//!         coinc_group: "background_exc".into(),
//!         triggers: vec![("H1".into(), "H1-triggers.json".into())],
//!         bank: "bank.json".into(),
//!     };
//!     let inputs = load_inputs(&JsonDatasetSource::new(), &paths)?;
//!     let query = EventQuery::Rank {
//!         rank: 0,
//!         sort_key: "ifar".into(),
//!         order: SortOrder::Descending,
//!     };
//!     let report = build_report(&inputs, &ReportRequest::new(query))?;
//!     println!("{}", report.title);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
