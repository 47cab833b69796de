//! Application services (use cases).
//!
//! These services orchestrate domain logic to select an event, rank its
//! triggers, join them across datasets and format the result.

pub mod format;
pub mod join;
pub mod report;
pub mod selector;
pub mod statistic;

pub use format::{Cell, DisplayTable, LinkOptions, RecordFormatter};
pub use join::{DetectorJoinEngine, JoinedRows, ParticipationMask};
pub use report::{build_report, EventReport, ReportInputs, ReportRequest};
pub use selector::EventSelector;
pub use statistic::{ResolvedStatistic, StatisticConfig, StatisticResolver};
