//! Detector-agnostic domain logic.

mod column;
mod id;
mod mass;
mod record;
mod selection;

pub mod ranking;
pub mod time;

pub use column::{as_index, ColumnTable};
pub use id::DetectorId;
pub use mass::{chirp_mass, mass1_mass2_to_mchirp_eta};
pub use record::{reduced_chisq, RankedRow, RowSchema, TriggerRecord};
pub use selection::{EventQuery, SelectedEvent, SortOrder};
