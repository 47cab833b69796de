//! Infrastructure configuration modules.

pub mod links;
pub mod logging;
pub mod report;
pub mod settings;
