//! Single-detector ranking statistic port.

use crate::domain::TriggerRecord;
use crate::error::ReportResult;

/// Maps one trigger to a scalar single-detector ranking value.
///
/// Implementations are selected by configuration through the statistic
/// resolver. They receive only trigger-native fields.
pub trait SingleRanking: Send + Sync {
    /// Statistic identifier, used for the column label.
    fn name(&self) -> &str;

    /// Rank a single trigger.
    ///
    /// # Errors
    ///
    /// Returns a missing-field error if the record lacks an input the
    /// statistic needs.
    fn single_detector_value(&self, record: &TriggerRecord) -> ReportResult<f64>;
}
