//! Per-trigger records handed to ranking statistics, and joined output rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::DetectorId;
use crate::error::{ReportError, ReportResult};

/// One single-detector trigger as a field name to value mapping.
///
/// Only trigger-native fields are present; template parameters and
/// bookkeeping columns are filtered out before construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerRecord {
    detector: Option<DetectorId>,
    fields: BTreeMap<String, f64>,
}

impl TriggerRecord {
    pub fn new(detector: DetectorId) -> Self {
        Self {
            detector: Some(detector),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: f64) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: f64) {
        self.fields.insert(field.into(), value);
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Required field lookup.
    pub fn get(&self, field: &str) -> ReportResult<f64> {
        self.fields.get(field).copied().ok_or_else(|| {
            let dataset = self
                .detector
                .as_ref()
                .map_or_else(|| "trigger record".to_string(), |d| format!("{d} trigger"));
            ReportError::missing_field(dataset, field)
        })
    }
}

/// Which optional trigger columns the per-detector table carries.
///
/// Negotiated once per report so every row has the same shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowSchema {
    pub sg_chisq: bool,
    pub psd_var_val: bool,
}

/// The joined per-detector output record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub detector: DetectorId,
    pub end_time: f64,
    pub utc_end_time: DateTime<Utc>,
    pub ranking: f64,
    pub snr: f64,
    pub coa_phase: f64,
    pub reduced_chisq: f64,
    pub chisq_dof: f64,
    pub sg_chisq: Option<f64>,
    pub psd_var_val: Option<f64>,
    pub mass1: f64,
    pub mass2: f64,
    pub mchirp: f64,
    pub spin1z: f64,
    pub spin2z: f64,
    pub template_duration: f64,
}

/// Reduced chi-square `chisq / (2 dof - 2)`.
///
/// The denominator is not positive for `dof <= 1`; those inputs yield NaN
/// rather than an infinity or a sign-flipped value.
#[must_use]
pub fn reduced_chisq(chisq: f64, chisq_dof: f64) -> f64 {
    let denominator = 2.0 * chisq_dof - 2.0;
    if denominator > 0.0 {
        chisq / denominator
    } else {
        f64::NAN
    }
}
