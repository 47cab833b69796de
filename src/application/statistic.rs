//! Choose and apply the single-detector ranking statistic.
//!
//! Coincident statistic families combine several detectors and cannot be
//! evaluated for one trigger on its own. When one is configured the
//! resolver falls back to the pure single-detector family and reports the
//! substitution both as a `warn!` and in the returned value.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::ranking::{self, SnglRanking};
use crate::domain::{ColumnTable, DetectorId, TriggerRecord};
use crate::error::{ReportError, ReportResult};
use crate::port::SingleRanking;

/// Family that ranks each trigger on its own.
pub const SINGLE_RANKING_ONLY: &str = "single_ranking_only";

/// Coincident families known to need more than one detector.
const COMBINED_FAMILIES: [&str; 6] = [
    "quadsum",
    "phasetd",
    "exp_fit",
    "exp_fit_csnr",
    "phasetd_exp_fit",
    "2ogc",
];

/// Template parameters that may be copied into trigger files.
const TEMPLATE_PARAMETERS: [&str; 6] = ["mass1", "mass2", "spin1z", "spin2z", "f_lower", "mchirp"];

/// Top-level groups holding search bookkeeping rather than trigger values.
const METADATA_GROUPS: [&str; 2] = ["gating", "search"];

/// Ranking statistic configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatisticConfig {
    /// Statistic family, e.g. `single_ranking_only` or `phasetd`.
    pub ranking_statistic: String,
    /// Single-detector ranking, e.g. `newsnr`.
    pub sngl_ranking: String,
}

impl Default for StatisticConfig {
    fn default() -> Self {
        Self {
            ranking_statistic: SINGLE_RANKING_ONLY.to_string(),
            sngl_ranking: SnglRanking::default().id().to_string(),
        }
    }
}

/// Parsed statistic family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatisticFamily {
    SingleRankingOnly,
    Combined(String),
}

impl StatisticFamily {
    pub fn parse(name: &str) -> ReportResult<Self> {
        let name = name.trim();
        if name == SINGLE_RANKING_ONLY {
            Ok(Self::SingleRankingOnly)
        } else if COMBINED_FAMILIES.contains(&name) {
            Ok(Self::Combined(name.to_string()))
        } else {
            Err(ReportError::configuration(format!(
                "unknown ranking statistic '{name}'"
            )))
        }
    }
}

/// Record of a combined family being replaced by the single-detector one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticSubstitution {
    pub requested: String,
    pub used: String,
}

impl fmt::Display for StatisticSubstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ranking statistic '{}' cannot rank a single trigger, using '{}' instead",
            self.requested, self.used
        )
    }
}

/// A named single-detector ranking function.
#[derive(Debug, Clone, Copy)]
pub struct SnglRankingStatistic {
    kind: SnglRanking,
}

impl SnglRankingStatistic {
    #[must_use]
    pub const fn new(kind: SnglRanking) -> Self {
        Self { kind }
    }
}

impl SingleRanking for SnglRankingStatistic {
    fn name(&self) -> &str {
        self.kind.id()
    }

    fn single_detector_value(&self, record: &TriggerRecord) -> ReportResult<f64> {
        let snr = record.get("snr")?;
        let rchisq = || -> ReportResult<f64> {
            Ok(crate::domain::reduced_chisq(
                record.get("chisq")?,
                record.get("chisq_dof")?,
            ))
        };
        Ok(match self.kind {
            SnglRanking::Snr => snr,
            SnglRanking::Newsnr => ranking::newsnr(snr, rchisq()?),
            SnglRanking::NewsnrSgveto => {
                ranking::newsnr_sgveto(snr, rchisq()?, record.get("sg_chisq")?)
            }
            SnglRanking::NewsnrSgvetoPsdvar => ranking::newsnr_sgveto_psdvar(
                snr,
                rchisq()?,
                record.get("sg_chisq")?,
                record.get("psd_var_val")?,
            ),
        })
    }
}

/// The ranking capability chosen for one report.
pub struct ResolvedStatistic {
    ranking: Box<dyn SingleRanking>,
    display_name: String,
    substitution: Option<StatisticSubstitution>,
}

impl fmt::Debug for ResolvedStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedStatistic")
            .field("ranking", &self.ranking.name())
            .field("display_name", &self.display_name)
            .field("substitution", &self.substitution)
            .finish()
    }
}

impl ResolvedStatistic {
    /// Wrap an arbitrary ranking implementation.
    pub fn new(ranking: Box<dyn SingleRanking>) -> Self {
        let display_name = ranking::display_name(ranking.name()).to_string();
        Self {
            ranking,
            display_name,
            substitution: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.ranking.name()
    }

    /// Column label for the ranking value.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Set when a combined family was requested and replaced.
    #[must_use]
    pub fn substitution(&self) -> Option<&StatisticSubstitution> {
        self.substitution.as_ref()
    }

    /// Rank a prepared record.
    pub fn single_detector_value(&self, record: &TriggerRecord) -> ReportResult<f64> {
        self.ranking.single_detector_value(record)
    }

    /// Rank trigger `index` of a detector's trigger set.
    pub fn value_at(
        &self,
        detector: &DetectorId,
        triggers: &ColumnTable,
        index: usize,
    ) -> ReportResult<f64> {
        let record = trigger_record(detector, triggers, index)?;
        self.single_detector_value(&record)
    }
}

/// Whether a trigger-set column is part of the statistic's input contract.
#[must_use]
pub fn is_trigger_field(field: &str) -> bool {
    if let Some((group, _)) = field.split_once('/') {
        return !METADATA_GROUPS.contains(&group);
    }
    !(field == "template_boundaries"
        || field.starts_with("template_")
        || TEMPLATE_PARAMETERS.contains(&field))
}

/// Build the record for one trigger, keeping only trigger-native fields.
///
/// Columns whose length differs from `end_time` are per-template or
/// per-segment arrays rather than per-trigger values and are dropped.
pub fn trigger_record(
    detector: &DetectorId,
    triggers: &ColumnTable,
    index: usize,
) -> ReportResult<TriggerRecord> {
    let expected_len = triggers.len_of("end_time")?;
    if index >= expected_len {
        return Err(ReportError::join(
            detector,
            format!("trigger index {index} outside {expected_len} triggers"),
        ));
    }

    let mut record = TriggerRecord::new(detector.clone());
    for field in triggers.fields().filter(|f| is_trigger_field(f)) {
        let column = triggers.column(field)?;
        if column.len() != expected_len {
            debug!(detector = %detector, field, "Skipping column with non-trigger shape");
            continue;
        }
        record.insert(field, column[index]);
    }
    Ok(record)
}

/// Picks the ranking capability from configuration.
pub struct StatisticResolver;

impl StatisticResolver {
    /// Resolve the configured statistic for the given trigger sources.
    ///
    /// # Errors
    ///
    /// Configuration error for an unknown family or single-detector
    /// ranking, or when no detector supplies triggers.
    pub fn resolve(
        config: &StatisticConfig,
        detectors: &[DetectorId],
    ) -> ReportResult<ResolvedStatistic> {
        if detectors.is_empty() {
            return Err(ReportError::configuration(
                "no single-detector trigger sources given",
            ));
        }

        let family = StatisticFamily::parse(&config.ranking_statistic)?;
        let kind: SnglRanking = config.sngl_ranking.parse()?;

        let substitution = match family {
            StatisticFamily::SingleRankingOnly => None,
            StatisticFamily::Combined(requested) => {
                let substitution = StatisticSubstitution {
                    requested,
                    used: SINGLE_RANKING_ONLY.to_string(),
                };
                warn!(
                    requested = %substitution.requested,
                    used = %substitution.used,
                    "Combined ranking statistic not supported for single triggers"
                );
                Some(substitution)
            }
        };

        let mut resolved = ResolvedStatistic::new(Box::new(SnglRankingStatistic::new(kind)));
        resolved.substitution = substitution;
        info!(
            statistic = resolved.name(),
            detectors = detectors.len(),
            "Resolved single-detector ranking"
        );
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ifos() -> Vec<DetectorId> {
        vec![DetectorId::from("H1"), DetectorId::from("L1")]
    }

    fn config(family: &str, sngl: &str) -> StatisticConfig {
        StatisticConfig {
            ranking_statistic: family.into(),
            sngl_ranking: sngl.into(),
        }
    }

    fn record() -> TriggerRecord {
        TriggerRecord::new(DetectorId::from("H1"))
            .with_field("snr", 10.0)
            .with_field("chisq", 36.0)
            .with_field("chisq_dof", 10.0)
    }

    #[test]
    fn single_ranking_only_has_no_substitution() {
        let resolved = StatisticResolver::resolve(&StatisticConfig::default(), &ifos()).unwrap();
        assert!(resolved.substitution().is_none());
        assert_eq!(resolved.name(), "newsnr");
        assert_eq!(resolved.display_name(), "Reweighted SNR");
    }

    #[test]
    fn combined_family_substitutes_with_same_value() {
        let single = StatisticResolver::resolve(&config("single_ranking_only", "newsnr"), &ifos())
            .unwrap();
        let combined = StatisticResolver::resolve(&config("phasetd", "newsnr"), &ifos()).unwrap();

        let substitution = combined.substitution().unwrap();
        assert_eq!(substitution.requested, "phasetd");
        assert_eq!(substitution.used, SINGLE_RANKING_ONLY);
        assert_eq!(
            single.single_detector_value(&record()).unwrap(),
            combined.single_detector_value(&record()).unwrap()
        );
    }

    #[test]
    fn unknown_family_is_configuration_error() {
        let err = StatisticResolver::resolve(&config("mystery", "newsnr"), &ifos()).unwrap_err();
        assert!(matches!(err, ReportError::Configuration { .. }));
    }

    #[test]
    fn no_detectors_is_configuration_error() {
        let err = StatisticResolver::resolve(&StatisticConfig::default(), &[]).unwrap_err();
        assert!(matches!(err, ReportError::Configuration { .. }));
    }

    #[test]
    fn newsnr_value_uses_reduced_chisq() {
        let stat = SnglRankingStatistic::new(SnglRanking::Newsnr);
        // rchisq = 36 / 18 = 2
        let expected = ranking::newsnr(10.0, 2.0);
        assert_eq!(stat.single_detector_value(&record()).unwrap(), expected);
    }

    #[test]
    fn snr_ranking_needs_only_snr() {
        let stat = SnglRankingStatistic::new(SnglRanking::Snr);
        let record = TriggerRecord::new(DetectorId::from("L1")).with_field("snr", 7.5);
        assert_eq!(stat.single_detector_value(&record).unwrap(), 7.5);
    }

    #[test]
    fn sgveto_requires_sg_chisq() {
        let stat = SnglRankingStatistic::new(SnglRanking::NewsnrSgveto);
        let err = stat.single_detector_value(&record()).unwrap_err();
        assert!(matches!(err, ReportError::MissingField { field, .. } if field == "sg_chisq"));
    }

    #[test]
    fn auxiliary_fields_are_excluded() {
        assert!(is_trigger_field("snr"));
        assert!(is_trigger_field("sg_chisq"));
        assert!(!is_trigger_field("template_id"));
        assert!(!is_trigger_field("template_duration"));
        assert!(!is_trigger_field("template_boundaries"));
        assert!(!is_trigger_field("mass1"));
        assert!(!is_trigger_field("gating/auto/time"));
        assert!(!is_trigger_field("search/start_time"));
    }

    #[test]
    fn trigger_record_drops_misshapen_columns() {
        let triggers = ColumnTable::new("H1 triggers")
            .with_column("end_time", vec![100.0, 200.0])
            .with_column("snr", vec![8.0, 9.0])
            .with_column("template_id", vec![0.0, 1.0])
            .with_column("psd_epochs", vec![1.0, 2.0, 3.0]);
        let ifo = DetectorId::from("H1");
        let record = trigger_record(&ifo, &triggers, 1).unwrap();
        assert_eq!(record.get("snr").unwrap(), 9.0);
        assert!(!record.contains("template_id"));
        assert!(!record.contains("psd_epochs"));

        let err = trigger_record(&ifo, &triggers, 2).unwrap_err();
        assert!(matches!(err, ReportError::Join { .. }));
    }
}
