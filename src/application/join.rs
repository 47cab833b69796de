//! Join coincidence rows with per-detector triggers and the template bank.
//!
//! For the selected event `n`, every detector that took part in the
//! coincidence contributes one [`RankedRow`]: its trigger is found through
//! `<ifo>/trigger_id`, its template through the trigger's `template_id`.
//! Detectors whose `<ifo>/time` holds the sentinel did not take part and
//! produce no row.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::statistic::ResolvedStatistic;
use crate::domain::{
    as_index, chirp_mass, reduced_chisq, time, ColumnTable, DetectorId, RankedRow, RowSchema,
};
use crate::error::{ReportError, ReportResult};

/// `<ifo>/time` value marking a detector that did not contribute.
pub const NOT_PARTICIPATING: f64 = -1.0;

/// One detector's involvement in the selected coincidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participation {
    pub detector: DetectorId,
    /// Coincidence end time, `None` when the detector did not take part.
    pub time: Option<f64>,
}

/// Per-detector participation for one event, in trigger-source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParticipationMask {
    entries: Vec<Participation>,
}

impl ParticipationMask {
    #[must_use]
    pub fn is_participating(&self, detector: &DetectorId) -> bool {
        self.entries
            .iter()
            .any(|p| &p.detector == detector && p.time.is_some())
    }

    /// Mean of the valid coincidence end times, `None` if there are none.
    #[must_use]
    pub fn mean_time(&self) -> Option<f64> {
        let times: Vec<f64> = self.entries.iter().filter_map(|p| p.time).collect();
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<f64>() / times.len() as f64)
        }
    }
}

/// Result of joining one event.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRows {
    pub schema: RowSchema,
    pub mask: ParticipationMask,
    pub rows: Vec<RankedRow>,
}

/// Joins per-detector records for one coincident event.
pub struct DetectorJoinEngine<'a> {
    coinc: &'a ColumnTable,
    triggers: &'a [(DetectorId, ColumnTable)],
    bank: &'a ColumnTable,
}

impl<'a> DetectorJoinEngine<'a> {
    /// `triggers` maps each detector to its trigger set; rows are emitted
    /// in this order.
    #[must_use]
    pub fn new(
        coinc: &'a ColumnTable,
        triggers: &'a [(DetectorId, ColumnTable)],
        bank: &'a ColumnTable,
    ) -> Self {
        Self {
            coinc,
            triggers,
            bank,
        }
    }

    /// Read a coincidence column at the event index.
    fn event_value(&self, field: &str, n: usize) -> ReportResult<f64> {
        self.coinc.value(field, n).map_err(|err| match err {
            ReportError::OutOfRange { index, len, .. } => ReportError::OutOfRange {
                what: "event index",
                index,
                len,
            },
            other => other,
        })
    }

    /// Which detectors took part in event `n`.
    pub fn participation(&self, n: usize) -> ReportResult<ParticipationMask> {
        let entries = self
            .triggers
            .iter()
            .map(|(ifo, _)| {
                let time = self.event_value(&ifo.time_column(), n)?;
                Ok(Participation {
                    detector: ifo.clone(),
                    time: (time != NOT_PARTICIPATING).then_some(time),
                })
            })
            .collect::<ReportResult<Vec<_>>>()?;
        Ok(ParticipationMask { entries })
    }

    /// Decide the optional columns once for the whole report.
    ///
    /// The first participating detector's trigger set decides; detectors
    /// after it that lack a chosen column get an empty cell.
    #[must_use]
    pub fn negotiate_schema(&self, mask: &ParticipationMask) -> RowSchema {
        self.triggers
            .iter()
            .find(|(ifo, _)| mask.is_participating(ifo))
            .map(|(ifo, triggers)| {
                let schema = RowSchema {
                    sg_chisq: triggers.contains("sg_chisq"),
                    psd_var_val: triggers.contains("psd_var_val"),
                };
                debug!(detector = %ifo, ?schema, "Negotiated optional columns");
                schema
            })
            .unwrap_or_default()
    }

    /// Build one row per participating detector for event `n`.
    pub fn join(&self, n: usize, statistic: &ResolvedStatistic) -> ReportResult<JoinedRows> {
        let mask = self.participation(n)?;
        let schema = self.negotiate_schema(&mask);

        let mut rows = Vec::new();
        for (ifo, triggers) in self.triggers {
            if !mask.is_participating(ifo) {
                debug!(detector = %ifo, index = n, "Detector did not participate");
                continue;
            }
            rows.push(self.join_detector(ifo, triggers, n, schema, statistic)?);
        }

        info!(index = n, rows = rows.len(), "Joined detector rows");
        Ok(JoinedRows { schema, mask, rows })
    }

    fn join_detector(
        &self,
        ifo: &DetectorId,
        triggers: &ColumnTable,
        n: usize,
        schema: RowSchema,
        statistic: &ResolvedStatistic,
    ) -> ReportResult<RankedRow> {
        let stored_id = self.event_value(&ifo.trigger_id_column(), n)?;
        let i = as_index(stored_id).ok_or_else(|| {
            ReportError::join(ifo, format!("invalid trigger id {stored_id} for event {n}"))
        })?;

        let count = triggers.len_of("end_time")?;
        if i >= count {
            return Err(ReportError::join(
                ifo,
                format!("trigger id {i} outside {count} triggers"),
            ));
        }
        let read = |field: &str| trigger_value(ifo, triggers, field, i);

        let end_time = read("end_time")?;
        let snr = read("snr")?;
        let chisq = read("chisq")?;
        let chisq_dof = read("chisq_dof")?;
        let coa_phase = read("coa_phase")?;

        let stored_tid = read("template_id")?;
        let tid = as_index(stored_tid)
            .ok_or_else(|| ReportError::join(ifo, format!("invalid template id {stored_tid}")))?;
        let bank_size = self.bank.len_of("mass1")?;
        if tid >= bank_size {
            return Err(ReportError::join(
                ifo,
                format!("template id {tid} not in bank of {bank_size} templates"),
            ));
        }
        let template = |field: &str| trigger_value(ifo, self.bank, field, tid);
        let mass1 = template("mass1")?;
        let mass2 = template("mass2")?;
        let spin1z = template("spin1z")?;
        let spin2z = template("spin2z")?;
        let template_duration = match triggers.optional_value("template_duration", i) {
            Ok(Some(duration)) => duration,
            Ok(None) => template("template_duration")?,
            Err(err) => return Err(as_join_error(ifo, err)),
        };

        let rchisq = reduced_chisq(chisq, chisq_dof);
        if rchisq.is_nan() {
            warn!(detector = %ifo, chisq_dof, "Reduced chi-square undefined for this DOF");
        }

        let utc_end_time = time::gps_to_utc(end_time).ok_or_else(|| {
            ReportError::join(ifo, format!("end time {end_time} is not a valid GPS time"))
        })?;

        let ranking = statistic.value_at(ifo, triggers, i)?;

        let optional = |wanted: bool, field: &str| -> ReportResult<Option<f64>> {
            if !wanted {
                return Ok(None);
            }
            let value = triggers
                .optional_value(field, i)
                .map_err(|err| as_join_error(ifo, err))?;
            if value.is_none() {
                debug!(detector = %ifo, field, "Optional column absent for this detector");
            }
            Ok(value)
        };

        Ok(RankedRow {
            detector: ifo.clone(),
            end_time,
            utc_end_time,
            ranking,
            snr,
            coa_phase,
            reduced_chisq: rchisq,
            chisq_dof,
            sg_chisq: optional(schema.sg_chisq, "sg_chisq")?,
            psd_var_val: optional(schema.psd_var_val, "psd_var_val")?,
            mass1,
            mass2,
            mchirp: chirp_mass(mass1, mass2),
            spin1z,
            spin2z,
            template_duration,
        })
    }
}

/// Indexes that fail on a secondary dataset mean the inputs disagree.
fn as_join_error(ifo: &DetectorId, err: ReportError) -> ReportError {
    match err {
        ReportError::OutOfRange { what, index, len } => {
            ReportError::join(ifo, format!("{what} {index} outside {len} entries"))
        }
        other => other,
    }
}

fn trigger_value(
    ifo: &DetectorId,
    table: &ColumnTable,
    field: &str,
    index: usize,
) -> ReportResult<f64> {
    table
        .value(field, index)
        .map_err(|err| as_join_error(ifo, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::statistic::{StatisticConfig, StatisticResolver};
    use crate::testkit::dataset::{bank, coinc_table, trigger_set, TriggerSpec};

    fn statistic() -> ResolvedStatistic {
        StatisticResolver::resolve(&StatisticConfig::default(), &[DetectorId::from("H1")]).unwrap()
    }

    fn inputs() -> (ColumnTable, Vec<(DetectorId, ColumnTable)>, ColumnTable) {
        let coinc = coinc_table(&[("H1", vec![-1.0, 100.0], vec![-1.0, 0.0]), (
            "L1",
            vec![1_126_259_462.4, 101.0],
            vec![1.0, 0.0],
        )]);
        let triggers = vec![
            (DetectorId::from("H1"), trigger_set(&[TriggerSpec::default()])),
            (
                DetectorId::from("L1"),
                trigger_set(&[
                    TriggerSpec::default(),
                    TriggerSpec {
                        end_time: 1_126_259_462.4,
                        chisq: 20.0,
                        chisq_dof: 11.0,
                        template_id: 1,
                        ..TriggerSpec::default()
                    },
                ]),
            ),
        ];
        (coinc, triggers, bank())
    }

    #[test]
    fn non_participating_detector_is_skipped() {
        let (coinc, triggers, bank) = inputs();
        let engine = DetectorJoinEngine::new(&coinc, &triggers, &bank);
        let joined = engine.join(0, &statistic()).unwrap();

        assert_eq!(joined.rows.len(), 1);
        let row = &joined.rows[0];
        assert_eq!(row.detector, DetectorId::from("L1"));
        assert_eq!(row.reduced_chisq, 1.0);
        assert_eq!(row.mass1, 30.0);
        assert_eq!(
            row.utc_end_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2015-09-14 09:50:45"
        );
        assert!(!joined.mask.is_participating(&DetectorId::from("H1")));
    }

    #[test]
    fn event_index_out_of_range() {
        let (coinc, triggers, bank) = inputs();
        let engine = DetectorJoinEngine::new(&coinc, &triggers, &bank);
        let err = engine.join(9, &statistic()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::OutOfRange {
                what: "event index",
                index: 9,
                ..
            }
        ));
    }

    #[test]
    fn unknown_template_is_join_error() {
        let (coinc, triggers, _) = inputs();
        let small_bank = ColumnTable::new("bank")
            .with_column("mass1", vec![1.4])
            .with_column("mass2", vec![1.4])
            .with_column("spin1z", vec![0.0])
            .with_column("spin2z", vec![0.0])
            .with_column("template_duration", vec![10.0]);
        let engine = DetectorJoinEngine::new(&coinc, &triggers, &small_bank);
        let err = engine.join(0, &statistic()).unwrap_err();
        assert!(matches!(err, ReportError::Join { detector, .. } if detector == "L1"));
    }

    #[test]
    fn missing_required_field_is_fatal() {
        let (coinc, mut triggers, bank) = inputs();
        let mut l1 = ColumnTable::new("L1 triggers");
        for field in triggers[1].1.fields().filter(|f| *f != "coa_phase") {
            l1.insert(field, triggers[1].1.column(field).unwrap().to_vec());
        }
        triggers[1].1 = l1;
        let engine = DetectorJoinEngine::new(&coinc, &triggers, &bank);
        let err = engine.join(0, &statistic()).unwrap_err();
        assert!(matches!(err, ReportError::MissingField { field, .. } if field == "coa_phase"));
    }

    #[test]
    fn schema_follows_first_participant() {
        let (coinc, mut triggers, bank) = inputs();
        let mut h1 = triggers[0].1.clone();
        h1.insert("sg_chisq", vec![1.0]);
        triggers[0].1 = h1;
        let engine = DetectorJoinEngine::new(&coinc, &triggers, &bank);

        // Event 1: both take part, H1 first and it has sg_chisq.
        let joined = engine.join(1, &statistic()).unwrap();
        assert!(joined.schema.sg_chisq);
        assert!(!joined.schema.psd_var_val);
        assert_eq!(joined.rows[0].sg_chisq, Some(1.0));
        assert_eq!(joined.rows[1].sg_chisq, None);

        // Event 0: only L1 takes part, and it has no sg_chisq.
        let joined = engine.join(0, &statistic()).unwrap();
        assert!(!joined.schema.sg_chisq);
    }

    #[test]
    fn mean_time_ignores_sentinels() {
        let (coinc, triggers, bank) = inputs();
        let engine = DetectorJoinEngine::new(&coinc, &triggers, &bank);
        assert_eq!(engine.participation(1).unwrap().mean_time(), Some(100.5));
        assert_eq!(
            engine.participation(0).unwrap().mean_time(),
            Some(1_126_259_462.4)
        );
    }
}
