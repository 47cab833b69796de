//! Builders for column tables used across tests.
//!
//! Column values are chosen so tests can predict every derived number:
//! event `i` has `stat = 12 + i`, `ifar = 100 * (i + 1)` and
//! `fap = 1e-3 / (i + 1)`.

use crate::domain::ColumnTable;

/// One detector's trigger for [`trigger_set`].
#[derive(Debug, Clone)]
pub struct TriggerSpec {
    pub end_time: f64,
    pub snr: f64,
    pub chisq: f64,
    pub chisq_dof: f64,
    pub coa_phase: f64,
    pub template_id: usize,
}

impl Default for TriggerSpec {
    fn default() -> Self {
        Self {
            end_time: 1_126_259_462.0,
            snr: 8.0,
            chisq: 10.0,
            chisq_dof: 6.0,
            coa_phase: 1.0,
            template_id: 0,
        }
    }
}

/// Coincidence table from `(ifo, times, trigger_ids)` entries.
///
/// All entries must have the same number of events; the summary columns
/// get that many rows.
pub fn coinc_table(detectors: &[(&str, Vec<f64>, Vec<f64>)]) -> ColumnTable {
    let events = detectors.first().map_or(0, |(_, times, _)| times.len());
    let mut table = ColumnTable::new("coinc")
        .with_column("stat", (0..events).map(|i| 12.0 + i as f64).collect())
        .with_column("ifar", (0..events).map(|i| 100.0 * (i + 1) as f64).collect())
        .with_column("fap", (0..events).map(|i| 1e-3 / (i + 1) as f64).collect())
        .with_column("ifar_exc", (0..events).map(|i| 50.0 * (i + 1) as f64).collect())
        .with_column("fap_exc", (0..events).map(|i| 2e-3 / (i + 1) as f64).collect());
    for (ifo, times, ids) in detectors {
        table.insert(format!("{ifo}/time"), times.clone());
        table.insert(format!("{ifo}/trigger_id"), ids.clone());
    }
    table
}

/// Trigger set with one row per [`TriggerSpec`].
pub fn trigger_set(specs: &[TriggerSpec]) -> ColumnTable {
    let column = |f: fn(&TriggerSpec) -> f64| specs.iter().map(f).collect::<Vec<_>>();
    ColumnTable::new("triggers")
        .with_column("end_time", column(|s| s.end_time))
        .with_column("snr", column(|s| s.snr))
        .with_column("chisq", column(|s| s.chisq))
        .with_column("chisq_dof", column(|s| s.chisq_dof))
        .with_column("coa_phase", column(|s| s.coa_phase))
        .with_column("template_id", column(|s| s.template_id as f64))
}

/// Two templates: a binary neutron star and a heavy binary black hole.
pub fn bank() -> ColumnTable {
    ColumnTable::new("bank")
        .with_column("mass1", vec![1.4, 30.0])
        .with_column("mass2", vec![1.4, 25.0])
        .with_column("spin1z", vec![0.0, 0.5])
        .with_column("spin2z", vec![0.0, -0.3])
        .with_column("template_duration", vec![150.0, 0.5])
}
