//! A three-detector event written as JSON input files.
//!
//! The coincidence group holds three events. Ranked by descending `ifar`
//! the loudest is index 1, seen by H1 and L1 while V1 sat out. H1's
//! trigger set carries `sg_chisq` and L1's does not.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::domain::DetectorId;

/// Coincidence group name used by the fixture.
pub const COINC_GROUP: &str = "background_exc";

/// Index of the loudest event by descending `ifar`.
pub const LOUDEST_INDEX: usize = 1;

/// Paths of the written fixture files.
#[derive(Debug, Clone)]
pub struct FixturePaths {
    pub coinc: PathBuf,
    pub triggers: Vec<(DetectorId, PathBuf)>,
    pub bank: PathBuf,
}

impl FixturePaths {
    /// `IFO=PATH` arguments for `--single-trigger-files`.
    #[must_use]
    pub fn trigger_args(&self) -> Vec<String> {
        self.triggers
            .iter()
            .map(|(ifo, path)| format!("{ifo}={}", path.display()))
            .collect()
    }
}

pub fn coinc_json() -> Value {
    json!({
        COINC_GROUP: {
            "stat": [9.1, 24.6, 15.2],
            "ifar": [5.0, 120.0, 40.0],
            "fap": [0.2, 0.000123, 0.01],
            "ifar_exc": [4.0, 110.0, 35.0],
            "fap_exc": [0.25, 0.000135, 0.012],
            "H1": { "time": [1_126_259_400.0, 1_126_259_462.42, -1.0], "trigger_id": [0, 1, -1] },
            "L1": { "time": [-1.0, 1_126_259_462.41, 1_126_259_500.0], "trigger_id": [-1, 0, 1] },
            "V1": { "time": [1_126_259_400.0, -1.0, 1_126_259_500.0], "trigger_id": [0, -1, 0] }
        },
        "attrs": { "ifos": "H1 L1 V1" }
    })
}

pub fn trigger_json(ifo: &str) -> Value {
    match ifo {
        "H1" => json!({ "H1": {
            "end_time": [1_126_259_400.0, 1_126_259_462.42],
            "snr": [5.5, 19.7],
            "chisq": [12.0, 10.0],
            "chisq_dof": [6, 11],
            "coa_phase": [0.3, 2.1],
            "template_id": [0, 1],
            "sg_chisq": [1.0, 1.0]
        }}),
        "L1" => json!({ "L1": {
            "end_time": [1_126_259_462.41, 1_126_259_500.0],
            "snr": [13.3, 6.1],
            "chisq": [30.0, 8.0],
            "chisq_dof": [16, 6],
            "coa_phase": [-1.2, 0.4],
            "template_id": [1, 0]
        }}),
        _ => json!({ ifo: {
            "end_time": [1_126_259_400.0],
            "snr": [5.2],
            "chisq": [9.0],
            "chisq_dof": [6],
            "coa_phase": [0.0],
            "template_id": [0]
        }}),
    }
}

pub fn bank_json() -> Value {
    json!({
        "mass1": [1.4, 39.0],
        "mass2": [1.3, 32.0],
        "spin1z": [0.0, 0.3],
        "spin2z": [0.0, -0.2],
        "template_duration": [120.0, 0.3]
    })
}

/// Write the coincidence, H1/L1/V1 trigger and bank files into `dir`.
pub fn write_fixture(dir: &Path) -> io::Result<FixturePaths> {
    let write = |name: &str, value: &Value| -> io::Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, value.to_string())?;
        Ok(path)
    };

    let coinc = write("coinc.json", &coinc_json())?;
    let triggers = ["H1", "L1", "V1"]
        .into_iter()
        .map(|ifo| {
            let path = write(&format!("{ifo}-triggers.json"), &trigger_json(ifo))?;
            Ok((DetectorId::from(ifo), path))
        })
        .collect::<io::Result<Vec<_>>>()?;
    let bank = write("bank.json", &bank_json())?;

    Ok(FixturePaths {
        coinc,
        triggers,
        bank,
    })
}
