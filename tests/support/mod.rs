#![allow(dead_code)]

pub mod memory;

use coincinfo::application::ReportInputs;
use coincinfo::infrastructure::bootstrap::{load_inputs, InputPaths};
use coincinfo::testkit::fixture::{bank_json, coinc_json, trigger_json, COINC_GROUP};

use memory::MemorySource;

/// Fixture inputs for the given detectors, loaded through the dataset port.
pub fn fixture_inputs(detectors: &[&str]) -> ReportInputs {
    let mut source = MemorySource::default();
    source.add("coinc.json", coinc_json());
    source.add("bank.json", bank_json());
    for ifo in detectors {
        source.add(&format!("{ifo}.json"), trigger_json(ifo));
    }

    let paths = InputPaths {
        coinc: "coinc.json".into(),
        coinc_group: COINC_GROUP.to_string(),
        triggers: detectors
            .iter()
            .map(|ifo| ((*ifo).into(), format!("{ifo}.json").into()))
            .collect(),
        bank: "bank.json".into(),
    };
    load_inputs(&source, &paths).expect("fixture inputs load")
}
