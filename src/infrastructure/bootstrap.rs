//! Infrastructure bootstrap helpers: load every input dataset once.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::info;

use crate::application::ReportInputs;
use crate::domain::{ColumnTable, DetectorId};
use crate::error::{ReportError, Result};
use crate::port::DatasetSource;

/// Where the input datasets live.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub coinc: PathBuf,
    /// Group of the coincidence file holding the events.
    pub coinc_group: String,
    /// Trigger file per detector, in report order.
    pub triggers: Vec<(DetectorId, PathBuf)>,
    pub bank: PathBuf,
}

/// Read all inputs through `source` and narrow them to the needed groups.
///
/// Each trigger file must hold a group named after its detector, and each
/// detector may be given only once.
pub fn load_inputs(source: &dyn DatasetSource, paths: &InputPaths) -> Result<ReportInputs> {
    let mut seen = BTreeSet::new();
    for (ifo, _) in &paths.triggers {
        if !seen.insert(ifo.as_str()) {
            return Err(ReportError::configuration(format!(
                "trigger file given more than once for detector {ifo}"
            ))
            .into());
        }
    }

    let coinc_file = source.load(&paths.coinc)?;
    let coinc = required_group(&coinc_file, &paths.coinc_group)?;

    let triggers = paths
        .triggers
        .iter()
        .map(|(ifo, path)| {
            let file = source.load(path)?;
            Ok((ifo.clone(), required_group(&file, ifo.as_str())?))
        })
        .collect::<Result<Vec<_>>>()?;

    let bank = source.load(&paths.bank)?;

    info!(
        group = %paths.coinc_group,
        detectors = triggers.len(),
        "Loaded report inputs"
    );
    Ok(ReportInputs {
        coinc,
        triggers,
        bank,
    })
}

fn required_group(file: &ColumnTable, group: &str) -> Result<ColumnTable> {
    let table = file.group(group);
    if table.is_empty() {
        return Err(ReportError::MissingField {
            dataset: file.name().to_string(),
            field: group.to_string(),
        }
        .into());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use super::*;
    use crate::error::Error;

    struct MemorySource(HashMap<PathBuf, ColumnTable>);

    impl DatasetSource for MemorySource {
        fn load(&self, path: &Path) -> Result<ColumnTable> {
            self.0.get(path).cloned().ok_or_else(|| Error::Dataset {
                path: path.display().to_string(),
                reason: "not found".into(),
            })
        }
    }

    fn source() -> MemorySource {
        let coinc = ColumnTable::new("coinc.json")
            .with_column("foreground/ifar", vec![1.0])
            .with_column("foreground/H1/time", vec![100.0]);
        let h1 = ColumnTable::new("h1.json").with_column("H1/snr", vec![8.0]);
        let bank = ColumnTable::new("bank.json").with_column("mass1", vec![1.4]);
        MemorySource(HashMap::from([
            (PathBuf::from("coinc.json"), coinc),
            (PathBuf::from("h1.json"), h1),
            (PathBuf::from("bank.json"), bank),
        ]))
    }

    fn paths(group: &str) -> InputPaths {
        InputPaths {
            coinc: "coinc.json".into(),
            coinc_group: group.into(),
            triggers: vec![(DetectorId::from("H1"), "h1.json".into())],
            bank: "bank.json".into(),
        }
    }

    #[test]
    fn narrows_to_groups() {
        let inputs = load_inputs(&source(), &paths("foreground")).unwrap();
        assert!(inputs.coinc.contains("ifar"));
        assert!(inputs.coinc.contains("H1/time"));
        assert!(inputs.triggers[0].1.contains("snr"));
        assert!(inputs.bank.contains("mass1"));
    }

    #[test]
    fn repeated_detector_is_rejected() {
        let mut paths = paths("foreground");
        paths
            .triggers
            .push((DetectorId::from("H1"), "h1.json".into()));
        let err = load_inputs(&source(), &paths).unwrap_err();
        assert!(matches!(
            err,
            Error::Report(ReportError::Configuration { reason }) if reason.contains("H1")
        ));
    }

    #[test]
    fn missing_group_is_reported() {
        let err = load_inputs(&source(), &paths("background_exc")).unwrap_err();
        assert!(matches!(
            err,
            Error::Report(ReportError::MissingField { field, .. }) if field == "background_exc"
        ));
    }
}
