//! Turn joined rows and coincidence fields into display tables.
//!
//! Column order is fixed so every report has the same layout. Rendering
//! (HTML, terminal, column capping) happens elsewhere; this module only
//! produces headers and formatted cells.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::join::{JoinedRows, ParticipationMask};
use crate::domain::{ColumnTable, RankedRow};
use crate::error::ReportResult;

/// Placeholder for an optional value a detector does not provide.
const ABSENT: &str = "-";

/// Coincidence summary columns: field, header, format.
const SUMMARY_COLUMNS: [(&str, &str, NumberFormat); 5] = [
    ("stat", "Coincident ranking statistic", NumberFormat::Fixed),
    ("ifar", "Inclusive IFAR (yr)", NumberFormat::Fixed),
    ("fap", "Inclusive FAP", NumberFormat::Scientific),
    ("ifar_exc", "Exclusive IFAR (yr)", NumberFormat::Fixed),
    ("fap_exc", "Exclusive FAP", NumberFormat::Scientific),
];

/// Display precision classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Two decimals: statistics and physical parameters.
    Fixed,
    /// Two-decimal mantissa with a signed two-digit exponent.
    Scientific,
    /// No decimals.
    Count,
    /// Three decimals, for GPS times.
    Time,
}

impl NumberFormat {
    #[must_use]
    pub fn apply(self, value: f64) -> String {
        match self {
            Self::Fixed => format!("{value:.2}"),
            Self::Scientific => scientific(value),
            Self::Count => format!("{value:.0}"),
            Self::Time => format!("{value:.3}"),
        }
    }
}

/// `%.2e` style: `0.000123` becomes `1.23e-04`.
#[must_use]
pub fn scientific(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{value:.2e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

/// A formatted table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Link { label: String, url: String },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Link { label, url } => write!(f, "{label} <{url}>"),
        }
    }
}

/// Headers, rows and optional row labels, ready for a renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_labels: Option<Vec<String>>,
}

impl DisplayTable {
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Keep only the first `max` columns.
    #[must_use]
    pub fn truncated(&self, max: usize) -> DisplayTable {
        DisplayTable {
            headers: self.headers.iter().take(max).cloned().collect(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().take(max).cloned().collect())
                .collect(),
            row_labels: self.row_labels.clone(),
        }
    }
}

/// Per-detector link to the detector-status summary page.
///
/// `{date}` expands to the UTC date of the trigger (`YYYYMMDD`) and
/// `{ifo}` to the detector id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorStatusLink {
    pub template: String,
}

impl DetectorStatusLink {
    fn cell(&self, row: &RankedRow) -> Cell {
        let url = self
            .template
            .replace("{date}", &row.utc_end_time.format("%Y%m%d").to_string())
            .replace("{ifo}", row.detector.as_str());
        Cell::Link {
            label: "Summary page".to_string(),
            url,
        }
    }
}

/// Event-search link centred on the mean detector end time.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchLink {
    pub base: Url,
    /// Half-width of the searched time range in seconds.
    pub window: f64,
}

impl SearchLink {
    fn cell(&self, center: f64) -> Cell {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair(
                "query",
                &format!(
                    "gpstime: {:.3} .. {:.3}",
                    center - self.window,
                    center + self.window
                ),
            )
            .append_pair("query_type", "E");
        Cell::Link {
            label: "Search".to_string(),
            url: url.to_string(),
        }
    }
}

/// Opt-in link columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkOptions {
    pub detector_status: Option<DetectorStatusLink>,
    pub search: Option<SearchLink>,
}

/// Formats the coincidence summary and the per-detector rows.
#[derive(Debug, Clone, Default)]
pub struct RecordFormatter {
    links: LinkOptions,
}

impl RecordFormatter {
    #[must_use]
    pub fn new(links: LinkOptions) -> Self {
        Self { links }
    }

    /// One-row summary of the coincident event.
    ///
    /// Columns missing from the coincidence table are left out. The search
    /// link is appended only when requested and at least one detector has
    /// a valid end time.
    pub fn summary_table(
        &self,
        coinc: &ColumnTable,
        n: usize,
        mask: &ParticipationMask,
    ) -> ReportResult<DisplayTable> {
        let mut headers = Vec::new();
        let mut cells = Vec::new();
        for (field, header, format) in SUMMARY_COLUMNS {
            if !coinc.contains(field) {
                debug!(field, "Summary column absent from coincidence table");
                continue;
            }
            headers.push(header.to_string());
            cells.push(Cell::text(format.apply(coinc.value(field, n)?)));
        }

        if let Some(search) = &self.links.search {
            match mask.mean_time() {
                Some(center) => {
                    headers.push("Search".to_string());
                    cells.push(search.cell(center));
                }
                None => warn!(index = n, "No valid detector end time, omitting search link"),
            }
        }

        Ok(DisplayTable {
            headers,
            rows: vec![cells],
            row_labels: None,
        })
    }

    /// One row per participating detector, labelled by detector id.
    #[must_use]
    pub fn detector_table(&self, joined: &JoinedRows, statistic_label: &str) -> DisplayTable {
        let schema = joined.schema;
        let mut headers = Vec::new();
        if self.links.detector_status.is_some() {
            headers.push("Detector status");
        }
        headers.extend([
            "UTC End Time",
            "GPS End Time",
            statistic_label,
            "SNR",
            "Phase",
            "Reduced χ²",
            "χ² DOF",
        ]);
        if schema.sg_chisq {
            headers.push("sg χ²");
        }
        if schema.psd_var_val {
            headers.push("PSD variation");
        }
        headers.extend(["m1", "m2", "Mc", "s1z", "s2z", "Duration"]);

        let rows = joined
            .rows
            .iter()
            .map(|row| {
                let fixed = |value: f64| Cell::text(NumberFormat::Fixed.apply(value));
                let optional = |value: Option<f64>| {
                    value.map_or_else(|| Cell::text(ABSENT), |v| fixed(v))
                };

                let mut cells = Vec::with_capacity(headers.len());
                if let Some(status) = &self.links.detector_status {
                    cells.push(status.cell(row));
                }
                cells.push(Cell::text(
                    row.utc_end_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                ));
                cells.push(Cell::text(NumberFormat::Time.apply(row.end_time)));
                cells.push(fixed(row.ranking));
                cells.push(fixed(row.snr));
                cells.push(fixed(row.coa_phase));
                cells.push(fixed(row.reduced_chisq));
                cells.push(Cell::text(NumberFormat::Count.apply(row.chisq_dof)));
                if schema.sg_chisq {
                    cells.push(optional(row.sg_chisq));
                }
                if schema.psd_var_val {
                    cells.push(optional(row.psd_var_val));
                }
                cells.push(fixed(row.mass1));
                cells.push(fixed(row.mass2));
                cells.push(fixed(row.mchirp));
                cells.push(fixed(row.spin1z));
                cells.push(fixed(row.spin2z));
                cells.push(fixed(row.template_duration));
                cells
            })
            .collect();

        DisplayTable {
            headers: headers.into_iter().map(str::to_string).collect(),
            rows,
            row_labels: Some(
                joined
                    .rows
                    .iter()
                    .map(|row| row.detector.to_string())
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::join::DetectorJoinEngine;
    use crate::application::statistic::{StatisticConfig, StatisticResolver};
    use crate::domain::DetectorId;
    use crate::testkit::dataset::{bank, coinc_table, trigger_set, TriggerSpec};

    #[test]
    fn fixed_precision() {
        assert_eq!(NumberFormat::Fixed.apply(12.345), "12.35");
        assert_eq!(NumberFormat::Count.apply(11.0), "11");
        assert_eq!(NumberFormat::Time.apply(1_126_259_462.4), "1126259462.400");
    }

    #[test]
    fn scientific_uses_two_digit_exponent() {
        assert_eq!(scientific(0.000123), "1.23e-04");
        assert_eq!(scientific(12400.0), "1.24e+04");
        assert_eq!(scientific(0.0), "0.00e+00");
        assert_eq!(scientific(1.5e-120), "1.50e-120");
    }

    #[test]
    fn summary_omits_absent_columns() {
        let coinc = ColumnTable::new("coinc")
            .with_column("ifar", vec![12.345])
            .with_column("fap", vec![0.000123]);
        let table = RecordFormatter::default()
            .summary_table(&coinc, 0, &ParticipationMask::default())
            .unwrap();
        assert_eq!(table.headers, vec!["Inclusive IFAR (yr)", "Inclusive FAP"]);
        assert_eq!(
            table.rows,
            vec![vec![Cell::text("12.35"), Cell::text("1.23e-04")]]
        );
        assert!(table.row_labels.is_none());
    }

    #[test]
    fn search_link_omitted_without_valid_times() {
        let coinc = ColumnTable::new("coinc").with_column("ifar", vec![1.0]);
        let formatter = RecordFormatter::new(LinkOptions {
            detector_status: None,
            search: Some(SearchLink {
                base: Url::parse("https://gracedb.ligo.org/search/").unwrap(),
                window: 2.0,
            }),
        });
        let table = formatter
            .summary_table(&coinc, 0, &ParticipationMask::default())
            .unwrap();
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn undefined_reduced_chisq_renders_nan() {
        let coinc = coinc_table(&[("H1", vec![1_126_259_462.0], vec![0.0])]);
        let triggers = vec![(
            DetectorId::from("H1"),
            trigger_set(&[TriggerSpec {
                chisq_dof: 1.0,
                ..TriggerSpec::default()
            }]),
        )];
        let bank = bank();
        let statistic =
            StatisticResolver::resolve(&StatisticConfig::default(), &[DetectorId::from("H1")])
                .unwrap();
        let joined = DetectorJoinEngine::new(&coinc, &triggers, &bank)
            .join(0, &statistic)
            .unwrap();

        let table = RecordFormatter::default().detector_table(&joined, statistic.display_name());
        let rchisq = table
            .headers
            .iter()
            .position(|h| h == "Reduced χ²")
            .unwrap();
        assert_eq!(table.rows[0][rchisq], Cell::text("NaN"));
        assert_eq!(table.rows[0][rchisq + 1], Cell::text("1"));
        // newsnr falls back to the plain SNR
        assert_eq!(table.rows[0][2], Cell::text("8.00"));
    }

    #[test]
    fn truncated_keeps_leading_columns() {
        let table = DisplayTable {
            headers: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![vec![Cell::text("1"), Cell::text("2"), Cell::text("3")]],
            row_labels: Some(vec!["H1".into()]),
        };
        let capped = table.truncated(2);
        assert_eq!(capped.headers, vec!["a", "b"]);
        assert_eq!(capped.rows[0].len(), 2);
        assert_eq!(capped.row_labels, table.row_labels);
    }
}
