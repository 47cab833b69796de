//! Report assembly: selection, statistic, join and formatting in one pass.

use serde::Serialize;
use tracing::info;

use super::format::{DisplayTable, LinkOptions, RecordFormatter};
use super::join::DetectorJoinEngine;
use super::selector::EventSelector;
use super::statistic::{StatisticConfig, StatisticResolver, StatisticSubstitution};
use crate::domain::{ColumnTable, DetectorId, EventQuery, SelectedEvent};
use crate::error::ReportResult;

/// Read-only input datasets for one report.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    /// Coincidence statistics, already narrowed to the chosen group.
    pub coinc: ColumnTable,
    /// Trigger set per detector, in the order rows should appear.
    pub triggers: Vec<(DetectorId, ColumnTable)>,
    pub bank: ColumnTable,
}

impl ReportInputs {
    #[must_use]
    pub fn detectors(&self) -> Vec<DetectorId> {
        self.triggers.iter().map(|(ifo, _)| ifo.clone()).collect()
    }
}

/// What to report and how.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub query: EventQuery,
    pub statistic: StatisticConfig,
    pub links: LinkOptions,
    pub title: Option<String>,
    pub caption: Option<String>,
}

impl ReportRequest {
    #[must_use]
    pub fn new(query: EventQuery) -> Self {
        Self {
            query,
            statistic: StatisticConfig::default(),
            links: LinkOptions::default(),
            title: None,
            caption: None,
        }
    }
}

/// The two display tables plus title and caption.
#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    pub title: String,
    pub caption: String,
    pub event: SelectedEvent,
    pub statistic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution: Option<StatisticSubstitution>,
    pub summary: DisplayTable,
    pub detectors: DisplayTable,
}

/// Build the report for one event.
///
/// # Errors
///
/// Any selection, statistic, join or lookup failure aborts the report.
pub fn build_report(inputs: &ReportInputs, request: &ReportRequest) -> ReportResult<EventReport> {
    let statistic = StatisticResolver::resolve(&request.statistic, &inputs.detectors())?;
    let event = EventSelector::new(&inputs.coinc).select(request.query.clone())?;

    let engine = DetectorJoinEngine::new(&inputs.coinc, &inputs.triggers, &inputs.bank);
    let joined = engine.join(event.index, &statistic)?;

    let formatter = RecordFormatter::new(request.links.clone());
    let summary = formatter.summary_table(&inputs.coinc, event.index, &joined.mask)?;
    let detectors = formatter.detector_table(&joined, statistic.display_name());

    let title = request.title.clone().unwrap_or_else(|| event.title.clone());
    let caption = request
        .caption
        .clone()
        .unwrap_or_else(|| event.caption.clone());

    info!(
        index = event.index,
        detectors = detectors.rows.len(),
        summary_columns = summary.column_count(),
        "Assembled event report"
    );

    Ok(EventReport {
        title,
        caption,
        event,
        statistic: statistic.display_name().to_string(),
        substitution: statistic.substitution().cloned(),
        summary,
        detectors,
    })
}
