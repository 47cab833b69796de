//! Handler for the `report` command.

use serde_json::json;
use tracing::debug;

use super::command::ReportArgs;
use super::output;
use super::render::render_table;
use crate::adapter::outbound::json::JsonDatasetSource;
use crate::application::statistic::StatisticConfig;
use crate::application::{build_report, EventReport, ReportRequest};
use crate::domain::EventQuery;
use crate::error::Result;
use crate::infrastructure::bootstrap::{load_inputs, InputPaths};
use crate::infrastructure::config::settings::Config;

/// Execute `coincinfo report`.
pub fn execute(args: &ReportArgs, config: &Config) -> Result<()> {
    let request = build_request(args, config)?;

    let paths = InputPaths {
        coinc: args.coinc_file.clone(),
        coinc_group: args
            .coinc_group
            .clone()
            .unwrap_or_else(|| config.report.coinc_group.clone()),
        triggers: args.single_trigger_files.clone(),
        bank: args.bank_file.clone(),
    };
    let inputs = load_inputs(&JsonDatasetSource::new(), &paths)?;
    let report = build_report(&inputs, &request)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "report",
            "report": serde_json::to_value(&report)?,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    print_report(&report, args.max_columns);
    Ok(())
}

/// Combine CLI flags with configuration defaults. Flags win.
fn build_request(args: &ReportArgs, config: &Config) -> Result<ReportRequest> {
    let sort_key = args
        .sort_variable
        .clone()
        .unwrap_or_else(|| config.report.sort_key.clone());
    let order = args
        .sort_order
        .map_or(config.report.sort_order, Into::into);
    let query = EventQuery::from_options(args.n_loudest, args.trigger_id, sort_key, order)?;

    let statistic = StatisticConfig {
        ranking_statistic: args
            .ranking_statistic
            .clone()
            .unwrap_or_else(|| config.statistic.ranking_statistic.clone()),
        sngl_ranking: args
            .sngl_ranking
            .clone()
            .unwrap_or_else(|| config.statistic.sngl_ranking.clone()),
    };
    let links = config
        .links
        .link_options(args.include_summary_page_link, args.include_search_link)?;
    debug!(?query, ?statistic, "Built report request");

    Ok(ReportRequest {
        query,
        statistic,
        links,
        title: args.title.clone(),
        caption: args.caption.clone(),
    })
}

fn print_report(report: &EventReport, max_columns: Option<usize>) {
    output::section(&report.title);
    if let Some(substitution) = &report.substitution {
        output::warning(&substitution.to_string());
    }

    output::section("Coincident event");
    output::lines(&render_table(&report.summary, max_columns));

    output::section("Single-detector triggers");
    if report.detectors.rows.is_empty() {
        output::note("No detector contributed a trigger.");
    } else {
        output::lines(&render_table(&report.detectors, max_columns));
    }

    println!();
    output::note(&report.caption);
}
