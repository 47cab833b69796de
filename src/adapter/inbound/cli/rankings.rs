//! Listing of the available ranking statistics.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::application::statistic::SINGLE_RANKING_ONLY;
use crate::domain::ranking::{display_name, SnglRanking};
use crate::error::Result;

#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Inputs")]
    inputs: String,
}

/// List single-detector rankings.
pub fn list() -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    if output::is_json() {
        let rankings: Vec<_> = SnglRanking::ALL
            .iter()
            .map(|r| {
                json!({
                    "name": r.id(),
                    "label": display_name(r.id()),
                    "inputs": r.inputs(),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "rankings",
            "family": SINGLE_RANKING_ONLY,
            "rankings": rankings,
        }));
        return Ok(());
    }

    output::section("Single-detector rankings");
    let rows: Vec<RankingRow> = SnglRanking::ALL
        .iter()
        .map(|r| RankingRow {
            name: r.id(),
            label: display_name(r.id()),
            inputs: r.inputs().join(", "),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::note(format!(
        "Combined families are replaced by {SINGLE_RANKING_ONLY} for single triggers."
    ));
    Ok(())
}
