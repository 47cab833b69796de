//! Command-line interface definitions.
//!
//! Defines the CLI structure using `clap`: `report` builds the two tables
//! for one coincident event, `rankings` lists the available statistics.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DetectorId, SortOrder};

/// Coincident-event report generator
#[derive(Parser, Debug)]
#[command(name = "coincinfo")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "coincinfo.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the summary and per-detector tables for one event
    Report(Box<ReportArgs>),

    /// List single-detector rankings and statistic families
    Rankings,
}

/// Sort direction accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SortOrderArg {
    Ascending,
    Descending,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Ascending => SortOrder::Ascending,
            SortOrderArg::Descending => SortOrder::Descending,
        }
    }
}

/// Arguments for `coincinfo report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Coincidence statistics file
    #[arg(long)]
    pub coinc_file: PathBuf,

    /// Group of the coincidence file to read [default from config: background_exc]
    #[arg(long)]
    pub coinc_group: Option<String>,

    /// Single-detector trigger files as IFO=PATH
    #[arg(long, num_args = 1.., required = true, value_parser = parse_detector_file)]
    pub single_trigger_files: Vec<(DetectorId, PathBuf)>,

    /// Template bank file
    #[arg(long)]
    pub bank_file: PathBuf,

    /// Report the k-th loudest event (zero-based)
    #[arg(long)]
    pub n_loudest: Option<usize>,

    /// Report the event at this row index
    #[arg(long)]
    pub trigger_id: Option<usize>,

    /// Column used to rank events
    #[arg(long)]
    pub sort_variable: Option<String>,

    /// Ranking direction
    #[arg(long, value_enum)]
    pub sort_order: Option<SortOrderArg>,

    /// Ranking statistic family
    #[arg(long)]
    pub ranking_statistic: Option<String>,

    /// Single-detector ranking
    #[arg(long)]
    pub sngl_ranking: Option<String>,

    /// Add a detector-status link column
    #[arg(long)]
    pub include_summary_page_link: bool,

    /// Add an event-search link column
    #[arg(long)]
    pub include_search_link: bool,

    /// Override the table title
    #[arg(long)]
    pub title: Option<String>,

    /// Override the table caption
    #[arg(long)]
    pub caption: Option<String>,

    /// Cap the number of rendered columns per table
    #[arg(long)]
    pub max_columns: Option<usize>,
}

/// Parse `IFO=PATH`.
fn parse_detector_file(raw: &str) -> Result<(DetectorId, PathBuf), String> {
    let (ifo, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected IFO=PATH, got '{raw}'"))?;
    let ifo = ifo.trim();
    if ifo.is_empty() || path.trim().is_empty() {
        return Err(format!("expected IFO=PATH, got '{raw}'"));
    }
    Ok((DetectorId::from(ifo), PathBuf::from(path.trim())))
}
