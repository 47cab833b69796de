use std::process;

use clap::Parser;
use coincinfo::adapter::inbound::cli::command::{Cli, Commands};
use coincinfo::adapter::inbound::cli::diagnostic::diagnose;
use coincinfo::adapter::inbound::cli::output::{self, OutputConfig};
use coincinfo::adapter::inbound::cli::{rankings, report};
use coincinfo::error::Result;
use coincinfo::infrastructure::config::settings::Config;
use tracing::{debug, error};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = run(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("{:?}", diagnose(&e, &cli.config));
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;
    config.logging = config.logging.with_verbosity(cli.quiet, cli.verbose);
    config.init_logging();
    debug!(config = %cli.config.display(), "Configuration loaded");

    match &cli.command {
        Commands::Report(args) => report::execute(args, &config),
        Commands::Rankings => rankings::list(),
    }
}
