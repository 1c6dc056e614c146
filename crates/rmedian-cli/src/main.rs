use anyhow::{Context, Result};
use clap::Parser;
use rmedian_core::OutputFormat;

mod cli;

use cli::Cli;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = cli.run_config()?;
    let sources = cli.sources();
    log::info!(
        "processing {} source(s) with strategy={} parallel={}",
        sources.len(),
        config.strategy,
        config.parallel
    );

    let report = rmedian_core::run(&sources, &config);
    let skipped = report.sources.iter().filter(|s| s.skipped).count();
    let malformed = report.diagnostics().filter(|d| !d.skips_source()).count();
    log::info!("skipped {skipped} source(s), {malformed} malformed line(s)");

    match config.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}
