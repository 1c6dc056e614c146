use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use rmedian_core::{RunConfig, Source, StatsReport, Strategy, run};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "heap / select / sort の各方式で集計し、平均・中央値・件数が一致するか検証する"
)]
struct Cli {
    /// 入力ソース
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Quickselect のシード
    #[arg(long)]
    seed: Option<u64>,

    /// ソースを順に読む
    #[arg(long)]
    sequential: bool,
}

/// 基準（sort）と食い違う項目を列挙する
fn mismatches(reference: &StatsReport, other: &StatsReport) -> Vec<String> {
    let mut out = Vec::new();
    if reference.mean != other.mean {
        out.push(format!("mean {} != {}", other.mean, reference.mean));
    }
    if reference.count() != other.count() {
        out.push(format!("count {} != {}", other.count(), reference.count()));
    }
    if !reference.median.agrees_with(&other.median) {
        out.push(format!("median {:?} != {:?}", other.median, reference.median));
    }
    out
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();
    let sources: Vec<Source> = cli.sources.iter().cloned().map(Source::from).collect();

    let reports: Vec<StatsReport> = Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let config = RunConfig {
                strategy,
                seed: cli.seed,
                parallel: !cli.sequential,
                ..RunConfig::default()
            };
            run(&sources, &config)
        })
        .collect();

    let Some(reference) = reports.iter().find(|r| r.strategy == Strategy::Sort.as_str()) else {
        bail!("reference strategy missing");
    };

    println!("{}", "-".repeat(30));
    let mut failed = false;
    for report in &reports {
        let diffs = mismatches(reference, report);
        println!(
            "{:<8} mean={:<8} median={:<8} count={:<10} {}",
            report.strategy,
            report.mean,
            report.median.value().unwrap_or(0.0),
            report.count(),
            if diffs.is_empty() { "ok" } else { "MISMATCH" }
        );
        for d in &diffs {
            println!("    {d}");
        }
        failed |= !diffs.is_empty();
    }
    println!("{}", "-".repeat(30));

    if failed {
        bail!("strategies disagree");
    }
    println!("Average test passed: true");
    println!("Median test passed: true");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_reports_have_no_mismatches() {
        let sources = [Source::inline("a", "fname, lname, age\nAb, Cd, 3\nEf, Gh, 9\n")];
        let config = |strategy| RunConfig {
            strategy,
            ..RunConfig::default()
        };
        let a = run(&sources, &config(Strategy::Heap));
        let b = run(&sources, &config(Strategy::Sort));
        assert!(mismatches(&b, &a).is_empty());
    }

    #[test]
    fn differing_counts_are_reported() {
        let a = run(
            &[Source::inline("a", "fname, lname, age\nAb, Cd, 3\n")],
            &RunConfig::default(),
        );
        let b = run(&[], &RunConfig::default());
        let diffs = mismatches(&a, &b);
        assert_eq!(diffs.len(), 3, "{diffs:?}");
    }
}
