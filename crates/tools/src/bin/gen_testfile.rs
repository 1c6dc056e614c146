use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tools::common::io::open_writer;
use tools::testdata::{TestFileSpec, parse_column_order, write_testfile};

#[derive(Parser, Debug)]
#[command(author, version, about = "rmedian 用のテスト CSV（fname, lname, age）を生成する")]
struct Cli {
    /// 出力先（`-` は標準出力、`.gz` は gzip）
    #[arg(long)]
    output: PathBuf,

    /// 生成する行数
    #[arg(long, default_value_t = 100_000)]
    count: usize,

    /// 列順（例: "age, lname, fname"）
    #[arg(long, default_value = "fname, lname, age")]
    columns: String,

    /// 不正行を混ぜる割合（0.0〜1.0）
    #[arg(long, default_value_t = 0.0)]
    malformed_rate: f64,

    /// 乱数シード（未指定時はOS乱数）
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.malformed_rate) {
        bail!("--malformed-rate must be within 0.0..=1.0, got {}", cli.malformed_rate);
    }
    let layout = parse_column_order(&cli.columns).map_err(anyhow::Error::msg)?;
    let spec = TestFileSpec {
        count: cli.count,
        layout,
        malformed_rate: cli.malformed_rate,
    };
    let mut rng = match cli.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
    };

    let mut writer = open_writer(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let summary = write_testfile(&mut writer, &spec, &mut rng)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    writer.close().with_context(|| format!("failed to close {}", cli.output.display()))?;

    log::info!(
        "wrote {} valid and {} malformed line(s) to {} (total age {})",
        summary.valid,
        summary.malformed,
        cli.output.display(),
        summary.total_age
    );
    Ok(())
}
