//! コマンドライン引数と設定ファイルの統合

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rmedian_core::{OutputFormat, RunConfig, Source, Strategy};

#[derive(Parser, Debug)]
#[command(author, version, about = "CSV ソース群から平均年齢と中央値を求める")]
pub struct Cli {
    /// 入力ソース（`-` は標準入力、`.gz` は自動展開）
    pub sources: Vec<PathBuf>,

    /// 中央値の計算方式: heap / select / sort
    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// Quickselect のシード（未指定時はOS乱数）
    #[arg(long)]
    pub seed: Option<u64>,

    /// 出力形式: text / json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// 設定ファイル（TOML）。CLI で指定した値が優先される
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// ソースを1つずつ順に読む（並列読み込みを無効化）
    #[arg(long)]
    pub sequential: bool,

    /// info レベルのログを出す（RUST_LOG が優先）
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 設定ファイルと CLI 引数を合成する
    pub fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => RunConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.sequential {
            config.parallel = false;
        }
        Ok(config)
    }

    pub fn sources(&self) -> Vec<Source> {
        self.sources.iter().cloned().map(Source::from).collect()
    }
}
