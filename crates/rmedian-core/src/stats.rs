//! 複数ソースに対する平均・中央値の集計
//!
//! ソースごとの結果（集計・レコード・診断）は独立しているので、並列に読み込んでから
//! 指定順に畳み込める。どの読み込み方でも最終結果は同じになる。

use crate::accumulator::AgeTotals;
use crate::config::RunConfig;
use crate::error::SourceError;
use crate::median::{MedianComputation, MedianResult, Strategy};
use crate::source::{self, Source, SourceReport};
use serde::Serialize;
use std::fmt;

/// 集計結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub strategy: &'static str,
    pub mean: f64,
    pub median: MedianResult,
    pub totals: AgeTotals,
    pub sources: Vec<SourceReport>,
}

impl StatsReport {
    /// 受理したレコード数
    pub fn count(&self) -> u64 {
        self.totals.count()
    }

    /// 全ソースの診断
    pub fn diagnostics(&self) -> impl Iterator<Item = &SourceError> {
        self.sources.iter().flat_map(|s| s.diagnostics.iter())
    }

    /// `(平均, 中央値, 件数)`
    pub fn summary(&self) -> (f64, MedianResult, u64) {
        (self.mean, self.median.clone(), self.count())
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "Results ({}):", self.strategy)?;
        writeln!(f)?;
        // 平均は常に小数表記（30.0）。中央値は実在する年齢なら整数、平均なら小数。
        writeln!(f, "Average age: {:?} yrs", self.mean)?;
        match &self.median {
            MedianResult::Exact { record } => writeln!(f, "Median age: {} yrs", record.age())?,
            MedianResult::Averaged { .. } => {
                writeln!(f, "Median age: {:?} yrs", self.median.value().unwrap_or_default())?
            }
            MedianResult::Undefined => writeln!(f, "Median age: 0 yrs")?,
        }
        writeln!(f, "Median entity: {}", self.median.holder())?;
        write!(f, "Processed: {} lines", self.count())
    }
}

/// ソースを順に読み、レコードをそのままバックエンドへ流す
pub fn compute_streaming(sources: &[Source], backend: &mut dyn MedianComputation) -> StatsReport {
    let reports: Vec<SourceReport> = sources
        .iter()
        .map(|s| source::stream_source(s, |r| backend.insert(r)))
        .collect();
    finish(reports, backend)
}

/// ソースを並列に読み込み、指定順にバックエンドへ畳み込む
#[cfg(feature = "parallel")]
pub fn compute_parallel(sources: &[Source], backend: &mut dyn MedianComputation) -> StatsReport {
    use rayon::prelude::*;

    let loaded: Vec<_> = sources.par_iter().map(source::load_source).collect();
    let mut reports = Vec::with_capacity(loaded.len());
    for (report, records) in loaded {
        for record in records {
            backend.insert(record);
        }
        reports.push(report);
    }
    finish(reports, backend)
}

fn finish(sources: Vec<SourceReport>, backend: &mut dyn MedianComputation) -> StatsReport {
    let totals: AgeTotals = sources.iter().map(|s| s.totals).sum();
    debug_assert_eq!(totals.count(), backend.len() as u64);
    let median = backend.median();
    if totals.count() == 0 {
        log::info!("no valid records in {} source(s)", sources.len());
    }
    StatsReport {
        strategy: backend.name(),
        mean: totals.mean(),
        median,
        totals,
        sources,
    }
}

/// 並列読み込みしてよいか
///
/// 標準入力は1本しかないので、`-` が複数あるときは順に読む。
#[cfg(feature = "parallel")]
fn can_load_in_parallel(sources: &[Source]) -> bool {
    sources.len() > 1 && sources.iter().filter(|s| s.is_stdin()).count() <= 1
}

/// 設定に従って集計する
pub fn run(sources: &[Source], config: &RunConfig) -> StatsReport {
    let mut backend = config.strategy.build(config.seed);
    #[cfg(feature = "parallel")]
    if config.parallel && can_load_in_parallel(sources) {
        return compute_parallel(sources, backend.as_mut());
    }
    compute_streaming(sources, backend.as_mut())
}

/// `(平均, 中央値, 件数)` を返す
pub fn compute_mean_and_median<S>(sources: &[S], strategy: Strategy) -> (f64, MedianResult, u64)
where
    S: Clone + Into<Source>,
{
    let sources: Vec<Source> = sources.iter().cloned().map(Into::into).collect();
    let mut backend = strategy.build(None);
    compute_streaming(&sources, backend.as_mut()).summary()
}
