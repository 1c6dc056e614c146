//! rmedian-core
//!
//! `(fname, lname, age)` 形式のCSV風ソース群から、平均年齢と中央値（とその保持者）を求める。
//!
//! - `parser`: ヘッダから列レイアウトを決め、行を検証してレコード化
//! - `accumulator`: 合計年齢・件数の畳み込み
//! - `median`: 2本ヒープ / 乱択 Quickselect / ソートの3バックエンド
//! - `source`: ファイル・標準入力・gzip の読み込み
//! - `stats`: 複数ソースの集計とレポート
//!
//! 不正な入力はどれも致命的ではない。診断は `log` と `StatsReport` の両方に出る。

pub mod accumulator;
pub mod config;
pub mod error;
pub mod median;
pub mod parser;
pub mod record;
pub mod source;
pub mod stats;

pub use accumulator::AgeTotals;
pub use config::{OutputFormat, RunConfig};
pub use error::{Diagnostic, SourceError};
pub use median::{
    DualHeapMedian, MedianComputation, MedianResult, Resolution, SelectMedian, SortMedian, Strategy,
};
pub use parser::ColumnLayout;
pub use record::Record;
pub use source::{Source, SourceReport};
pub use stats::{StatsReport, compute_mean_and_median, run};
