//! 中央値の計算
//!
//! 3つのバックエンドを `MedianComputation` の背後で差し替え可能にしている。
//!
//! - `DualHeapMedian`: 2本のヒープでオンラインに中央値を保持する（挿入 O(log n)、参照 O(1)）
//! - `SelectMedian`: 全件を溜めてから乱択 Quickselect で順序統計量を求める（平均 O(n)）
//! - `SortMedian`: 安定ソートして中央を取る参照実装（突き合わせ用）
//!
//! どのバックエンドも、要素数の偶奇と中央2要素の年齢が等しいかどうかだけで
//! `MedianResult` の形を決める（`MedianResult::from_midpoints`）。

mod heap;
mod oracle;
mod select;

pub use heap::DualHeapMedian;
pub use oracle::SortMedian;
pub use select::{SelectMedian, select_kth};

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 中央値の形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// 中央値の年齢を持つレコードが実在する
    Exact,
    /// 中央2要素の平均で、その年齢のレコードは存在しないかもしれない
    Averaged,
    /// データなし
    Undefined,
}

/// 中央値の計算結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum MedianResult {
    Exact { record: Record },
    Averaged { lower: Record, upper: Record },
    Undefined,
}

impl MedianResult {
    /// 中央の候補から結果を決める
    ///
    /// 奇数個なら `lower` と `upper` は同じ要素（順位 n/2）を渡す。偶数個なら順位 n/2-1 と n/2。
    /// 年齢が等しければ `lower` のレコードを保持者とする。
    pub fn from_midpoints(lower: Record, upper: Record) -> Self {
        if lower.age() == upper.age() {
            MedianResult::Exact { record: lower }
        } else {
            MedianResult::Averaged { lower, upper }
        }
    }

    pub fn resolution(&self) -> Resolution {
        match self {
            MedianResult::Exact { .. } => Resolution::Exact,
            MedianResult::Averaged { .. } => Resolution::Averaged,
            MedianResult::Undefined => Resolution::Undefined,
        }
    }

    /// 中央値の2倍（整数で厳密に比較するため）
    pub fn doubled(&self) -> Option<u32> {
        match self {
            MedianResult::Exact { record } => Some(2 * u32::from(record.age())),
            MedianResult::Averaged { lower, upper } => {
                Some(u32::from(lower.age()) + u32::from(upper.age()))
            }
            MedianResult::Undefined => None,
        }
    }

    /// 中央値（年）
    pub fn value(&self) -> Option<f64> {
        self.doubled().map(|v| f64::from(v) / 2.0)
    }

    /// 形と値が一致するか
    ///
    /// 同年齢のレコード間の順序は規定しないので、名前は比較しない。
    pub fn agrees_with(&self, other: &MedianResult) -> bool {
        self.resolution() == other.resolution() && self.doubled() == other.doubled()
    }

    /// 中央値の保持者の説明
    pub fn holder(&self) -> String {
        match self {
            MedianResult::Exact { record } => record.name().to_owned(),
            MedianResult::Averaged { lower, upper } => format!(
                concat!(
                    "No entity exists in the provided data with the median age, ",
                    "outcome was between {} at {} years and {} at {} years."
                ),
                lower.name(),
                lower.age(),
                upper.name(),
                upper.age()
            ),
            MedianResult::Undefined => "Median does not exist, no data processed.".to_owned(),
        }
    }
}

impl fmt::Display for MedianResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v} ({})", self.holder()),
            None => f.write_str(&self.holder()),
        }
    }
}

/// 中央値計算バックエンドの共通インターフェース
pub trait MedianComputation {
    /// バックエンド名（ログ・レポート用）
    fn name(&self) -> &'static str;

    /// レコードを1件追加する
    fn insert(&mut self, record: Record);

    /// 保持しているレコード数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 現在までの全レコードに対する中央値
    ///
    /// バッチ系バックエンドは内部の並びを破壊的に並べ替えてよい。
    fn median(&mut self) -> MedianResult;
}

/// バックエンドの選択
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// 2本ヒープ（ストリーミング）
    #[default]
    Heap,
    /// 乱択 Quickselect（バッチ）
    Select,
    /// ソートによる参照実装
    Sort,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Heap, Strategy::Select, Strategy::Sort];

    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Heap => "heap",
            Strategy::Select => "select",
            Strategy::Sort => "sort",
        }
    }

    /// バックエンドを生成する。`seed` は Quickselect のピボット選択にのみ効く。
    pub fn build(self, seed: Option<u64>) -> Box<dyn MedianComputation + Send> {
        match self {
            Strategy::Heap => Box::new(DualHeapMedian::new()),
            Strategy::Select => match seed {
                Some(seed) => Box::new(SelectMedian::with_seed(seed)),
                None => Box::new(SelectMedian::new()),
            },
            Strategy::Sort => Box::new(SortMedian::new()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| s.eq_ignore_ascii_case(st.as_str()))
            .ok_or_else(|| format!("unknown strategy '{s}' (expected heap, select or sort)"))
    }
}
