//! ソース読み込み時の診断
//!
//! どの変種も致命的ではない。ソース単位・行単位で回復し、集計から除外した上で
//! `log::warn!` と `SourceReport::diagnostics` の両方に流す。

use serde::Serialize;

/// ソース処理中に検出した問題
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceError {
    /// ソースを開けなかった（存在しない・権限がない等）
    #[error("unable to open source {source_label}: {reason}. Skipping...")]
    Unavailable {
        source_label: String,
        reason: String,
    },

    /// ヘッダ行が不正、または `age`/`fname`/`lname` が揃っていない
    #[error("source {source_label} has an invalid header ({reason}). Skipping...")]
    HeaderInvalid {
        source_label: String,
        reason: String,
    },

    /// データ行が列レイアウトに合わない
    #[error("improperly formatted input in {source_label} at line {line_no}: {line:?}")]
    LineMalformed {
        source_label: String,
        line_no: usize,
        line: String,
    },

    /// 読み込み途中で I/O エラーが起きた（それまでの行は有効）
    #[error("read failed in {source_label} after line {line_no}: {reason}")]
    ReadFailed {
        source_label: String,
        line_no: usize,
        reason: String,
    },
}

impl SourceError {
    /// 診断が指すソース名
    pub fn source_label(&self) -> &str {
        match self {
            SourceError::Unavailable { source_label, .. }
            | SourceError::HeaderInvalid { source_label, .. }
            | SourceError::LineMalformed { source_label, .. }
            | SourceError::ReadFailed { source_label, .. } => source_label,
        }
    }

    /// ソース全体が集計から外れる種類か
    pub fn skips_source(&self) -> bool {
        matches!(self, SourceError::Unavailable { .. } | SourceError::HeaderInvalid { .. })
    }
}

/// 診断の別名（レポート上の呼称）
pub type Diagnostic = SourceError;
