//! 実行設定
//!
//! TOML ファイルから読み込める。CLI で明示した値はファイルの値より優先する。
//!
//! ```toml
//! strategy = "select"
//! seed = 42
//! parallel = true
//! format = "json"
//! ```

use crate::median::Strategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// レポートの出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown format '{s}' (expected text or json)")),
        }
    }
}

/// 設定ファイル読み込みの失敗
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 1回の集計の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// 中央値バックエンド
    pub strategy: Strategy,
    /// Quickselect のシード（未指定ならOS乱数）
    pub seed: Option<u64>,
    /// ソースを並列に読み込むか（`parallel` feature 無効時は無視）
    pub parallel: bool,
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            seed: None,
            parallel: true,
            format: OutputFormat::default(),
        }
    }
}

impl RunConfig {
    /// TOML 文字列から読む
    pub fn from_toml_str(text: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// TOML ファイルから読む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: label.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = RunConfig::from_toml_str("", "inline").expect("empty config");
        assert_eq!(cfg, RunConfig::default());
        assert!(cfg.parallel);
        assert_eq!(cfg.strategy, Strategy::Heap);
    }

    #[test]
    fn all_fields_parse() {
        let cfg = RunConfig::from_toml_str(
            "strategy = \"select\"\nseed = 42\nparallel = false\nformat = \"json\"\n",
            "inline",
        )
        .expect("valid config");
        assert_eq!(cfg.strategy, Strategy::Select);
        assert_eq!(cfg.seed, Some(42));
        assert!(!cfg.parallel);
        assert_eq!(cfg.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RunConfig::from_toml_str("threads = 4\n", "cfg.toml").expect_err("unknown key");
        assert!(err.to_string().contains("cfg.toml"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RunConfig::load("/no/such/rmedian.toml").expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
