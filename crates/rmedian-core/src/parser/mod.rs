//! レコードパーサ
//!
//! ヘッダ行で列レイアウトを決め、以降の行を `RecordStream` で遅延的にレコード化する。
//!
//! - ヘッダ不正: ソース全体をスキップ（`SourceError::HeaderInvalid`）
//! - 行不正: その行だけスキップ（`SourceError::LineMalformed`）

mod layout;
mod lines;

pub use layout::{ColumnLayout, Field, HeaderError};
pub use lines::{LinePattern, RecordStream};

use crate::error::SourceError;
use std::io;

/// ヘッダを検証し、残りの行に対するレコード列を返す
pub fn parse_source<I, S>(
    label: impl Into<String>,
    header: &str,
    lines: I,
) -> Result<RecordStream<I::IntoIter>, SourceError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let label = label.into();
    match ColumnLayout::from_header(header) {
        Ok(layout) => Ok(RecordStream::new(label, LinePattern::new(layout), lines.into_iter())),
        Err(e) => {
            let err = SourceError::HeaderInvalid {
                source_label: label,
                reason: e.to_string(),
            };
            log::warn!("{err}");
            Err(err)
        }
    }
}

/// メモリ上のテキスト（1行目がヘッダ）をパースする
pub fn parse_text<'a>(
    label: impl Into<String>,
    text: &'a str,
) -> Result<RecordStream<impl Iterator<Item = io::Result<&'a str>>>, SourceError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or("");
    parse_source(label, header, lines.map(Ok::<&'a str, io::Error>))
}
