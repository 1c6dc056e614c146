//! 入力ソースの読み込み
//!
//! パス `-` は標準入力、拡張子 `.gz` は gzip として透過的に展開する。
//! 開けないソースは `SourceError::Unavailable` として空の結果になる。

use crate::accumulator::AgeTotals;
use crate::error::SourceError;
use crate::parser;
use crate::record::Record;
use flate2::read::GzDecoder;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

const READER_BUF_CAP: usize = 128 * 1024; // 128 KiB

/// 入力ソース
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// ファイルパス（`-` は標準入力）
    Path(PathBuf),
    /// メモリ上のテキスト（1行目がヘッダ）
    Inline { label: String, text: String },
}

impl Source {
    pub fn inline(label: impl Into<String>, text: impl Into<String>) -> Self {
        Source::Inline {
            label: label.into(),
            text: text.into(),
        }
    }

    /// 標準入力を指すか
    pub fn is_stdin(&self) -> bool {
        matches!(self, Source::Path(p) if p.as_os_str() == "-")
    }

    /// 診断に出す名前
    pub fn label(&self) -> String {
        match self {
            Source::Path(p) => p.display().to_string(),
            Source::Inline { label, .. } => label.clone(),
        }
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        match self {
            Source::Path(p) => open_reader(p),
            Source::Inline { text, .. } => Ok(Box::new(text.as_bytes())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<PathBuf> for Source {
    fn from(p: PathBuf) -> Self {
        Source::Path(p)
    }
}

impl From<&Path> for Source {
    fn from(p: &Path) -> Self {
        Source::Path(p.to_path_buf())
    }
}

impl From<&str> for Source {
    fn from(p: &str) -> Self {
        Source::Path(PathBuf::from(p))
    }
}

impl From<String> for Source {
    fn from(p: String) -> Self {
        Source::Path(PathBuf::from(p))
    }
}

/// パスを開く（`-` は標準入力、`.gz` は展開）
pub fn open_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, io::stdin())));
    }
    let file = File::open(path)?;
    let gzipped = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("gz"));
    if gzipped {
        return Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, GzDecoder::new(file))));
    }
    Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, file)))
}

/// 行イテレータ（不正な UTF-8 は置換文字にして行パターンで弾かせる）
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                    self.buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// 1ソース分の集計と診断
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub label: String,
    pub totals: AgeTotals,
    /// ソース全体をスキップしたか（開けない・ヘッダ不正）
    pub skipped: bool,
    pub diagnostics: Vec<SourceError>,
}

impl SourceReport {
    fn skipped(label: String, err: SourceError) -> Self {
        Self {
            label,
            totals: AgeTotals::ZERO,
            skipped: true,
            diagnostics: vec![err],
        }
    }
}

/// ソースを読み、受理したレコードを `sink` に流す
///
/// どんな失敗でもパニックやエラー返却はせず、診断付きのレポートを返す。
pub fn stream_source<F>(source: &Source, mut sink: F) -> SourceReport
where
    F: FnMut(Record),
{
    let label = source.label();
    let reader = match source.open() {
        Ok(r) => r,
        Err(e) => {
            let err = SourceError::Unavailable {
                source_label: label.clone(),
                reason: e.to_string(),
            };
            log::warn!("{err}");
            return SourceReport::skipped(label, err);
        }
    };

    let mut lines = LossyLines::new(reader);
    let header = match lines.next() {
        None => String::new(),
        Some(Ok(h)) => h,
        Some(Err(e)) => {
            let err = SourceError::Unavailable {
                source_label: label.clone(),
                reason: e.to_string(),
            };
            log::warn!("{err}");
            return SourceReport::skipped(label, err);
        }
    };

    let mut stream = match parser::parse_source(label.clone(), &header, lines) {
        Ok(s) => s,
        Err(err) => return SourceReport::skipped(label, err),
    };
    for record in stream.by_ref() {
        sink(record);
    }
    let (totals, diagnostics) = stream.finish();
    log::debug!(
        "{label}: accepted {} records (total age {}), {} diagnostics",
        totals.count(),
        totals.total_age(),
        diagnostics.len()
    );
    SourceReport {
        label,
        totals,
        skipped: false,
        diagnostics,
    }
}

/// ソースを読み切ってレコードを実体化する（並列読み込み用）
pub fn load_source(source: &Source) -> (SourceReport, Vec<Record>) {
    let mut records = Vec::new();
    let report = stream_source(source, |r| records.push(r));
    (report, records)
}
