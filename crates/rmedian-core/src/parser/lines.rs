//! データ行の検証とレコード抽出

use super::layout::{ColumnLayout, strip_line_terminator};
use crate::accumulator::AgeTotals;
use crate::error::SourceError;
use crate::record::Record;
use regex::Regex;
use std::io;
use std::sync::LazyLock;

// 名前列はどれも同じ形なので、パターンは age 列の位置だけで決まる。
// 各列をキャプチャし、先頭の空白1つを許す。
static LINE_RE: LazyLock<[Regex; ColumnLayout::COLUMNS]> = LazyLock::new(|| {
    const NAME: &str = r"( ?\p{Alphabetic}{2,20})";
    const AGE: &str = r"( ?[0-9]{1,3})";
    std::array::from_fn(|age_column| {
        let columns: Vec<&str> =
            (0..ColumnLayout::COLUMNS).map(|c| if c == age_column { AGE } else { NAME }).collect();
        Regex::new(&format!("^{}$", columns.join(","))).expect("invalid LINE_RE pattern")
    })
});

/// レイアウトに対応する行パターン
#[derive(Debug, Clone, Copy)]
pub struct LinePattern {
    layout: ColumnLayout,
}

impl LinePattern {
    pub fn new(layout: ColumnLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// 1行を検証し、通ればレコードを返す
    pub fn parse(&self, line: &str) -> Option<Record> {
        let line = strip_line_terminator(line);
        let caps = LINE_RE[self.layout.age].captures(line)?;
        let field =
            |column: usize| caps.get(column + 1).map(|m| m.as_str().trim_start_matches(' '));
        let age = field(self.layout.age)?.parse::<u16>().ok()?;
        let last = field(self.layout.lname)?;
        let first = field(self.layout.fname)?;
        Record::from_parts(age, last, first)
    }
}

/// 1ソース分のレコード列（遅延評価）
///
/// 不正行は読み飛ばして診断に積む。読み込みエラーが出たらそこで打ち切る。
/// 集計値は受理した行だけから計算される。
pub struct RecordStream<I> {
    label: String,
    pattern: LinePattern,
    lines: I,
    line_no: usize,
    totals: AgeTotals,
    diagnostics: Vec<SourceError>,
    exhausted: bool,
}

impl<I, S> RecordStream<I>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    pub(super) fn new(label: String, pattern: LinePattern, lines: I) -> Self {
        Self {
            label,
            pattern,
            lines,
            // ヘッダが1行目
            line_no: 1,
            totals: AgeTotals::default(),
            diagnostics: Vec::new(),
            exhausted: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn layout(&self) -> ColumnLayout {
        self.pattern.layout()
    }

    /// ここまでに受理した行の集計
    pub fn totals(&self) -> AgeTotals {
        self.totals
    }

    pub fn diagnostics(&self) -> &[SourceError] {
        &self.diagnostics
    }

    /// 集計と診断を取り出して終了する
    pub fn finish(self) -> (AgeTotals, Vec<SourceError>) {
        (self.totals, self.diagnostics)
    }
}

impl<I, S> Iterator for RecordStream<I>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.exhausted {
            return None;
        }
        loop {
            let line = match self.lines.next() {
                None => {
                    self.exhausted = true;
                    return None;
                }
                Some(Err(e)) => {
                    let err = SourceError::ReadFailed {
                        source_label: self.label.clone(),
                        line_no: self.line_no,
                        reason: e.to_string(),
                    };
                    log::warn!("{err}");
                    self.diagnostics.push(err);
                    self.exhausted = true;
                    return None;
                }
                Some(Ok(line)) => line,
            };
            self.line_no += 1;

            let line = line.as_ref();
            match self.pattern.parse(line) {
                Some(record) => {
                    self.totals.push(record.age());
                    return Some(record);
                }
                None => {
                    let err = SourceError::LineMalformed {
                        source_label: self.label.clone(),
                        line_no: self.line_no,
                        line: strip_line_terminator(line).to_owned(),
                    };
                    log::warn!("{err}");
                    self.diagnostics.push(err);
                }
            }
        }
    }
}
