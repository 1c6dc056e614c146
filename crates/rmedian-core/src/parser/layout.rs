//! ヘッダ行の検証と列レイアウトの決定

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// ヘッダの形: 文字（Unicode の Alphabetic）2〜20 個のトークン 3 つをカンマ区切り
/// （各トークン先頭に空白1つまで可）
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?: ?\p{Alphabetic}{2,20},){2} ?\p{Alphabetic}{2,20}$")
        .expect("invalid HEADER_RE pattern")
});

/// 論理フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    FirstName,
    LastName,
}

impl Field {
    /// ヘッダ上のトークン名
    pub const fn token(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::FirstName => "fname",
            Field::LastName => "lname",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        [Field::Age, Field::FirstName, Field::LastName]
            .into_iter()
            .find(|f| token.eq_ignore_ascii_case(f.token()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// ヘッダ検証の失敗理由
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("source is empty")]
    Empty,
    #[error("header {0:?} is not three comma separated alphabetic columns")]
    Shape(String),
    #[error("unknown column {0:?}")]
    UnknownColumn(String),
    #[error("column {0} appears more than once")]
    Duplicate(Field),
    #[error("column {0} is missing")]
    Missing(Field),
}

/// 論理フィールド → 0 始まりの列位置
///
/// ソースごとにヘッダから一度だけ決定する。3 フィールドがちょうど1回ずつ現れることが前提。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub age: usize,
    pub fname: usize,
    pub lname: usize,
}

impl ColumnLayout {
    /// 列数（固定）
    pub const COLUMNS: usize = 3;

    /// ヘッダ行を検証してレイアウトを得る
    ///
    /// 行末の改行文字は無視する。トークンは大文字小文字を区別しない。
    pub fn from_header(header: &str) -> Result<Self, HeaderError> {
        let header = strip_line_terminator(header);
        if header.is_empty() {
            return Err(HeaderError::Empty);
        }
        if !HEADER_RE.is_match(header) {
            return Err(HeaderError::Shape(header.to_owned()));
        }

        let mut slots: [Option<usize>; Self::COLUMNS] = [None; Self::COLUMNS];
        for (column, raw) in header.split(',').enumerate() {
            let token = raw.trim_start_matches(' ');
            let field = Field::from_token(token)
                .ok_or_else(|| HeaderError::UnknownColumn(token.to_owned()))?;
            let slot = &mut slots[field as usize];
            if slot.is_some() {
                return Err(HeaderError::Duplicate(field));
            }
            *slot = Some(column);
        }

        let [age, fname, lname] = slots;
        Ok(Self {
            age: age.ok_or(HeaderError::Missing(Field::Age))?,
            fname: fname.ok_or(HeaderError::Missing(Field::FirstName))?,
            lname: lname.ok_or(HeaderError::Missing(Field::LastName))?,
        })
    }

    /// 列位置にあるフィールド
    pub fn field_at(&self, column: usize) -> Option<Field> {
        if column == self.age {
            Some(Field::Age)
        } else if column == self.fname {
            Some(Field::FirstName)
        } else if column == self.lname {
            Some(Field::LastName)
        } else {
            None
        }
    }
}

impl Default for ColumnLayout {
    /// `fname, lname, age`（データ生成ツールの出力形式）
    fn default() -> Self {
        Self {
            fname: 0,
            lname: 1,
            age: 2,
        }
    }
}

/// 行末の `\n` / `\r` を取り除く
pub(crate) fn strip_line_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
