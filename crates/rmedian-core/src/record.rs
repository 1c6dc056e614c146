//! 年齢レコード

use serde::Serialize;
use std::fmt;

/// 年齢の上限（3桁まで）
pub const MAX_AGE: u16 = 999;

/// 1行分の検証済みレコード
///
/// `name` は `"<lname>, <fname>"` 形式で構築済み。構築後は不変。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    age: u16,
    name: String,
}

impl Record {
    /// 年齢と表示名からレコードを作る
    ///
    /// `age` は `MAX_AGE` 以下であること。範囲外を受け取りうる場合は `try_new` を使う。
    pub fn new(age: u16, name: impl Into<String>) -> Self {
        debug_assert!(age <= MAX_AGE, "age {age} exceeds {MAX_AGE}");
        Self {
            age,
            name: name.into(),
        }
    }

    /// 年齢が `MAX_AGE` を超えていれば `None`
    pub fn try_new(age: u16, name: impl Into<String>) -> Option<Self> {
        (age <= MAX_AGE).then(|| Self {
            age,
            name: name.into(),
        })
    }

    /// 姓・名から `"last, first"` 形式の名前を組み立てる
    pub fn from_parts(age: u16, last: &str, first: &str) -> Option<Self> {
        Self::try_new(age, format!("{last}, {first}"))
    }

    #[inline]
    pub fn age(&self) -> u16 {
        self.age
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.age)
    }
}
