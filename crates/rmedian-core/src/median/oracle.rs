//! ソートによる参照実装
//!
//! 年齢で安定ソートして中央の要素を取るだけ。他のバックエンドの突き合わせに使う。

use super::{MedianComputation, MedianResult};
use crate::record::Record;

#[derive(Debug, Clone, Default)]
pub struct SortMedian {
    items: Vec<Record>,
}

impl SortMedian {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.items.push(record);
    }

    /// 年齢昇順（同年齢は挿入順）に並べたレコード
    pub fn sorted(&mut self) -> &[Record] {
        self.items.sort_by_key(Record::age);
        &self.items
    }
}

impl MedianComputation for SortMedian {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn insert(&mut self, record: Record) {
        self.push(record);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn median(&mut self) -> MedianResult {
        let sorted = self.sorted();
        let n = sorted.len();
        if n == 0 {
            return MedianResult::Undefined;
        }
        let lower = if n % 2 == 1 { n / 2 } else { n / 2 - 1 };
        MedianResult::from_midpoints(sorted[lower].clone(), sorted[n / 2].clone())
    }
}

impl Extend<Record> for SortMedian {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_insertion_order() {
        let mut oracle = SortMedian::new();
        oracle.extend([
            Record::new(30, "Doe, Jane"),
            Record::new(10, "Ant, A"),
            Record::new(30, "Lee, Sam"),
            Record::new(50, "Zed, Z"),
        ]);
        let m = oracle.median();
        assert_eq!(
            m,
            MedianResult::Exact {
                record: Record::new(30, "Doe, Jane"),
            }
        );
        assert_eq!(oracle.sorted()[2].name(), "Lee, Sam");
    }
}
