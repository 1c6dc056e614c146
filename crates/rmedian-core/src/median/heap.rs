//! 2本ヒープによるオンライン中央値
//!
//! `lower` は最大ヒープ、`upper` は最小ヒープ。常に次を満たす。
//!
//! - `lower` の全要素の年齢 ≤ `upper` の全要素の年齢
//! - `|lower| - |upper|` は -1, 0, 1 のいずれか
//!
//! よって中央値は常にどちらかの根（または両根の平均）にある。

use super::{MedianComputation, MedianResult};
use crate::record::Record;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// 年齢だけで順序付けるヒープ要素
///
/// 名前は比較に使わないので、同年齢の要素の取り出し順は規定しない。
#[derive(Debug, Clone)]
struct ByAge(Record);

impl PartialEq for ByAge {
    fn eq(&self, other: &Self) -> bool {
        self.0.age() == other.0.age()
    }
}

impl Eq for ByAge {}

impl PartialOrd for ByAge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByAge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.age().cmp(&other.0.age())
    }
}

/// ストリーミング中央値
#[derive(Debug, Clone, Default)]
pub struct DualHeapMedian {
    lower: BinaryHeap<ByAge>,
    upper: BinaryHeap<Reverse<ByAge>>,
}

impl DualHeapMedian {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1件挿入して再平衡する
    pub fn push(&mut self, record: Record) {
        match self.lower.peek() {
            Some(top) if record.age() > top.0.age() => self.upper.push(Reverse(ByAge(record))),
            _ => self.lower.push(ByAge(record)),
        }
        self.rebalance();
    }

    fn rebalance(&mut self) {
        if self.lower.len() >= self.upper.len() + 2 {
            if let Some(moved) = self.lower.pop() {
                self.upper.push(Reverse(moved));
            }
        } else if self.upper.len() >= self.lower.len() + 2 {
            if let Some(Reverse(moved)) = self.upper.pop() {
                self.lower.push(moved);
            }
        }
    }

    /// 現在の中央値（O(1)、状態を変えない）
    pub fn current_median(&self) -> MedianResult {
        let lower = self.lower.peek().map(|e| &e.0);
        let upper = self.upper.peek().map(|e| &(e.0).0);
        match (lower, upper) {
            (None, None) => MedianResult::Undefined,
            _ if self.lower.len() > self.upper.len() => exact(lower),
            _ if self.upper.len() > self.lower.len() => exact(upper),
            (Some(lo), Some(hi)) => MedianResult::from_midpoints(lo.clone(), hi.clone()),
            // 同数かつ片方だけ空にはならない
            _ => MedianResult::Undefined,
        }
    }

    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(|lower|, |upper|)`
    pub fn heap_sizes(&self) -> (usize, usize) {
        (self.lower.len(), self.upper.len())
    }

    /// `lower` の最大年齢
    pub fn lower_max_age(&self) -> Option<u16> {
        self.lower.peek().map(|e| e.0.age())
    }

    /// `upper` の最小年齢
    pub fn upper_min_age(&self) -> Option<u16> {
        self.upper.peek().map(|e| (e.0).0.age())
    }

    /// 要素数差と順序の不変条件が成り立っているか
    pub fn invariants_hold(&self) -> bool {
        let balanced = self.lower.len().abs_diff(self.upper.len()) <= 1;
        let ordered = match (self.lower_max_age(), self.upper_min_age()) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        };
        balanced && ordered
    }
}

fn exact(root: Option<&Record>) -> MedianResult {
    match root {
        Some(record) => MedianResult::Exact {
            record: record.clone(),
        },
        None => MedianResult::Undefined,
    }
}

impl MedianComputation for DualHeapMedian {
    fn name(&self) -> &'static str {
        "heap"
    }

    fn insert(&mut self, record: Record) {
        self.push(record);
    }

    fn len(&self) -> usize {
        DualHeapMedian::len(self)
    }

    fn median(&mut self) -> MedianResult {
        self.current_median()
    }
}

impl Extend<Record> for DualHeapMedian {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}

impl FromIterator<Record> for DualHeapMedian {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        let mut heap = DualHeapMedian::new();
        heap.extend(iter);
        heap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::median::Resolution;

    fn rec(age: u16) -> Record {
        Record::new(age, format!("P{age}, Q"))
    }

    #[test]
    fn empty_is_undefined() {
        let heap = DualHeapMedian::new();
        assert_eq!(heap.current_median(), MedianResult::Undefined);
        assert!(heap.invariants_hold());
    }

    #[test]
    fn running_median_follows_insertions() {
        let mut heap = DualHeapMedian::new();
        heap.push(rec(10));
        assert_eq!(heap.current_median().value(), Some(10.0));
        heap.push(rec(20));
        assert_eq!(heap.current_median().value(), Some(15.0));
        assert_eq!(heap.current_median().resolution(), Resolution::Averaged);
        heap.push(rec(30));
        assert_eq!(heap.current_median(), MedianResult::Exact { record: rec(20) });
        heap.push(rec(40));
        let m = heap.current_median();
        assert_eq!(
            m,
            MedianResult::Averaged {
                lower: rec(20),
                upper: rec(30),
            }
        );
        assert_eq!(m.value(), Some(25.0));
    }

    #[test]
    fn descending_input_stays_balanced() {
        let mut heap = DualHeapMedian::new();
        for age in (1..=50).rev() {
            heap.push(rec(age));
            assert!(heap.invariants_hold(), "after inserting {age}: {:?}", heap.heap_sizes());
        }
        // 1..=50 の中央は 25 と 26
        assert_eq!(heap.current_median().doubled(), Some(51));
    }

    #[test]
    fn equal_roots_are_exact_lower_holder() {
        let mut heap = DualHeapMedian::new();
        heap.push(Record::new(30, "Doe, Jane"));
        heap.push(Record::new(30, "Lee, Sam"));
        assert_eq!(heap.heap_sizes(), (1, 1));
        let m = heap.current_median();
        assert_eq!(m.resolution(), Resolution::Exact);
        assert_eq!(m.value(), Some(30.0));
        let holder = m.holder();
        assert!(holder == "Doe, Jane" || holder == "Lee, Sam", "{holder}");
    }

    #[test]
    fn reading_twice_is_idempotent() {
        let heap: DualHeapMedian = [5, 1, 9, 3].into_iter().map(rec).collect();
        let first = heap.current_median();
        let second = heap.current_median();
        assert_eq!(first, second);
        assert_eq!(heap.len(), 4);
    }
}
