//! 乱択 Quickselect による順序統計量
//!
//! 範囲内から一様にピボットを選んで右端へ移し、年齢 ≤ ピボットの要素を左へ集める
//! （Lomuto 分割）。ピボットと同年齢の要素はピボットの直前にまとめるので、
//! 同年齢が大量にあっても範囲が1要素ずつしか縮まない状況にはならない。

use super::{MedianComputation, MedianResult};
use crate::record::Record;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// 年齢昇順に並べたときの順位 `k`（0始まり）の要素を返す
///
/// `items` の並びは破壊される。`k >= items.len()` なら `None`。
/// 平均 O(n)、最悪 O(n²)。
pub fn select_kth<'a, R: Rng>(
    items: &'a mut [Record],
    k: usize,
    rng: &mut R,
) -> Option<&'a Record> {
    if k >= items.len() {
        return None;
    }
    let mut lo = 0;
    let mut hi = items.len() - 1;
    // lo <= k <= hi を保つ
    while lo < hi {
        let (eq_start, pivot) = partition(items, lo, hi, rng);
        if k < eq_start {
            hi = eq_start - 1;
        } else if k > pivot {
            lo = pivot + 1;
        } else {
            return Some(&items[k]);
        }
    }
    Some(&items[lo])
}

/// `items[lo..=hi]` を分割する
///
/// 戻り値 `(eq_start, pivot)` について、`[lo, eq_start)` はピボット未満、
/// `[eq_start, pivot]` はピボットと同年齢、`(pivot, hi]` はピボットより大きい。
fn partition<R: Rng>(items: &mut [Record], lo: usize, hi: usize, rng: &mut R) -> (usize, usize) {
    let chosen = rng.random_range(lo..=hi);
    items.swap(chosen, hi);
    let pivot_age = items[hi].age();

    let mut store = lo;
    for i in lo..hi {
        if items[i].age() <= pivot_age {
            items.swap(i, store);
            store += 1;
        }
    }
    items.swap(store, hi);

    let mut eq_start = store;
    for j in (lo..store).rev() {
        if items[j].age() == pivot_age {
            eq_start -= 1;
            items.swap(j, eq_start);
        }
    }
    (eq_start, store)
}

/// 全件を溜めて Quickselect で中央値を求めるバックエンド
///
/// 本番ではOS乱数でシードし、テストでは `with_seed` で再現可能にする。
#[derive(Debug, Clone)]
pub struct SelectMedian<R = Xoshiro256PlusPlus> {
    items: Vec<Record>,
    rng: R,
}

impl SelectMedian<Xoshiro256PlusPlus> {
    pub fn new() -> Self {
        Self::with_rng(Xoshiro256PlusPlus::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl Default for SelectMedian<Xoshiro256PlusPlus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SelectMedian<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            items: Vec::new(),
            rng,
        }
    }

    pub fn push(&mut self, record: Record) {
        self.items.push(record);
    }

    /// 順位 `k` の要素（並びは変わる）
    pub fn select(&mut self, k: usize) -> Option<Record> {
        select_kth(&mut self.items, k, &mut self.rng).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.items
    }
}

impl<R: Rng> MedianComputation for SelectMedian<R> {
    fn name(&self) -> &'static str {
        "select"
    }

    fn insert(&mut self, record: Record) {
        self.push(record);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn median(&mut self) -> MedianResult {
        let n = self.items.len();
        let (lower_rank, upper_rank) = match n {
            0 => return MedianResult::Undefined,
            _ if n % 2 == 1 => (n / 2, n / 2),
            _ => (n / 2 - 1, n / 2),
        };
        match (self.select(lower_rank), self.select(upper_rank)) {
            (Some(lower), Some(upper)) => MedianResult::from_midpoints(lower, upper),
            _ => MedianResult::Undefined,
        }
    }
}

impl<R: Rng> Extend<Record> for SelectMedian<R> {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}
