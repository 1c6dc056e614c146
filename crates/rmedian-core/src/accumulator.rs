//! 年齢の合計と件数の集計
//!
//! ソースごとの集計は独立しており、`merge` は結合的かつ可換。

use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// `(合計年齢, 件数)` の組
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgeTotals {
    total_age: u64,
    count: u64,
}

impl AgeTotals {
    pub const ZERO: AgeTotals = AgeTotals {
        total_age: 0,
        count: 0,
    };

    pub fn new(total_age: u64, count: u64) -> Self {
        Self { total_age, count }
    }

    #[inline]
    pub fn push(&mut self, age: u16) {
        self.total_age += u64::from(age);
        self.count += 1;
    }

    #[inline]
    pub fn merge(self, other: AgeTotals) -> AgeTotals {
        AgeTotals {
            total_age: self.total_age + other.total_age,
            count: self.count + other.count,
        }
    }

    #[inline]
    pub fn total_age(&self) -> u64 {
        self.total_age
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 平均年齢（小数点以下2桁に丸め）。件数0なら 0。
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        round2(self.total_age as f64 / self.count as f64)
    }
}

impl Add for AgeTotals {
    type Output = AgeTotals;

    fn add(self, rhs: AgeTotals) -> AgeTotals {
        self.merge(rhs)
    }
}

impl AddAssign for AgeTotals {
    fn add_assign(&mut self, rhs: AgeTotals) {
        *self = self.merge(rhs);
    }
}

impl Sum for AgeTotals {
    fn sum<I: Iterator<Item = AgeTotals>>(iter: I) -> Self {
        iter.fold(AgeTotals::ZERO, AgeTotals::merge)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
