//! Aggregator: stake and potential-win totals over a slip's lines. No rounding is applied.
use std::{
    collections::BTreeMap,
    iter::Sum,
    ops::Add,
};

use serde::Serialize;

use crate::slip::{
    BetLine,
    types::{BetType, Money},
};

/// Slip-level totals.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub line_count: usize,
    pub total_stake: Money,
    pub total_potential_win: Money,
}

impl From<&BetLine> for Totals {
    fn from(line: &BetLine) -> Self {
        Totals {
            line_count: 1,
            total_stake: line.get_stake(),
            total_potential_win: line.potential_win(),
        }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals {
            line_count: self.line_count + other.line_count,
            total_stake: self.total_stake + other.total_stake,
            total_potential_win: self.total_potential_win + other.total_potential_win,
        }
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Self {
        iter.fold(Totals::default(), Add::add)
    }
}

/// `stake × multiplier`. Both must be non-negative; the caller guarantees it.
pub fn potential_win(stake: Money, multiplier: Money) -> Money {
    debug_assert!(stake >= Money::ZERO, "negative stake {stake}");
    debug_assert!(multiplier >= Money::ZERO, "negative multiplier {multiplier}");
    stake * multiplier
}

/// Sums stake and potential win over `lines`. An empty slice gives all zeros.
pub fn compute_totals(lines: &[BetLine]) -> Totals {
    lines.iter().map(Totals::from).sum()
}

/// Totals per bet type, in bet-type order.
pub fn totals_by_bet_type(lines: &[BetLine]) -> BTreeMap<BetType, Totals> {
    let mut totals: BTreeMap<BetType, Totals> = BTreeMap::new();
    for line in lines {
        let entry = totals.entry(line.get_bet_type()).or_default();
        *entry = *entry + Totals::from(line);
    }
    totals
}
