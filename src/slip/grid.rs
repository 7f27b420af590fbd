//! Grid builder: the full ordered universe of numbers for a digit count, and ways to slice it for display.
use std::collections::BTreeMap;

use crate::slip::types::{MAX_DIGITS, MIN_DIGITS, is_digits};

/// Every zero-padded number with `digits` digits, ascending. Empty when `digits` is outside 1..=4.
pub fn generate_grid(digits: u8) -> Vec<String> {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return Vec::new();
    }
    let width = usize::from(digits);
    (0..10usize.pow(digits.into()))
        .map(|n| format!("{n:0width$}"))
        .collect()
}

/// Numbers containing `query` as a literal substring. An empty query keeps everything.
pub fn filter_by_substring(numbers: &[String], query: &str) -> Vec<String> {
    if query.is_empty() {
        return numbers.to_vec();
    }
    numbers
        .iter()
        .filter(|number| number.contains(query))
        .cloned()
        .collect()
}

/// Splits numbers into display groups of `size`. The last group may be shorter.
pub fn chunk_grid(numbers: &[String], size: usize) -> Vec<Vec<String>> {
    if size == 0 {
        return Vec::new();
    }
    numbers.chunks(size).map(<[String]>::to_vec).collect()
}

/// Numbers sharing a leading digit, e.g. "300" holds "300" through "399".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HundredBucket {
    pub key: String,
    pub numbers: Vec<String>,
}

/// A list of numbers that are all exactly three digits long.
///
/// Grouping by leading hundred only makes sense for three-digit numbers, so it is only offered here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreeDigitGrid(Vec<String>);

impl ThreeDigitGrid {
    /// "000" through "999".
    pub fn full() -> Self {
        ThreeDigitGrid(generate_grid(3))
    }

    /// Wraps `numbers`, or returns `None` if any of them is not three digits.
    pub fn try_from_numbers<I, S>(numbers: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        numbers
            .into_iter()
            .map(Into::into)
            .map(|number: String| is_digits(&number, 3).then_some(number))
            .collect::<Option<Vec<_>>>()
            .map(ThreeDigitGrid)
    }

    /// Gets the numbers in the grid.
    pub fn numbers(&self) -> &[String] {
        &self.0
    }

    /// Unwraps the grid into its numbers.
    pub fn into_numbers(self) -> Vec<String> {
        self.0
    }

    /// Narrows the grid by substring, keeping it a three-digit grid.
    pub fn filter(&self, query: &str) -> Self {
        ThreeDigitGrid(filter_by_substring(&self.0, query))
    }

    /// Buckets keyed by leading digit + "00", in ascending key order. Members keep their order.
    pub fn group_by_leading_hundred(&self) -> Vec<HundredBucket> {
        let mut buckets: BTreeMap<u8, Vec<String>> = BTreeMap::new();
        for number in &self.0 {
            buckets
                .entry(number.as_bytes()[0])
                .or_default()
                .push(number.clone());
        }
        buckets
            .into_iter()
            .map(|(lead, numbers)| HundredBucket {
                key: format!("{}00", char::from(lead)),
                numbers,
            })
            .collect()
    }
}
