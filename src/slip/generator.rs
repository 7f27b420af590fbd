//! Number generators: each expands a short input into the full set of numbers a named pattern implies.
//!
//! Every generator is deterministic and returns its numbers in ascending string order with no
//! duplicates. Input of the wrong length, or input containing anything but digits, yields an empty
//! result, since the input is typed one digit at a time.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slip::types::{MAX_DIGITS, is_digits};

fn pair(first: u8, second: u8) -> String {
    [char::from(first), char::from(second)].iter().collect()
}

fn single_digit(input: &str) -> Option<u8> {
    is_digits(input, 1).then(|| input.as_bytes()[0])
}

fn two_digit_range(values: impl Iterator<Item = u8>) -> Vec<String> {
    values.map(|n| format!("{n:02}")).collect()
}

/// Two-digit numbers with `digit` in either position. Always 19 distinct numbers.
pub fn gate_19(digit: &str) -> Vec<String> {
    let Some(d) = single_digit(digit) else {
        return Vec::new();
    };
    let mut numbers: Vec<String> = (b'0'..=b'9')
        .flat_map(|other| [pair(d, other), pair(other, d)])
        .collect();
    numbers.sort();
    numbers.dedup();
    numbers
}

/// "00", "11", ... "99".
pub fn doubled() -> Vec<String> {
    (b'0'..=b'9').map(|d| pair(d, d)).collect()
}

/// `digit` followed by each of 0-9.
pub fn leading_run(digit: &str) -> Vec<String> {
    let Some(d) = single_digit(digit) else {
        return Vec::new();
    };
    (b'0'..=b'9').map(|other| pair(d, other)).collect()
}

/// Each of 0-9 followed by `digit`.
pub fn trailing_run(digit: &str) -> Vec<String> {
    let Some(d) = single_digit(digit) else {
        return Vec::new();
    };
    (b'0'..=b'9').map(|other| pair(other, d)).collect()
}

/// "00" to "49".
pub fn low_half() -> Vec<String> {
    two_digit_range(0..50)
}

/// "50" to "99".
pub fn high_half() -> Vec<String> {
    two_digit_range(50..100)
}

/// Even two-digit numbers, "00" to "98".
pub fn even() -> Vec<String> {
    two_digit_range((0..100).step_by(2))
}

/// Odd two-digit numbers, "01" to "99".
pub fn odd() -> Vec<String> {
    two_digit_range((1..100).step_by(2))
}

fn permute(digits: &mut [u8], k: usize, out: &mut Vec<String>) {
    if k == digits.len() {
        out.push(digits.iter().copied().map(char::from).collect());
        return;
    }
    for i in k..digits.len() {
        digits.swap(k, i);
        permute(digits, k + 1, out);
        digits.swap(k, i);
    }
}

/// All distinct orderings of the digits of `number`, sorted. Repeated digits collapse the
/// duplicate orderings, so "112" gives three numbers and "111" gives one.
pub fn permutations(number: &str) -> Vec<String> {
    if number.is_empty()
        || number.len() > usize::from(MAX_DIGITS)
        || !is_digits(number, number.len())
    {
        return Vec::new();
    }
    let mut digits = number.as_bytes().to_vec();
    let mut out = Vec::new();
    permute(&mut digits, 0, &mut out);
    out.sort();
    out.dedup();
    out
}

fn permute_exact(number: &str, len: usize) -> Vec<String> {
    if !is_digits(number, len) {
        return Vec::new();
    }
    permutations(number)
}

/// Orderings of a two-digit number.
pub fn permute_2(number: &str) -> Vec<String> {
    permute_exact(number, 2)
}

/// Orderings of a three-digit number.
pub fn permute_3(number: &str) -> Vec<String> {
    permute_exact(number, 3)
}

/// Orderings of a four-digit number.
pub fn permute_4(number: &str) -> Vec<String> {
    permute_exact(number, 4)
}

/// Named shorthand patterns, as offered by the bet-placement page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    #[serde(rename = "nineteen_gate")]
    Gate19,
    #[serde(rename = "ble")]
    Doubled,
    #[serde(rename = "rood_nha")]
    LeadingRun,
    #[serde(rename = "rood_lang")]
    TrailingRun,
    #[serde(rename = "song_tam")]
    LowHalf,
    #[serde(rename = "song_sung")]
    HighHalf,
    #[serde(rename = "song_ku")]
    Even,
    #[serde(rename = "song_kee")]
    Odd,
    #[serde(rename = "shuffle_num_2")]
    Permute2,
    #[serde(rename = "shuffle_num_3")]
    Permute3,
    #[serde(rename = "shuffle_num_4")]
    Permute4,
}

impl Pattern {
    /// Every pattern, in declaration order.
    pub const ALL: [Pattern; 11] = [
        Pattern::Gate19,
        Pattern::Doubled,
        Pattern::LeadingRun,
        Pattern::TrailingRun,
        Pattern::LowHalf,
        Pattern::HighHalf,
        Pattern::Even,
        Pattern::Odd,
        Pattern::Permute2,
        Pattern::Permute3,
        Pattern::Permute4,
    ];

    /// The wire-level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Gate19 => "nineteen_gate",
            Pattern::Doubled => "ble",
            Pattern::LeadingRun => "rood_nha",
            Pattern::TrailingRun => "rood_lang",
            Pattern::LowHalf => "song_tam",
            Pattern::HighHalf => "song_sung",
            Pattern::Even => "song_ku",
            Pattern::Odd => "song_kee",
            Pattern::Permute2 => "shuffle_num_2",
            Pattern::Permute3 => "shuffle_num_3",
            Pattern::Permute4 => "shuffle_num_4",
        }
    }

    /// Number of digits the pattern takes as input; 0 means it takes none.
    pub fn input_digits(&self) -> usize {
        match self {
            Pattern::Gate19 | Pattern::LeadingRun | Pattern::TrailingRun => 1,
            Pattern::Doubled
            | Pattern::LowHalf
            | Pattern::HighHalf
            | Pattern::Even
            | Pattern::Odd => 0,
            Pattern::Permute2 => 2,
            Pattern::Permute3 => 3,
            Pattern::Permute4 => 4,
        }
    }

    /// Expands the pattern. Input is ignored by patterns that take none.
    pub fn expand(&self, input: &str) -> Vec<String> {
        match self {
            Pattern::Gate19 => gate_19(input),
            Pattern::Doubled => doubled(),
            Pattern::LeadingRun => leading_run(input),
            Pattern::TrailingRun => trailing_run(input),
            Pattern::LowHalf => low_half(),
            Pattern::HighHalf => high_half(),
            Pattern::Even => even(),
            Pattern::Odd => odd(),
            Pattern::Permute2 => permute_2(input),
            Pattern::Permute3 => permute_3(input),
            Pattern::Permute4 => permute_4(input),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a wire name names no known pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown pattern: {0}")]
pub struct ParsePatternError(pub String);

impl FromStr for Pattern {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|pattern| pattern.as_str() == s)
            .ok_or_else(|| ParsePatternError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn assert_sorted_unique(numbers: &[String]) {
        assert!(numbers.windows(2).all(|w| w[0] < w[1]), "{numbers:?}");
    }

    #[test]
    fn test_leading_run() {
        assert_eq!(
            leading_run("5"),
            strings(&["50", "51", "52", "53", "54", "55", "56", "57", "58", "59"])
        );
    }

    #[test]
    fn test_trailing_run() {
        assert_eq!(
            trailing_run("5"),
            strings(&["05", "15", "25", "35", "45", "55", "65", "75", "85", "95"])
        );
    }

    #[test]
    fn test_permute_2() {
        assert_eq!(permute_2("12"), strings(&["12", "21"]));
        assert_eq!(permute_2("33"), strings(&["33"]));
    }

    #[test]
    fn test_permute_3_with_repeats() {
        assert_eq!(permute_3("121"), strings(&["112", "121", "211"]));
        assert_eq!(permute_3("777"), strings(&["777"]));
        assert_eq!(
            permute_3("123"),
            strings(&["123", "132", "213", "231", "312", "321"])
        );
    }

    #[test]
    fn test_permute_4_sizes() {
        assert_eq!(permute_4("1234").len(), 24);
        assert_eq!(permute_4("1123").len(), 12);
        assert_eq!(permute_4("1122").len(), 6);
        assert_eq!(permute_4("1112").len(), 4);
        assert_eq!(permute_4("0000"), strings(&["0000"]));
    }

    #[test]
    fn test_wrong_length_is_empty() {
        assert!(gate_19("").is_empty());
        assert!(gate_19("12").is_empty());
        assert!(leading_run("x").is_empty());
        assert!(trailing_run("").is_empty());
        assert!(permute_2("1").is_empty());
        assert!(permute_3("12").is_empty());
        assert!(permute_3("1a3").is_empty());
        assert!(permute_4("12345").is_empty());
        assert!(permutations("").is_empty());
        assert!(permutations("12345").is_empty());
    }

    #[test]
    fn test_fixed_sets() {
        assert_eq!(doubled().len(), 10);
        assert!(doubled().iter().all(|n| n[..1] == n[1..]));

        let low = low_half();
        assert_eq!(low.len(), 50);
        assert_eq!(low.first().map(String::as_str), Some("00"));
        assert_eq!(low.last().map(String::as_str), Some("49"));

        let high = high_half();
        assert_eq!(high.len(), 50);
        assert_eq!(high.first().map(String::as_str), Some("50"));
        assert_eq!(high.last().map(String::as_str), Some("99"));

        let even = even();
        assert_eq!(even.len(), 50);
        assert_eq!(even.first().map(String::as_str), Some("00"));
        assert_eq!(even.last().map(String::as_str), Some("98"));

        let odd = odd();
        assert_eq!(odd.len(), 50);
        assert_eq!(odd.first().map(String::as_str), Some("01"));
        assert_eq!(odd.last().map(String::as_str), Some("99"));

        for set in [doubled(), low, high, even, odd] {
            assert_sorted_unique(&set);
        }
    }

    #[test]
    fn test_gate_19_collapses_double() {
        let numbers = gate_19("5");
        assert_eq!(numbers.len(), 19);
        assert_eq!(numbers.iter().filter(|n| *n == "55").count(), 1);
    }

    #[test]
    fn test_pattern_expand_matches_generators() {
        assert_eq!(Pattern::LeadingRun.expand("5"), leading_run("5"));
        assert_eq!(Pattern::Permute2.expand("12"), strings(&["12", "21"]));
        assert_eq!(Pattern::Doubled.expand("ignored"), doubled());
        for pattern in Pattern::ALL {
            assert_eq!(pattern.as_str().parse::<Pattern>(), Ok(pattern));
            let input = "1234"[..pattern.input_digits()].to_string();
            assert!(!pattern.expand(&input).is_empty(), "{pattern}");
        }
    }

    #[test]
    fn test_unknown_pattern() {
        assert!("rood_klang".parse::<Pattern>().is_err());
    }

    proptest! {
        #[test]
        fn prop_gate_19_contains_digit(d in 0u8..10) {
            let digit = d.to_string();
            let numbers = gate_19(&digit);
            prop_assert!(numbers.len() <= 19);
            prop_assert_eq!(numbers.len(), numbers.iter().collect::<BTreeSet<_>>().len());
            for number in &numbers {
                prop_assert_eq!(number.len(), 2);
                prop_assert!(number.contains(&digit));
            }
        }

        #[test]
        fn prop_permute_3_is_exact(n in 0u16..1000) {
            let number = format!("{n:03}");
            let numbers = permute_3(&number);
            let distinct: BTreeSet<char> = number.chars().collect();
            let expected = match distinct.len() {
                3 => 6,
                2 => 3,
                _ => 1,
            };
            prop_assert_eq!(numbers.len(), expected);
            let mut source: Vec<char> = number.chars().collect();
            source.sort_unstable();
            for candidate in &numbers {
                let mut chars: Vec<char> = candidate.chars().collect();
                chars.sort_unstable();
                prop_assert_eq!(&chars, &source);
            }
            assert_sorted_unique(&numbers);
        }

        #[test]
        fn prop_generators_are_deterministic(input in "[0-9]{0,4}") {
            for pattern in Pattern::ALL {
                prop_assert_eq!(pattern.expand(&input), pattern.expand(&input));
            }
        }
    }
}
