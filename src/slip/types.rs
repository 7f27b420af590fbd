//! Types used throughout the bet-slip engine.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de};
use thiserror::Error;

/// Money type used for stakes and payout multipliers, carried at full precision.
pub type Money = rust_decimal::Decimal;

/// Fewest digits a bet type can ask for.
pub const MIN_DIGITS: u8 = 1;

/// Most digits a bet type can ask for.
pub const MAX_DIGITS: u8 = 4;

/// Custom deserializer for monetary values, parsed from their text form so no float round-trip happens.
pub(crate) fn deserialize_money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Money::from_str(value.trim()).map_err(de::Error::custom)
}

/// Same as [`deserialize_money`], for columns that may be left empty.
pub(crate) fn deserialize_optional_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| Money::from_str(v.trim()).map_err(de::Error::custom))
        .transpose()
}

/// Bet types offered on the slip. The serialized form is the identifier used by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    #[serde(rename = "teng_bon_4")]
    TengBon4,
    #[serde(rename = "tode_4")]
    Tode4,
    #[serde(rename = "teng_bon_3")]
    TengBon3,
    #[serde(rename = "tode_3")]
    Tode3,
    #[serde(rename = "teng_lang_3")]
    TengLang3,
    SongBon,
    SongLang,
    WingBon,
    WingLang,
}

impl BetType {
    /// Every bet type, in declaration order.
    pub const ALL: [BetType; 9] = [
        BetType::TengBon4,
        BetType::Tode4,
        BetType::TengBon3,
        BetType::Tode3,
        BetType::TengLang3,
        BetType::SongBon,
        BetType::SongLang,
        BetType::WingBon,
        BetType::WingLang,
    ];

    /// The wire-level identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::TengBon4 => "teng_bon_4",
            BetType::Tode4 => "tode_4",
            BetType::TengBon3 => "teng_bon_3",
            BetType::Tode3 => "tode_3",
            BetType::TengLang3 => "teng_lang_3",
            BetType::SongBon => "song_bon",
            BetType::SongLang => "song_lang",
            BetType::WingBon => "wing_bon",
            BetType::WingLang => "wing_lang",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a wire identifier names no known bet type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown bet type: {0}")]
pub struct ParseBetTypeError(pub String);

impl FromStr for BetType {
    type Err = ParseBetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BetType::ALL
            .into_iter()
            .find(|bet_type| bet_type.as_str() == s)
            .ok_or_else(|| ParseBetTypeError(s.to_string()))
    }
}

/// True if `input` is exactly `len` ASCII digits.
pub(crate) fn is_digits(input: &str, len: usize) -> bool {
    input.len() == len && input.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        for bet_type in BetType::ALL {
            assert_eq!(bet_type.as_str().parse::<BetType>(), Ok(bet_type));
        }
    }

    #[test]
    fn test_serde_matches_wire_form() {
        #[derive(Deserialize)]
        struct Row {
            bet_type: BetType,
        }
        let mut reader = csv::Reader::from_reader("bet_type\nteng_bon_3\nsong_lang\n".as_bytes());
        let rows: Vec<BetType> = reader
            .deserialize::<Row>()
            .map(|row| row.unwrap().bet_type)
            .collect();
        assert_eq!(rows, vec![BetType::TengBon3, BetType::SongLang]);
    }

    #[test]
    fn test_unknown_bet_type() {
        assert_eq!(
            "teng_bon_5".parse::<BetType>(),
            Err(ParseBetTypeError("teng_bon_5".to_string()))
        );
    }

    #[test]
    fn test_is_digits() {
        assert!(is_digits("05", 2));
        assert!(!is_digits("5", 2));
        assert!(!is_digits("5a", 2));
    }
}
