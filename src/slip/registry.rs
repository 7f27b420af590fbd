//! Bet-type registry: the descriptor for each bet type plus the declared conflicts between them.
//!
//! A registry is plain configuration. It is built once, validated when it is built, and only
//! read afterwards, so it can be shared freely between sessions.
use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    path::Path,
};

use csv::{ReaderBuilder, Trim};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::slip::types::{BetType, MAX_DIGITS, MIN_DIGITS, Money, deserialize_money};

/// Shape and limits of a single bet type.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BetTypeDescriptor {
    #[serde(rename = "id")]
    bet_type: BetType,
    label: String,
    /// Exact length a candidate number must have.
    digits: u8,
    /// Nominal payout multiplier applied to the stake.
    payout: Money,
    min_stake: Money,
    max_stake: Money,
}

impl BetTypeDescriptor {
    /// Creates a descriptor. It is checked when the registry is built.
    pub fn new(
        bet_type: BetType,
        label: impl Into<String>,
        digits: u8,
        payout: Money,
        min_stake: Money,
        max_stake: Money,
    ) -> Self {
        BetTypeDescriptor {
            bet_type,
            label: label.into(),
            digits,
            payout,
            min_stake,
            max_stake,
        }
    }

    /// Gets the bet type this descriptor configures.
    pub fn get_bet_type(&self) -> BetType {
        self.bet_type
    }

    /// Gets the display label.
    pub fn get_label(&self) -> &str {
        &self.label
    }

    /// Gets the digit count a number must have.
    pub fn get_digits(&self) -> u8 {
        self.digits
    }

    /// Gets the nominal payout multiplier.
    pub fn get_payout(&self) -> Money {
        self.payout
    }

    /// Gets the smallest accepted stake.
    pub fn get_min_stake(&self) -> Money {
        self.min_stake
    }

    /// Gets the largest accepted stake.
    pub fn get_max_stake(&self) -> Money {
        self.max_stake
    }

    /// Whether `stake` lies within the configured bounds (inclusive).
    pub fn accepts_stake(&self, stake: Money) -> bool {
        self.min_stake <= stake && stake <= self.max_stake
    }

    fn check(&self) -> Result<(), RegistryError> {
        let invalid = |reason: &str| RegistryError::InvalidDescriptor {
            id: self.bet_type.to_string(),
            reason: reason.to_string(),
        };
        if self.label.trim().is_empty() {
            return Err(invalid("label is empty"));
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&self.digits) {
            return Err(invalid("digit count must be between 1 and 4"));
        }
        if self.payout <= Money::ZERO {
            return Err(invalid("payout multiplier must be positive"));
        }
        if self.min_stake < Money::ZERO {
            return Err(invalid("minimum stake must not be negative"));
        }
        if self.min_stake > self.max_stake {
            return Err(invalid("minimum stake exceeds maximum stake"));
        }
        Ok(())
    }
}

/// Errors raised while building or querying a registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Unknown bet type: {0}")]
    UnknownBetType(String),
    #[error("Invalid descriptor for {id}: {reason}")]
    InvalidDescriptor { id: String, reason: String },
    #[error("Invalid conflict for {id}: {reason}")]
    InvalidConflict { id: String, reason: String },
    #[error("Failed to read registry table: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of a registry CSV table.
#[derive(Deserialize, Debug)]
struct DescriptorRecord {
    id: String,
    label: String,
    digits: u8,
    #[serde(deserialize_with = "deserialize_money")]
    payout: Money,
    #[serde(deserialize_with = "deserialize_money")]
    min_stake: Money,
    #[serde(deserialize_with = "deserialize_money")]
    max_stake: Money,
    /// `|`-separated bet-type ids that cannot share a slip with this one.
    #[serde(default)]
    conflicts: Option<String>,
}

fn parse_id(id: &str) -> Result<BetType, RegistryError> {
    id.parse()
        .map_err(|_| RegistryError::UnknownBetType(id.to_string()))
}

/// Lookup from bet type to descriptor, together with the conflict sets.
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: BTreeMap<BetType, BetTypeDescriptor>,
    conflicts: BTreeMap<BetType, BTreeSet<BetType>>,
}

impl Registry {
    /// Builds a registry, rejecting malformed descriptors, repeated bet types and bad conflict pairs.
    /// Conflicts are symmetric: declaring `(a, b)` also forbids `b` alongside `a`.
    pub fn new(
        descriptors: impl IntoIterator<Item = BetTypeDescriptor>,
        conflicts: impl IntoIterator<Item = (BetType, BetType)>,
    ) -> Result<Self, RegistryError> {
        let mut table = BTreeMap::new();
        for descriptor in descriptors {
            descriptor.check()?;
            let bet_type = descriptor.bet_type;
            if table.insert(bet_type, descriptor).is_some() {
                return Err(RegistryError::InvalidDescriptor {
                    id: bet_type.to_string(),
                    reason: "declared more than once".to_string(),
                });
            }
        }

        let mut conflict_sets: BTreeMap<BetType, BTreeSet<BetType>> = BTreeMap::new();
        for (a, b) in conflicts {
            if a == b {
                return Err(RegistryError::InvalidConflict {
                    id: a.to_string(),
                    reason: "a bet type cannot conflict with itself".to_string(),
                });
            }
            for side in [a, b] {
                if !table.contains_key(&side) {
                    return Err(RegistryError::InvalidConflict {
                        id: a.to_string(),
                        reason: format!("{side} is not configured"),
                    });
                }
            }
            conflict_sets.entry(a).or_default().insert(b);
            conflict_sets.entry(b).or_default().insert(a);
        }

        Ok(Registry {
            descriptors: table,
            conflicts: conflict_sets,
        })
    }

    /// Loads a registry from CSV with the columns `id,label,digits,payout,min_stake,max_stake,conflicts`.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, RegistryError> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut descriptors = Vec::new();
        let mut conflicts = Vec::new();
        for record in reader.deserialize::<DescriptorRecord>() {
            let record = record?;
            let bet_type = parse_id(&record.id)?;
            for other in record
                .conflicts
                .as_deref()
                .unwrap_or_default()
                .split('|')
                .map(str::trim)
                .filter(|id| !id.is_empty())
            {
                conflicts.push((bet_type, parse_id(other)?));
            }
            descriptors.push(BetTypeDescriptor::new(
                bet_type,
                record.label,
                record.digits,
                record.payout,
                record.min_stake,
                record.max_stake,
            ));
        }
        let registry = Registry::new(descriptors, conflicts)?;
        info!(
            bet_types = registry.descriptors.len(),
            conflicts = registry.conflicts.len(),
            "Loaded bet-type registry"
        );
        Ok(registry)
    }

    /// Loads a registry table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Registry::from_csv_reader(file)
    }

    /// Retrieves the descriptor of a bet type.
    pub fn get(&self, bet_type: BetType) -> Result<&BetTypeDescriptor, RegistryError> {
        self.descriptors
            .get(&bet_type)
            .ok_or_else(|| RegistryError::UnknownBetType(bet_type.to_string()))
    }

    /// Retrieves a descriptor by its wire identifier.
    pub fn lookup(&self, id: &str) -> Result<&BetTypeDescriptor, RegistryError> {
        self.get(parse_id(id)?)
    }

    /// Bet types that cannot be selected together with `bet_type`.
    pub fn conflicts(&self, bet_type: BetType) -> impl Iterator<Item = BetType> + '_ {
        self.conflicts.get(&bet_type).into_iter().flatten().copied()
    }

    /// Whether `a` and `b` are declared as mutually exclusive.
    pub fn is_conflicting(&self, a: BetType, b: BetType) -> bool {
        self.conflicts
            .get(&a)
            .is_some_and(|others| others.contains(&b))
    }

    /// Configured bet types, in bet-type order.
    pub fn bet_types(&self) -> impl Iterator<Item = BetType> + '_ {
        self.descriptors.keys().copied()
    }
}

impl Default for Registry {
    /// The standard table, with no conflicts declared.
    fn default() -> Self {
        let descriptors = [
            (BetType::TengBon4, "4 ตัวบน", 4, dec!(6000), dec!(500)),
            (BetType::Tode4, "4 ตัวโต๊ด", 4, dec!(250), dec!(500)),
            (BetType::TengBon3, "3 ตัวบน", 3, dec!(900), dec!(1000)),
            (BetType::Tode3, "3 ตัวโต๊ด", 3, dec!(150), dec!(1000)),
            (BetType::TengLang3, "3 ตัวล่าง", 3, dec!(450), dec!(1000)),
            (BetType::SongBon, "2 ตัวบน", 2, dec!(90), dec!(2000)),
            (BetType::SongLang, "2 ตัวล่าง", 2, dec!(90), dec!(2000)),
            (BetType::WingBon, "วิ่งบน", 1, dec!(3.2), dec!(5000)),
            (BetType::WingLang, "วิ่งล่าง", 1, dec!(4.2), dec!(5000)),
        ]
        .into_iter()
        .map(|(bet_type, label, digits, payout, max_stake)| {
            let descriptor =
                BetTypeDescriptor::new(bet_type, label, digits, payout, dec!(1), max_stake);
            (bet_type, descriptor)
        })
        .collect();

        Registry {
            descriptors,
            conflicts: BTreeMap::new(),
        }
    }
}
