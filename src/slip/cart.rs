//! The slip (cart): the bet lines a player has picked so far.
use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crate::slip::{
    BetLine,
    aggregator::{self, Totals},
    types::{BetType, Money},
    validator,
};

/// An ordered collection of bet lines. No two lines share the same number and bet type.
#[derive(Debug, Clone, Default)]
pub struct Slip {
    lines: Vec<BetLine>,
}

impl Slip {
    /// Creates an empty slip.
    pub fn new() -> Self {
        Slip::default()
    }

    /// Gets the lines, in the order they were added.
    pub fn lines(&self) -> &[BetLine] {
        &self.lines
    }

    /// Number of lines on the slip.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the slip has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bet types already present on the slip.
    pub fn bet_types(&self) -> BTreeSet<BetType> {
        self.lines.iter().map(BetLine::get_bet_type).collect()
    }

    /// Whether the slip already plays `number` under `bet_type`.
    pub fn contains(&self, number: &str, bet_type: BetType) -> bool {
        validator::is_duplicate(number, bet_type, &self.lines)
    }

    /// Appends a line. Returns an error if the slip already plays that number under that bet type.
    pub fn add(&mut self, line: BetLine) -> Result<(), SlipError> {
        if self.contains(line.get_number(), line.get_bet_type()) {
            return Err(SlipError::Duplicate {
                number: line.get_number().to_string(),
                bet_type: line.get_bet_type(),
            });
        }
        debug!(
            number = line.get_number(),
            bet_type = %line.get_bet_type(),
            stake = %line.get_stake(),
            "Added line to slip"
        );
        self.lines.push(line);
        Ok(())
    }

    /// Removes and returns the line for `number` under `bet_type`.
    pub fn remove(&mut self, number: &str, bet_type: BetType) -> Result<BetLine, SlipError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.matches(number, bet_type))
            .ok_or_else(|| SlipError::LineNotFound {
                number: number.to_string(),
                bet_type,
            })?;
        Ok(self.lines.remove(index))
    }

    /// Removes every line, cancelling the slip.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Stake and potential-win totals of the slip.
    pub fn totals(&self) -> Totals {
        aggregator::compute_totals(&self.lines)
    }

    /// Hands the lines over for submission, ending the slip.
    pub fn submit(self) -> Vec<BetLine> {
        self.lines
    }
}

/// Reasons a line cannot go on, or come off, a slip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlipError {
    #[error("Bet type {0} is not configured")]
    UnknownBetType(BetType),
    #[error("Number {number} must have {expected} digits for {bet_type}")]
    InvalidLength {
        number: String,
        bet_type: BetType,
        expected: u8,
    },
    #[error("Bet type {candidate} cannot be combined with {existing}")]
    Conflict {
        candidate: BetType,
        existing: BetType,
    },
    #[error("Number {number} is already on the slip for {bet_type}")]
    Duplicate { number: String, bet_type: BetType },
    #[error("Stake {stake} for {bet_type} is outside {min}..={max}")]
    StakeOutOfRange {
        bet_type: BetType,
        stake: Money,
        min: Money,
        max: Money,
    },
    #[error("Stake must not be negative")]
    NegativeStake,
    #[error("Payout multiplier must not be negative")]
    NegativePayout,
    #[error("Pattern {pattern} produced no numbers for input {input:?}")]
    EmptyPattern { pattern: String, input: String },
    #[error("No line for number {number} with {bet_type}")]
    LineNotFound { number: String, bet_type: BetType },
}
