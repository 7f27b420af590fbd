//! A single bet line on a slip.
use serde::Serialize;

use crate::slip::{
    SlipError, aggregator,
    types::{BetType, Money},
};

/// One number backed with a stake under one bet type.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BetLine {
    /// The number as typed, leading zeros included.
    number: String,

    /// The bet type the number is played under.
    bet_type: BetType,

    /// The amount staked on this line.
    stake: Money,

    /// The payout multiplier in force when the line was added.
    payout: Money,
}

impl BetLine {
    /// Creates a line. Stake and payout must both be non-negative.
    pub fn new(
        number: impl Into<String>,
        bet_type: BetType,
        stake: Money,
        payout: Money,
    ) -> Result<Self, SlipError> {
        if stake < Money::ZERO {
            return Err(SlipError::NegativeStake);
        }
        if payout < Money::ZERO {
            return Err(SlipError::NegativePayout);
        }
        Ok(BetLine {
            number: number.into(),
            bet_type,
            stake,
            payout,
        })
    }

    /// Gets the number played.
    pub fn get_number(&self) -> &str {
        &self.number
    }

    /// Gets the bet type of the line.
    pub fn get_bet_type(&self) -> BetType {
        self.bet_type
    }

    /// Gets the stake of the line.
    pub fn get_stake(&self) -> Money {
        self.stake
    }

    /// Gets the payout multiplier snapshot.
    pub fn get_payout(&self) -> Money {
        self.payout
    }

    /// What this line pays if it wins.
    pub fn potential_win(&self) -> Money {
        aggregator::potential_win(self.stake, self.payout)
    }

    /// Whether this line plays `number` under `bet_type`. Compared as strings, so "05" is not "5".
    pub fn matches(&self, number: &str, bet_type: BetType) -> bool {
        self.number == number && self.bet_type == bet_type
    }
}
