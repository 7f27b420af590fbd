//! A betting session: owns one slip and applies commands to it as they arrive.
use std::io;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::slip::{
    BetLine, Registry, Slip, SlipError, Validator,
    generator::Pattern,
    types::{BetType, Money, deserialize_optional_money},
};

/// A change a player makes to their slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlipCommand {
    /// Play one number.
    Add {
        number: String,
        bet_type: BetType,
        stake: Money,
    },
    /// Play every number a pattern expands to, each with the same stake.
    AddPattern {
        pattern: Pattern,
        input: String,
        bet_type: BetType,
        stake: Money,
    },
    Remove {
        number: String,
        bet_type: BetType,
    },
    Clear,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Action {
    Add,
    Remove,
    Clear,
}

/// One row of a command CSV: `action,bet_type,number,pattern,stake`.
#[derive(Deserialize, Debug)]
struct CommandRecord {
    action: Action,
    #[serde(default)]
    bet_type: Option<BetType>,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    pattern: Option<Pattern>,
    #[serde(default, deserialize_with = "deserialize_optional_money")]
    stake: Option<Money>,
}

/// Errors reading slip commands.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Malformed command row: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing {field} for {action} command")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },
}

impl TryFrom<CommandRecord> for SlipCommand {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        fn require<T>(
            value: Option<T>,
            action: &'static str,
            field: &'static str,
        ) -> Result<T, CommandError> {
            value.ok_or(CommandError::MissingField { action, field })
        }

        match record.action {
            Action::Add => {
                let bet_type = require(record.bet_type, "add", "bet_type")?;
                let stake = require(record.stake, "add", "stake")?;
                match record.pattern {
                    Some(pattern) => Ok(SlipCommand::AddPattern {
                        pattern,
                        input: record.number.unwrap_or_default(),
                        bet_type,
                        stake,
                    }),
                    None => Ok(SlipCommand::Add {
                        number: require(record.number, "add", "number")?,
                        bet_type,
                        stake,
                    }),
                }
            }
            Action::Remove => Ok(SlipCommand::Remove {
                number: require(record.number, "remove", "number")?,
                bet_type: require(record.bet_type, "remove", "bet_type")?,
            }),
            Action::Clear => Ok(SlipCommand::Clear),
        }
    }
}

/// Reads slip commands from CSV, one per row.
pub fn read_commands<R: io::Read>(
    reader: R,
) -> impl Iterator<Item = Result<SlipCommand, CommandError>> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader)
        .into_deserialize::<CommandRecord>()
        .map(|record| SlipCommand::try_from(record?))
}

/// Owns a slip and the registry it is validated against.
pub struct SlipSession {
    /// Bet-type configuration the session validates against.
    registry: Registry,
    /// The slip being built.
    slip: Slip,
    /// A channel receiver for incoming commands.
    receiver: mpsc::Receiver<SlipCommand>,
}

impl SlipSession {
    /// Creates a session with an empty slip.
    pub fn new(registry: Registry, receiver: mpsc::Receiver<SlipCommand>) -> Self {
        SlipSession {
            registry,
            slip: Slip::new(),
            receiver,
        }
    }

    /// Gets the slip built so far.
    pub fn slip(&self) -> &Slip {
        &self.slip
    }

    /// Ends the session, handing over its slip.
    pub fn into_slip(self) -> Slip {
        self.slip
    }

    /// Validates and adds a single line, snapshotting the current payout multiplier.
    fn add(&mut self, number: String, bet_type: BetType, stake: Money) -> Result<(), SlipError> {
        let payout = Validator::new(&self.registry)
            .check(&number, bet_type, stake, &self.slip)?
            .get_payout();
        self.slip.add(BetLine::new(number, bet_type, stake, payout)?)
    }

    /// Applies one command to the slip.
    ///
    /// A pattern adds each of its numbers independently: numbers that fail validation are
    /// skipped and logged, the rest are still added. If none is added, the first rejection
    /// is returned.
    pub fn apply(&mut self, command: SlipCommand) -> Result<(), SlipError> {
        match command {
            SlipCommand::Add {
                number,
                bet_type,
                stake,
            } => self.add(number, bet_type, stake),
            SlipCommand::AddPattern {
                pattern,
                input,
                bet_type,
                stake,
            } => {
                let numbers = pattern.expand(&input);
                if numbers.is_empty() {
                    return Err(SlipError::EmptyPattern {
                        pattern: pattern.to_string(),
                        input,
                    });
                }
                debug!(%pattern, %input, count = numbers.len(), "Expanded pattern");
                let mut added = 0;
                let mut first_rejection = None;
                for number in numbers {
                    match self.add(number, bet_type, stake) {
                        Ok(()) => added += 1,
                        Err(err) => {
                            warn!(%pattern, %err, "Skipped pattern number");
                            first_rejection.get_or_insert(err);
                        }
                    }
                }
                match first_rejection {
                    Some(err) if added == 0 => Err(err),
                    _ => Ok(()),
                }
            }
            SlipCommand::Remove { number, bet_type } => {
                self.slip.remove(&number, bet_type).map(|_| ())
            }
            SlipCommand::Clear => {
                self.slip.clear();
                Ok(())
            }
        }
    }

    /// Runs the session loop, applying commands until the sender side closes.
    pub async fn run(&mut self) {
        while let Some(command) = self.receiver.recv().await {
            if let Err(err) = self.apply(command) {
                warn!(%err, "Rejected slip command");
            }
        }
    }
}
