//! Bet-slip number engine: bet-type registry, number generators, grid builder, validation and totals.
pub mod aggregator;
mod cart;
pub mod generator;
pub mod grid;
mod line;
mod registry;
mod session;
mod types;
mod validator;

pub use aggregator::{Totals, compute_totals, potential_win, totals_by_bet_type};
pub use cart::*;
pub use generator::{ParsePatternError, Pattern};
pub use grid::{HundredBucket, ThreeDigitGrid, chunk_grid, filter_by_substring, generate_grid};
pub use line::*;
pub use registry::*;
pub use session::*;
pub use types::{BetType, MAX_DIGITS, MIN_DIGITS, Money, ParseBetTypeError};
pub use validator::*;
