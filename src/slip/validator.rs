//! Validator: checks a candidate bet against its bet type and against the slip it is joining.
//!
//! The predicates return `false` rather than erroring on unknown bet types, since they are asked
//! on every keystroke. [`Validator::check`] reports which rule failed.
use crate::slip::{
    BetLine, BetTypeDescriptor, Registry, Slip, SlipError,
    types::{BetType, Money},
};

/// True if `lines` already plays `number` under `bet_type`.
pub fn is_duplicate(number: &str, bet_type: BetType, lines: &[BetLine]) -> bool {
    lines.iter().any(|line| line.matches(number, bet_type))
}

/// Validation rules backed by a registry.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a Registry,
}

impl<'a> Validator<'a> {
    /// Creates a validator over `registry`.
    pub fn new(registry: &'a Registry) -> Self {
        Validator { registry }
    }

    /// True if `number` has exactly the digit count `bet_type` asks for.
    /// False if the bet type is not configured.
    pub fn validate_length(&self, number: &str, bet_type: BetType) -> bool {
        self.registry
            .get(bet_type)
            .is_ok_and(|descriptor| number.chars().count() == usize::from(descriptor.get_digits()))
    }

    /// True if `candidate` is declared as conflicting with any of `selected`.
    pub fn has_conflict<I>(&self, candidate: BetType, selected: I) -> bool
    where
        I: IntoIterator<Item = BetType>,
    {
        self.find_conflict(candidate, selected).is_some()
    }

    fn find_conflict<I>(&self, candidate: BetType, selected: I) -> Option<BetType>
    where
        I: IntoIterator<Item = BetType>,
    {
        selected
            .into_iter()
            .find(|existing| self.registry.is_conflicting(candidate, *existing))
    }

    /// Runs every rule for adding a line to `slip` and returns the descriptor to snapshot from.
    /// Rules run in order: bet type known, length, conflict, duplicate, stake bounds.
    pub fn check(
        &self,
        number: &str,
        bet_type: BetType,
        stake: Money,
        slip: &Slip,
    ) -> Result<&'a BetTypeDescriptor, SlipError> {
        let descriptor = self
            .registry
            .get(bet_type)
            .map_err(|_| SlipError::UnknownBetType(bet_type))?;
        if !self.validate_length(number, bet_type) {
            return Err(SlipError::InvalidLength {
                number: number.to_string(),
                bet_type,
                expected: descriptor.get_digits(),
            });
        }
        if let Some(existing) = self.find_conflict(bet_type, slip.bet_types()) {
            return Err(SlipError::Conflict {
                candidate: bet_type,
                existing,
            });
        }
        if slip.contains(number, bet_type) {
            return Err(SlipError::Duplicate {
                number: number.to_string(),
                bet_type,
            });
        }
        if stake < Money::ZERO {
            return Err(SlipError::NegativeStake);
        }
        if !descriptor.accepts_stake(stake) {
            return Err(SlipError::StakeOutOfRange {
                bet_type,
                stake,
                min: descriptor.get_min_stake(),
                max: descriptor.get_max_stake(),
            });
        }
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn registry_with_conflict() -> Registry {
        Registry::new(
            [
                BetTypeDescriptor::new(BetType::TengBon3, "3 top", 3, dec!(900), dec!(1), dec!(100)),
                BetTypeDescriptor::new(BetType::Tode3, "3 any", 3, dec!(150), dec!(1), dec!(100)),
                BetTypeDescriptor::new(BetType::SongBon, "2 top", 2, dec!(90), dec!(1), dec!(100)),
            ],
            [(BetType::TengBon3, BetType::Tode3)],
        )
        .unwrap()
    }

    #[test]
    fn test_validate_length() {
        let registry = Registry::default();
        let validator = Validator::new(&registry);
        assert!(validator.validate_length("123", BetType::TengBon3));
        assert!(!validator.validate_length("123", BetType::SongBon));
        assert!(validator.validate_length("05", BetType::SongBon));
        assert!(!validator.validate_length("5", BetType::SongBon));
    }

    #[test]
    fn test_validate_length_unconfigured() {
        let registry = registry_with_conflict();
        let validator = Validator::new(&registry);
        assert!(!validator.validate_length("1", BetType::WingBon));
    }

    #[test]
    fn test_no_conflicts_by_default() {
        let registry = Registry::default();
        let validator = Validator::new(&registry);
        for candidate in BetType::ALL {
            for selected in BetType::ALL {
                assert!(!validator.has_conflict(candidate, [selected]));
            }
        }
    }

    #[test]
    fn test_declared_conflict() {
        let registry = registry_with_conflict();
        let validator = Validator::new(&registry);
        assert!(validator.has_conflict(BetType::Tode3, [BetType::SongBon, BetType::TengBon3]));
        assert!(validator.has_conflict(BetType::TengBon3, [BetType::Tode3]));
        assert!(!validator.has_conflict(BetType::SongBon, [BetType::Tode3]));
        assert!(!validator.has_conflict(BetType::Tode3, []));
    }

    #[test]
    fn test_is_duplicate() {
        let mut slip = Slip::new();
        assert!(!is_duplicate("12", BetType::SongBon, slip.lines()));
        slip.add(BetLine::new("12", BetType::SongBon, dec!(1), dec!(90)).unwrap())
            .unwrap();
        assert!(is_duplicate("12", BetType::SongBon, slip.lines()));
        assert!(!is_duplicate("21", BetType::SongBon, slip.lines()));
        assert!(!is_duplicate("12", BetType::SongLang, slip.lines()));
    }

    #[test]
    fn test_check_rules_in_order() {
        let registry = registry_with_conflict();
        let validator = Validator::new(&registry);
        let mut slip = Slip::new();

        assert_eq!(
            validator.check("1", BetType::WingBon, dec!(1), &slip),
            Err(SlipError::UnknownBetType(BetType::WingBon))
        );
        assert!(matches!(
            validator.check("12", BetType::TengBon3, dec!(1), &slip),
            Err(SlipError::InvalidLength { expected: 3, .. })
        ));

        let descriptor = validator.check("123", BetType::TengBon3, dec!(5), &slip).unwrap();
        slip.add(BetLine::new("123", BetType::TengBon3, dec!(5), descriptor.get_payout()).unwrap())
            .unwrap();

        assert_eq!(
            validator.check("456", BetType::Tode3, dec!(1), &slip),
            Err(SlipError::Conflict {
                candidate: BetType::Tode3,
                existing: BetType::TengBon3
            })
        );
        assert!(matches!(
            validator.check("123", BetType::TengBon3, dec!(1), &slip),
            Err(SlipError::Duplicate { .. })
        ));
        assert!(matches!(
            validator.check("45", BetType::SongBon, dec!(101), &slip),
            Err(SlipError::StakeOutOfRange { .. })
        ));
        assert_eq!(
            validator.check("45", BetType::SongBon, dec!(-1), &slip),
            Err(SlipError::NegativeStake)
        );
        assert!(validator.check("45", BetType::SongBon, dec!(100), &slip).is_ok());
    }
}
