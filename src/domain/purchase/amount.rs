//! Monetary amount held in minor currency units.

use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minor units per major unit (cents per dollar).
const MINOR_PER_MAJOR: i64 = 100;

/// A positive amount of money in minor units (e.g. cents).
///
/// Clients and the ledger speak major units; the payment provider speaks
/// minor units. Conversion happens only through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Converts a major-unit amount (e.g. dollars) to minor units.
    ///
    /// Rounds to the nearest minor unit. Rejects zero, negative, and
    /// non-finite values.
    pub fn from_major(major: f64) -> Result<Self, ValidationError> {
        if !major.is_finite() {
            return Err(ValidationError::invalid_format("amount", "must be a finite number"));
        }
        let minor = (major * MINOR_PER_MAJOR as f64).round();
        if minor < 1.0 {
            return Err(ValidationError::invalid_format("amount", "must be positive"));
        }
        if minor > i64::MAX as f64 {
            return Err(ValidationError::invalid_format("amount", "is too large"));
        }
        Ok(Self(minor as i64))
    }

    /// Wraps an amount already expressed in minor units.
    pub fn from_minor(minor: i64) -> Result<Self, ValidationError> {
        if minor < 1 {
            return Err(ValidationError::out_of_range("amount", 1, i64::MAX, minor));
        }
        Ok(Self(minor))
    }

    /// Amount in minor units, as sent to the payment provider.
    pub fn minor(&self) -> i64 {
        self.0
    }

    /// Amount in major units, as shown to clients.
    pub fn major(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns the whole major-unit value when there is no fractional part.
    pub fn whole_major(&self) -> Option<i64> {
        (self.0 % MINOR_PER_MAJOR == 0).then_some(self.0 / MINOR_PER_MAJOR)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / MINOR_PER_MAJOR, self.0 % MINOR_PER_MAJOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_major_multiplies_by_one_hundred() {
        let amount = Amount::from_major(2500.0).unwrap();
        assert_eq!(amount.minor(), 250_000);
        assert_eq!(amount.whole_major(), Some(2500));
    }

    #[test]
    fn from_major_rounds_to_nearest_cent() {
        assert_eq!(Amount::from_major(19.99).unwrap().minor(), 1999);
        assert_eq!(Amount::from_major(12.5).unwrap().minor(), 1250);
    }

    #[test]
    fn from_major_rejects_non_positive() {
        assert!(Amount::from_major(0.0).is_err());
        assert!(Amount::from_major(-5.0).is_err());
        assert!(Amount::from_major(0.001).is_err());
    }

    #[test]
    fn from_major_rejects_non_finite() {
        assert!(Amount::from_major(f64::NAN).is_err());
        assert!(Amount::from_major(f64::INFINITY).is_err());
    }

    #[test]
    fn from_minor_divides_back_to_major() {
        let amount = Amount::from_minor(250_000).unwrap();
        assert_eq!(amount.major(), 2500.0);
    }

    #[test]
    fn from_minor_rejects_zero() {
        assert!(Amount::from_minor(0).is_err());
    }

    #[test]
    fn fractional_amount_has_no_whole_major() {
        let amount = Amount::from_minor(1999).unwrap();
        assert_eq!(amount.whole_major(), None);
        assert_eq!(amount.major(), 19.99);
        assert_eq!(amount.to_string(), "19.99");
    }
}
