use std::fmt;

use thiserror::Error;

/// Why a piece of amount text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("amount is not finite")]
    NotFinite,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount is too large")]
    OutOfRange,
}

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Displayed with two decimals, rounded half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;

    pub const ZERO: Amount = Amount(0);
    pub const MIN: Amount = Amount(i64::MIN);

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    pub fn scaled(self) -> i64 {
        self.0
    }

    /// Parse user-typed amount text into a strictly positive amount.
    ///
    /// Surrounding whitespace is ignored. Values too small to be represented
    /// (they round to zero) count as not positive.
    pub fn parse_positive(text: &str) -> Result<Self, AmountError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AmountError::Empty);
        }

        let value: f64 = text
            .parse()
            .map_err(|_| AmountError::NotANumber(text.to_string()))?;

        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        if value * Self::SCALE as f64 >= i64::MAX as f64 {
            return Err(AmountError::OutOfRange);
        }

        let amount = Self::from_float(value);
        if amount.0 == 0 {
            return Err(AmountError::NotPositive);
        }
        Ok(amount)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value. `MIN` saturates to the largest positive amount, which
    /// displays the same at two decimals.
    pub fn abs(self) -> Self {
        Amount(self.0.saturating_abs())
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CENT: u64 = (Amount::SCALE / 100) as u64;

        let cents = (self.0.unsigned_abs() + CENT / 2) / CENT;
        // never print "-0.00"
        let sign = if self.0 < 0 && cents > 0 { "-" } else { "" };
        let whole = cents / 100;
        let frac = cents % 100;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, amount| acc + amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_float_converts_correctly() {
        assert_eq!(Amount::from_float(100.0), Amount::from_scaled(1_000_000));
        assert_eq!(Amount::from_float(1.5), Amount::from_scaled(15_000));
        assert_eq!(Amount::from_float(0.0001), Amount::from_scaled(1));
        assert_eq!(Amount::from_float(-50.25), Amount::from_scaled(-502_500));
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Amount::from_float(15.5).to_string(), "15.50");
        assert_eq!(Amount::from_float(7.0).to_string(), "7.00");
        assert_eq!(Amount::from_float(-3.0).to_string(), "-3.00");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn display_rounds_half_away_from_zero() {
        assert_eq!(Amount::from_scaled(12_345).to_string(), "1.23");
        assert_eq!(Amount::from_scaled(12_350).to_string(), "1.24");
        assert_eq!(Amount::from_scaled(-12_350).to_string(), "-1.24");
        assert_eq!(Amount::from_scaled(-1).to_string(), "0.00");
    }

    #[test]
    fn parse_positive_accepts_decimals_and_whitespace() {
        assert_eq!(Amount::parse_positive("5"), Ok(Amount::from_float(5.0)));
        assert_eq!(
            Amount::parse_positive("  12.75 "),
            Ok(Amount::from_float(12.75))
        );
    }

    #[test]
    fn parse_positive_rejects_bad_input() {
        assert_eq!(Amount::parse_positive("   "), Err(AmountError::Empty));
        assert_eq!(
            Amount::parse_positive("abc"),
            Err(AmountError::NotANumber("abc".to_string()))
        );
        assert_eq!(Amount::parse_positive("inf"), Err(AmountError::NotFinite));
        assert_eq!(Amount::parse_positive("NaN"), Err(AmountError::NotFinite));
        assert_eq!(Amount::parse_positive("0"), Err(AmountError::NotPositive));
        assert_eq!(Amount::parse_positive("-4"), Err(AmountError::NotPositive));
        assert_eq!(
            Amount::parse_positive("0.00001"),
            Err(AmountError::NotPositive)
        );
        assert_eq!(Amount::parse_positive("1e300"), Err(AmountError::OutOfRange));
    }

    #[test]
    fn arithmetic() {
        let mut a = Amount::from_scaled(100);
        a += Amount::from_scaled(50);
        assert_eq!(a, Amount::from_scaled(150));
        a -= Amount::from_scaled(30);
        assert_eq!(a, Amount::from_scaled(120));
        assert_eq!(-a, Amount::from_scaled(-120));
        assert_eq!(a - Amount::from_scaled(200), Amount::from_scaled(-80));
        assert_eq!(Amount::from_scaled(-80).abs(), Amount::from_scaled(80));
    }

    #[test]
    fn abs_of_min_saturates() {
        assert_eq!(Amount::MIN.abs(), Amount::from_scaled(i64::MAX));
        assert_eq!(Amount::MIN.abs().to_string(), "922337203685477.58");
        assert_eq!(Amount::MIN.to_string(), "-922337203685477.58");
    }

    #[test]
    fn checked_arithmetic_detects_overflow() {
        let max = Amount::from_scaled(i64::MAX);
        assert_eq!(max.checked_add(Amount::from_scaled(1)), None);
        assert_eq!(
            Amount::from_scaled(i64::MIN).checked_sub(Amount::from_scaled(1)),
            None
        );
        assert_eq!(
            Amount::from_scaled(10).checked_sub(Amount::from_scaled(20)),
            Some(Amount::from_scaled(-10))
        );
    }

    #[test]
    fn sum_of_amounts() {
        let total: Amount = [5.0, -3.0, 1.25]
            .into_iter()
            .map(Amount::from_float)
            .sum();
        assert_eq!(total, Amount::from_float(3.25));
    }
}
