//! Decimal price value object.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{DomainError, ValueObject};

/// A non-currency-tagged decimal price.
///
/// Travels as a JSON number (the service stores floats). Arithmetic stays in
/// `Decimal` so cart totals do not pick up float drift, and saturates at
/// `Decimal::MAX` instead of overflowing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl ValueObject for Price {}

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Largest price accepted from form input.
    pub const MAX: Price = Price(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build from an integer number of cents (`1999` -> `19.99`).
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Line total for `quantity` units at this price.
    pub fn times(&self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        let amount = Decimal::from_str(trimmed)
            .map_err(|_| DomainError::validation(format!("price '{}' is not a number", s.trim())))?;
        let price = Price(amount);
        if price.is_negative() {
            return Err(DomainError::validation("price must not be negative"));
        }
        if price > Price::MAX {
            return Err(DomainError::validation(format!("price must not exceed {}", Price::MAX)));
        }
        Ok(price)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Price::from_cents(1250).to_string(), "$12.50");
        assert_eq!("3".parse::<Price>().unwrap().to_string(), "$3.00");
    }

    #[test]
    fn parses_optional_dollar_sign() {
        assert_eq!("$4.99".parse::<Price>().unwrap(), Price::from_cents(499));
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(matches!("-1".parse::<Price>(), Err(DomainError::Validation(_))));
        assert!(matches!("abc".parse::<Price>(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn wire_format_is_a_json_number() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price, Price::from_cents(1999));

        let whole: Price = serde_json::from_str("7").unwrap();
        assert_eq!(whole, Price::from_cents(700));

        let json = serde_json::to_value(Price::from_cents(250)).unwrap();
        assert!(json.is_number());
    }

    #[test]
    fn line_totals_do_not_drift() {
        let total: Price = [Price::from_cents(10), Price::from_cents(20)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(30));
        assert_eq!(Price::from_cents(333).times(3), Price::from_cents(999));
    }

    #[test]
    fn form_input_is_capped() {
        assert_eq!("1000000000".parse::<Price>(), Ok(Price::MAX));
        assert!(matches!("1000000000.01".parse::<Price>(), Err(DomainError::Validation(_))));
        assert!(matches!(
            "79228162514264337593543950335".parse::<Price>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn arithmetic_saturates_at_decimal_max() {
        let huge = Price::new(Decimal::MAX);
        assert_eq!(huge.times(2), huge);
        assert_eq!(huge + Price::from_cents(1), huge);
        let total: Price = [huge, huge, Price::from_cents(150)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }
}
