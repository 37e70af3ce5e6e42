//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision, and
//! [`MinorUnits`] converts to and from integer cents where exact splitting
//! is required.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of decimal places carried by every supported currency amount.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount, carried at two decimal places.
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "BRL", "USD").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Brazilian Real
    Brl,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut amount = self
            .amount
            .round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(MINOR_UNIT_SCALE);
        write!(f, "{} {}", amount, self.currency)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brl => write!(f, "BRL"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Gbp => write!(f, "GBP"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BRL" => Ok(Self::Brl),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

/// Integer minor units (cents).
///
/// Conversions round half away from zero, so `0.005` becomes one cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    /// Converts a decimal amount to minor units.
    ///
    /// Returns `None` when the amount does not fit in an `i64` of cents.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        let scaled = amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        scaled.to_i64().map(Self)
    }

    /// Converts minor units back to a two-decimal amount.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_SCALE)
    }

    /// Returns the raw cent count.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_money_new() {
        let amount = dec!(100.00);
        let money = Money::new(amount, Currency::Brl);
        assert_eq!(money.amount, amount);
        assert_eq!(money.currency, Currency::Brl);
    }

    #[rstest]
    #[case(dec!(1234.5), Currency::Brl, "1234.50 BRL")]
    #[case(dec!(7), Currency::Usd, "7.00 USD")]
    #[case(dec!(0), Currency::Gbp, "0.00 GBP")]
    #[case(dec!(10.005), Currency::Eur, "10.01 EUR")]
    #[case(dec!(-0.125), Currency::Brl, "-0.13 BRL")]
    fn test_money_display(#[case] amount: Decimal, #[case] currency: Currency, #[case] expected: &str) {
        assert_eq!(Money::new(amount, currency).to_string(), expected);
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("BRL").unwrap(), Currency::Brl);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("EUR").unwrap(), Currency::Eur);
        assert_eq!(Currency::from_str("gbp").unwrap(), Currency::Gbp);

        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[rstest]
    #[case(dec!(100.00), 10_000)]
    #[case(dec!(0.01), 1)]
    #[case(dec!(33.335), 3_334)]
    #[case(dec!(-12.345), -1_235)]
    #[case(dec!(0), 0)]
    fn test_minor_units_from_decimal(#[case] amount: Decimal, #[case] cents: i64) {
        assert_eq!(MinorUnits::from_decimal(amount), Some(MinorUnits(cents)));
    }

    #[test]
    fn test_minor_units_to_decimal() {
        assert_eq!(MinorUnits(3_334).to_decimal(), dec!(33.34));
        assert_eq!(MinorUnits(-5).to_decimal(), dec!(-0.05));
    }

    #[test]
    fn test_minor_units_overflow() {
        assert_eq!(MinorUnits::from_decimal(Decimal::MAX), None);
    }
}
