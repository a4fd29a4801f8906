//! Type-safe price representation using decimal arithmetic.
//!
//! The Savor backend serializes monetary amounts as plain JSON numbers in the
//! currency's standard unit (dollars), so `Price` is transparent over a
//! [`Decimal`] deserialized via `rust_decimal`'s float support. Arithmetic on
//! prices stays in decimal space; floats only exist at the wire boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the currency's standard unit (dollars, not cents).
///
/// Display formatting renders two decimal places with a dollar sign, matching
/// the backend's presentation (e.g., "$15.99").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Smallest representable price ($0.01), used as the settings floor.
    pub const MIN: Self = Self(Decimal::from_parts(1, 0, 0, false, 2));

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The discount between this (original) price and a discounted price.
    ///
    /// Clamped at zero so a mispriced pair never renders a negative discount.
    #[must_use]
    pub fn discount_from(&self, discounted: Self) -> Self {
        if discounted.0 >= self.0 {
            Self(Decimal::ZERO)
        } else {
            Self(self.0 - discounted.0)
        }
    }

    /// Add a step amount (settings stepper).
    #[must_use]
    pub fn step_up(self, step: Self) -> Self {
        Self(self.0 + step.0)
    }

    /// Subtract a step amount, never going below [`Price::MIN`].
    #[must_use]
    pub fn step_down(self, step: Self) -> Self {
        let next = self.0 - step.0;
        if next < Self::MIN.0 { Self::MIN } else { Self(next) }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(8000).to_string(), "$80.00");
        assert_eq!(Price::from_cents(1599).to_string(), "$15.99");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
    }

    #[test]
    fn test_deserialize_json_number() {
        let price: Price = serde_json::from_str("15.99").unwrap();
        assert_eq!(price, Price::from_cents(1599));

        // Integers are valid amounts too
        let price: Price = serde_json::from_str("100").unwrap();
        assert_eq!(price, Price::from_cents(10000));
    }

    #[test]
    fn test_discount_from() {
        let original = Price::from_cents(10000);
        let discounted = Price::from_cents(8000);
        assert_eq!(original.discount_from(discounted), Price::from_cents(2000));
    }

    #[test]
    fn test_discount_clamped_at_zero() {
        let original = Price::from_cents(5000);
        let higher = Price::from_cents(8000);
        assert_eq!(original.discount_from(higher), Price::from_cents(0));
    }

    #[test]
    fn test_step_down_floor() {
        let price = Price::from_cents(30);
        let stepped = price.step_down(Price::from_cents(50));
        assert_eq!(stepped, Price::MIN);
    }

    #[test]
    fn test_step_up() {
        let price = Price::from_cents(1599);
        assert_eq!(price.step_up(Price::from_cents(50)), Price::from_cents(1649));
    }
}
