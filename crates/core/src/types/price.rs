//! Type-safe price representation for Korean won amounts.
//!
//! The backend quotes all prices as whole won (KRW has no minor unit), so
//! the wrapped type is a plain `i64` rather than a decimal.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price in Korean won.
///
/// Displays with thousands separators and the `원` suffix, matching the
/// storefront's formatting (`29,000원`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a price from a whole-won amount.
    #[must_use]
    pub const fn new(won: i64) -> Self {
        Self(won)
    }

    /// The amount in won.
    #[must_use]
    pub const fn won(&self) -> i64 {
        self.0
    }

    /// Total price for `quantity` units.
    ///
    /// Saturates on overflow rather than wrapping.
    #[must_use]
    pub const fn total(&self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}원", group_thousands(self.0))
    }
}

impl From<i64> for Price {
    fn from(won: i64) -> Self {
        Self(won)
    }
}

/// Format an integer with comma thousands separators.
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    let first_group = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first_group) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_small() {
        assert_eq!(Price::new(0).to_string(), "0원");
        assert_eq!(Price::new(100).to_string(), "100원");
        assert_eq!(Price::new(999).to_string(), "999원");
    }

    #[test]
    fn test_display_grouped() {
        assert_eq!(Price::new(1_000).to_string(), "1,000원");
        assert_eq!(Price::new(29_000).to_string(), "29,000원");
        assert_eq!(Price::new(1_234_567).to_string(), "1,234,567원");
    }

    #[test]
    fn test_total() {
        assert_eq!(Price::new(4_500).total(3), Price::new(13_500));
        assert_eq!(Price::new(i64::MAX).total(2), Price::new(i64::MAX));
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::new(29_000);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "29000");

        let parsed: Price = serde_json::from_str("29000").unwrap();
        assert_eq!(parsed, price);
    }
}
