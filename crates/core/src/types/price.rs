//! Peso amounts and Colombian peso formatting.
//!
//! Prices are whole pesos. The peso has no minor unit in everyday use, so
//! amounts are plain integers and display with zero fraction digits.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Currency symbol for Colombian pesos.
const COP_SYMBOL: &str = "$";

/// Thousands separator used by the `es-CO` locale.
const GROUP_SEPARATOR: char = '.';

/// A non-negative amount of Colombian pesos.
///
/// Arithmetic saturates at `u64::MAX` instead of wrapping or panicking.
///
/// # Examples
///
/// ```
/// use yogurt_shop_core::Price;
///
/// let price = Price::from_pesos(8500);
/// assert_eq!((price * 2).to_string(), "$\u{a0}17.000");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero pesos.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole peso amount.
    #[must_use]
    pub const fn from_pesos(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole pesos.
    #[must_use]
    pub const fn pesos(&self) -> u64 {
        self.0
    }

    /// Format for display using the `es-CO` convention (e.g. `$ 26.500`).
    #[must_use]
    pub fn display(&self) -> String {
        format_cop(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cop(self.0))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

/// Format a whole peso amount as Colombian currency.
///
/// Output matches the browser's `Intl.NumberFormat('es-CO', { style:
/// 'currency', currency: 'COP', minimumFractionDigits: 0 })`: the `$` symbol,
/// a no-break space, and `.` as the thousands separator.
#[must_use]
pub fn format_cop(amount: u64) -> String {
    let digits = amount.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(COP_SYMBOL.len() + 2 + len + len / 3);
    out.push_str(COP_SYMBOL);
    out.push('\u{a0}');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cop_grouping() {
        assert_eq!(format_cop(0), "$\u{a0}0");
        assert_eq!(format_cop(950), "$\u{a0}950");
        assert_eq!(format_cop(8500), "$\u{a0}8.500");
        assert_eq!(format_cop(26_500), "$\u{a0}26.500");
        assert_eq!(format_cop(120_000), "$\u{a0}120.000");
        assert_eq!(format_cop(1_234_567), "$\u{a0}1.234.567");
    }

    #[test]
    fn test_price_arithmetic() {
        let total: Price = [Price::from_pesos(8500) * 2, Price::from_pesos(9500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_pesos(26_500));
    }

    #[test]
    fn test_price_saturates() {
        let big = Price::from_pesos(u64::MAX);
        assert_eq!(big + Price::from_pesos(1), big);
        assert_eq!(big * 3, big);
    }

    #[test]
    fn test_price_display_matches_format() {
        assert_eq!(Price::from_pesos(12_000).to_string(), "$\u{a0}12.000");
        assert_eq!(Price::ZERO.display(), "$\u{a0}0");
    }
}
