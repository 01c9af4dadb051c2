//! Fees and slippage tolerances in hundredths of a percent.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::{DexError, Result};
use crate::math::mul_div;

/// Denominator that represents 100%.
pub(crate) const MAX_BPS: u32 = 10_000;

/// Hundredths of a percent: `30` is the classic 0.30% swap fee and
/// `10_000` is the whole amount.
///
/// All `u32` values can be constructed; [`is_valid_percent`](Self::is_valid_percent)
/// tells whether the value is a meaningful percentage.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::BasisPoints;
///
/// let fee = BasisPoints::new(30);
/// assert_eq!(fee.get(), 30);
/// assert_eq!(fee.complement().get(), 9_970);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BasisPoints(u32);

impl BasisPoints {
    pub const ZERO: Self = Self(0);

    /// The whole amount.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw basis points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Whether the value is at most 100%.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `10_000 − self`, saturating at zero.
    pub const fn complement(&self) -> Self {
        Self(MAX_BPS.saturating_sub(self.0))
    }

    /// Computes `amount × self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result does not fit an [`Amount`].
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        mul_div(
            amount.get(),
            u128::from(self.0),
            u128::from(MAX_BPS),
            rounding,
        )
        .map(Amount::new)
        .ok_or(DexError::Overflow("basis points apply overflow"))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_percent_range() {
        assert!(BasisPoints::ZERO.is_valid_percent());
        assert!(BasisPoints::MAX_PERCENT.is_valid_percent());
        assert!(!BasisPoints::new(10_001).is_valid_percent());
    }

    #[test]
    fn complement_saturates() {
        assert_eq!(BasisPoints::new(30).complement(), BasisPoints::new(9_970));
        assert_eq!(BasisPoints::new(20_000).complement(), BasisPoints::ZERO);
    }

    #[test]
    fn apply_rounds_up_for_fees() {
        let Ok(fee) = BasisPoints::new(30).apply(Amount::new(1), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(fee, Amount::new(1));
        let Ok(fee) = BasisPoints::new(30).apply(Amount::new(1), Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(fee, Amount::ZERO);
    }

    #[test]
    fn apply_handles_amounts_near_max() {
        let Ok(all) = BasisPoints::MAX_PERCENT.apply(Amount::MAX, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(all, Amount::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(BasisPoints::new(30).to_string(), "30bp");
    }
}
