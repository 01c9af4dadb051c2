//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::Result;

/// The fee charged on the input side of every swap.
///
/// The fee stays in the pool's reserves, so it accrues to liquidity
/// providers through the value of their shares.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::FeeTier;
///
/// let tier = FeeTier::default();
/// assert_eq!(tier, FeeTier::TIER_0_30_PERCENT);
/// assert_eq!(tier.basis_points().get(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.30% fee (30 bp), the classic `997 / 1000` input haircut.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// The fee rate.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Share of the input that reaches the pricing curve, in basis points.
    #[must_use]
    pub const fn effective_input_bps(&self) -> BasisPoints {
        self.0.complement()
    }

    /// Computes the fee for `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`](crate::error::DexError::Overflow) if the
    /// result does not fit an [`Amount`].
    pub fn apply_to_amount(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        self.0.apply(amount, rounding)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
