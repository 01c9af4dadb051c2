//! Quote produced by the pricing engine for a single swap.

use core::fmt;

use super::{Amount, BasisPoints, Rounding, SwapSide};
use crate::error::{DexError, Result};

/// Amounts exchanged by one swap, and the fee retained by the pool.
///
/// A `SwapQuote` is an ephemeral value: the pricing engine produces it,
/// the pool settles it, nothing stores it.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee <= amount_in`.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::{Amount, SwapQuote, SwapSide};
///
/// let quote = SwapQuote::new(
///     SwapSide::QuoteToBase,
///     Amount::new(1_000),
///     Amount::new(990),
///     Amount::new(3),
/// );
/// assert!(quote.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapQuote {
    side: SwapSide,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapQuote {
    /// Creates a new `SwapQuote` with validated invariants.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroOutput`] if `amount_out` is zero.
    /// - [`DexError::ZeroAmount`] if `amount_in` is zero.
    /// - [`DexError::InvalidFee`] if `fee > amount_in`.
    pub const fn new(
        side: SwapSide,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Result<Self> {
        if amount_out.is_zero() {
            return Err(DexError::ZeroOutput);
        }
        if amount_in.is_zero() {
            return Err(DexError::ZeroAmount("amount_in must be positive"));
        }
        if fee.get() > amount_in.get() {
            return Err(DexError::InvalidFee("fee exceeds amount_in"));
        }
        Ok(Self {
            side,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Direction of the swap.
    #[must_use]
    pub const fn side(&self) -> SwapSide {
        self.side
    }

    /// Amount the trader pays in.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Amount the trader receives.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Portion of `amount_in` retained by the pool as fee.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Minimum acceptable output for this quote under a slippage
    /// `tolerance`: `amount_out × (1 − tolerance)`, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if `tolerance` exceeds 100%.
    pub fn min_out_with_tolerance(&self, tolerance: BasisPoints) -> Result<Amount> {
        if !tolerance.is_valid_percent() {
            return Err(DexError::InvalidFee("slippage tolerance above 100%"));
        }
        tolerance
            .complement()
            .apply(self.amount_out, Rounding::Down)
    }

    /// Maximum acceptable input for this quote under a slippage
    /// `tolerance`: `amount_in × (1 + tolerance)`, rounded up.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidFee`] if `tolerance` exceeds 100%.
    /// - [`DexError::Overflow`] if the bound does not fit an [`Amount`].
    pub fn max_in_with_tolerance(&self, tolerance: BasisPoints) -> Result<Amount> {
        if !tolerance.is_valid_percent() {
            return Err(DexError::InvalidFee("slippage tolerance above 100%"));
        }
        let extra = tolerance.apply(self.amount_in, Rounding::Up)?;
        self.amount_in
            .checked_add(&extra)
            .ok_or(DexError::Overflow("max input bound overflow"))
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in={} out={} fee={}",
            self.side, self.amount_in, self.amount_out, self.fee
        )
    }
}
