//! Constant-product swap quoting.
//!
//! The invariant is `x × y = k`.  The fee is a haircut on the input side:
//! only `amount_in × (10 000 − fee_bps) / 10 000` reaches the curve, the
//! full `amount_in` enters the reserves, so `k` never decreases.
//!
//! # Exact input
//!
//! ```text
//! effective  = amount_in × (10 000 − fee_bps)
//! amount_out = ⌊ reserve_out × effective / (reserve_in × 10 000 + effective) ⌋
//! ```
//!
//! # Exact output
//!
//! ```text
//! amount_in = ⌈ reserve_in × amount_out × 10 000
//!               / ((reserve_out − amount_out) × (10 000 − fee_bps)) ⌉
//! ```
//!
//! All products are formed in 512-bit integers; nothing is rounded until
//! the final division.

use crate::domain::{Amount, FeeTier, Reserves, Rounding, SwapQuote, SwapSide, MAX_BPS};
use crate::error::{DexError, Result};
use crate::math::{div_narrow, widen};

/// Output of selling `amount_in` against `(reserve_in, reserve_out)`.
///
/// Returns zero when the trade is too small to move any output unit;
/// callers that need a non-zero output use [`quote_exact_in`].
///
/// # Errors
///
/// - [`DexError::EmptyPool`] if either reserve is zero.
/// - [`DexError::Overflow`] if the quotient does not fit an [`Amount`].
///
/// # Examples
///
/// ```
/// use dex_engine::domain::{Amount, FeeTier};
/// use dex_engine::pricing::price;
///
/// let out = price(
///     Amount::new(1_000),
///     Amount::new(1_000_000),
///     Amount::new(2_000_000),
///     FeeTier::TIER_0_30_PERCENT,
/// );
/// assert_eq!(out, Ok(Amount::new(1_992)));
/// ```
pub fn price(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(DexError::EmptyPool);
    }
    let effective = widen(amount_in.get()) * widen(u128::from(fee.effective_input_bps().get()));
    let numerator = widen(reserve_out.get()) * effective;
    let denominator = widen(reserve_in.get()) * widen(u128::from(MAX_BPS)) + effective;
    div_narrow(numerator, denominator, Rounding::Down)
        .map(Amount::new)
        .ok_or(DexError::Overflow("swap output quotient"))
}

/// Quotes selling exactly `amount_in` in direction `side`.
///
/// # Errors
///
/// - [`DexError::EmptyPool`] if either reserve is zero.
/// - [`DexError::ZeroOutput`] if the output rounds down to zero, which
///   includes `amount_in == 0`.
/// - [`DexError::Overflow`] if the input reserve would overflow.
pub fn quote_exact_in(
    reserves: Reserves,
    side: SwapSide,
    amount_in: Amount,
    fee: FeeTier,
) -> Result<SwapQuote> {
    let (reserve_in, reserve_out) = reserves.for_side(side);
    let amount_out = price(amount_in, reserve_in, reserve_out, fee)?;
    if amount_out.is_zero() {
        return Err(DexError::ZeroOutput);
    }
    if reserve_in.checked_add(&amount_in).is_none() {
        return Err(DexError::Overflow("input reserve overflow"));
    }
    let fee_amount = fee.apply_to_amount(amount_in, Rounding::Up)?;
    SwapQuote::new(side, amount_in, amount_out, fee_amount)
}

/// Quotes buying exactly `amount_out` in direction `side`.
///
/// # Errors
///
/// - [`DexError::ZeroAmount`] if `amount_out` is zero.
/// - [`DexError::EmptyPool`] if either reserve is zero.
/// - [`DexError::InsufficientReserves`] if `amount_out >= reserve_out`.
/// - [`DexError::InvalidFee`] if the fee is 100%.
/// - [`DexError::Overflow`] if the required input does not fit.
pub fn quote_exact_out(
    reserves: Reserves,
    side: SwapSide,
    amount_out: Amount,
    fee: FeeTier,
) -> Result<SwapQuote> {
    if amount_out.is_zero() {
        return Err(DexError::ZeroAmount("amount_out must be positive"));
    }
    let (reserve_in, reserve_out) = reserves.for_side(side);
    if !reserves.is_funded() {
        return Err(DexError::EmptyPool);
    }
    if amount_out >= reserve_out {
        return Err(DexError::InsufficientReserves);
    }

    let complement = fee.effective_input_bps().get();
    if complement == 0 {
        return Err(DexError::InvalidFee("100% fee makes swap impossible"));
    }

    let remaining = reserve_out
        .checked_sub(&amount_out)
        .ok_or(DexError::InsufficientReserves)?;
    let numerator =
        widen(reserve_in.get()) * widen(amount_out.get()) * widen(u128::from(MAX_BPS));
    let denominator = widen(remaining.get()) * widen(u128::from(complement));
    let amount_in = div_narrow(numerator, denominator, Rounding::Up)
        .map(Amount::new)
        .ok_or(DexError::Overflow("exact-out input exceeds amount range"))?;

    if reserve_in.checked_add(&amount_in).is_none() {
        return Err(DexError::Overflow("input reserve overflow"));
    }
    let fee_amount = fee.apply_to_amount(amount_in, Rounding::Up)?;
    SwapQuote::new(side, amount_in, amount_out, fee_amount)
}

/// Marginal price of `side`: units of output per unit of input, as the
/// reserve ratio `(reserve_out, reserve_in)`.
///
/// # Errors
///
/// Returns [`DexError::EmptyPool`] if either reserve is zero.
pub fn spot_price(reserves: Reserves, side: SwapSide) -> Result<(Amount, Amount)> {
    if !reserves.is_funded() {
        return Err(DexError::EmptyPool);
    }
    let (reserve_in, reserve_out) = reserves.for_side(side);
    Ok((reserve_out, reserve_in))
}
