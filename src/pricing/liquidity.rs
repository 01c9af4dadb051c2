//! Share minting and redemption terms.
//!
//! Deposits preserve the reserve ratio exactly: the provider names the
//! quote amount, the engine derives the base amount owed (rounded up) and
//! the shares minted (rounded down).  Withdrawals pay out both reserves
//! pro rata (rounded down).  Every rounding step favours the providers
//! already in the pool.

use crate::domain::{Amount, LiquidityMinted, Reserves, Rounding, Shares, Withdrawal};
use crate::error::{DexError, Result};
use crate::math::mul_div;

/// Terms for seeding an empty pool: shares equal the quote amount.
///
/// # Errors
///
/// Returns [`DexError::ZeroAmount`] if either amount is zero.
pub fn initial_terms(quote_in: Amount, base_in: Amount) -> Result<LiquidityMinted> {
    if base_in.is_zero() {
        return Err(DexError::ZeroAmount("base amount must be positive"));
    }
    if quote_in.is_zero() {
        return Err(DexError::ZeroAmount("quote value must be positive"));
    }
    Ok(LiquidityMinted {
        shares: Shares::new(quote_in.get()),
        quote_in,
        base_in,
    })
}

/// Terms for depositing `quote_in` at the current ratio.
///
/// ```text
/// base_in = ⌈ quote_in × base_reserve / quote_reserve ⌉
/// shares  = ⌊ quote_in × total_shares / quote_reserve ⌋
/// ```
///
/// # Errors
///
/// - [`DexError::ZeroAmount`] if `quote_in` is zero.
/// - [`DexError::EmptyPool`] if the pool holds no reserves or shares.
/// - [`DexError::ZeroLiquidityMinted`] if the deposit mints no share.
/// - [`DexError::Overflow`] if the base amount does not fit.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::{Amount, Reserves, Shares};
/// use dex_engine::pricing::deposit_terms;
///
/// let reserves = Reserves::new(Amount::new(5), Amount::new(5));
/// let Ok(minted) = deposit_terms(reserves, Shares::new(5), Amount::new(5)) else {
///     unreachable!()
/// };
/// assert_eq!(minted.base_in, Amount::new(5));
/// assert_eq!(minted.shares, Shares::new(5));
/// ```
pub fn deposit_terms(
    reserves: Reserves,
    total_shares: Shares,
    quote_in: Amount,
) -> Result<LiquidityMinted> {
    if quote_in.is_zero() {
        return Err(DexError::ZeroAmount("quote value must be positive"));
    }
    if !reserves.is_funded() || total_shares.is_zero() {
        return Err(DexError::EmptyPool);
    }
    let quote_reserve = reserves.quote().get();

    let base_in = mul_div(
        quote_in.get(),
        reserves.base().get(),
        quote_reserve,
        Rounding::Up,
    )
    .map(Amount::new)
    .ok_or(DexError::Overflow("required base amount"))?;

    let shares = mul_div(
        quote_in.get(),
        total_shares.get(),
        quote_reserve,
        Rounding::Down,
    )
    .map(Shares::new)
    .ok_or(DexError::Overflow("minted shares"))?;

    if shares.is_zero() {
        return Err(DexError::ZeroLiquidityMinted);
    }

    Ok(LiquidityMinted {
        shares,
        quote_in,
        base_in,
    })
}

/// Terms for burning `shares` out of `total_shares`.
///
/// ```text
/// quote_out = ⌊ shares × quote_reserve / total_shares ⌋
/// base_out  = ⌊ shares × base_reserve  / total_shares ⌋
/// ```
///
/// # Errors
///
/// - [`DexError::EmptyPool`] if no shares are outstanding.
/// - [`DexError::InsufficientShares`] if `shares` is zero or above the total.
/// - [`DexError::ZeroWithdrawal`] if either payout rounds down to zero.
pub fn withdrawal_terms(
    reserves: Reserves,
    total_shares: Shares,
    shares: Shares,
) -> Result<Withdrawal> {
    if total_shares.is_zero() {
        return Err(DexError::EmptyPool);
    }
    if shares.is_zero() || shares > total_shares {
        return Err(DexError::InsufficientShares {
            requested: shares,
            available: total_shares,
        });
    }

    let pro_rata = |reserve: Amount| {
        mul_div(
            shares.get(),
            reserve.get(),
            total_shares.get(),
            Rounding::Down,
        )
        .map(Amount::new)
        .ok_or(DexError::Overflow("withdrawal payout"))
    };
    let quote_out = pro_rata(reserves.quote())?;
    let base_out = pro_rata(reserves.base())?;

    if quote_out.is_zero() || base_out.is_zero() {
        return Err(DexError::ZeroWithdrawal);
    }

    Ok(Withdrawal {
        shares,
        quote_out,
        base_out,
    })
}
