//! Widened intermediates for products of reserve-sized amounts.
//!
//! Multiplying two `u128` amounts needs 256 bits; the swap formulas
//! multiply three factors (two amounts and a basis-point scale) and need
//! 512.  Results are narrowed back to `u128`, failing instead of
//! truncating.

use bnum::types::{U256, U512};

use crate::domain::Rounding;

/// Computes `a × b / denominator` with a 256-bit intermediate.
///
/// Returns `None` if `denominator` is zero or the quotient does not fit
/// a `u128`.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::Rounding;
/// use dex_engine::math::mul_div;
///
/// assert_eq!(mul_div(u128::MAX, 4, 8, Rounding::Down), Some(u128::MAX / 2));
/// assert_eq!(mul_div(5, 5, 3, Rounding::Up), Some(9));
/// ```
#[must_use]
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let numerator = U256::from(a) * U256::from(b);
    let denominator = U256::from(denominator);
    let mut quotient = numerator / denominator;
    if rounding.is_up() && !(numerator % denominator).is_zero() {
        quotient += U256::ONE;
    }
    u128::try_from(quotient).ok()
}

/// Lifts a `u128` into the 512-bit working type.
#[must_use]
pub(crate) fn widen(value: u128) -> U512 {
    U512::from(value)
}

/// Divides two 512-bit values with explicit rounding and narrows the
/// quotient to `u128`.
///
/// Returns `None` on a zero denominator or a quotient above `u128::MAX`.
#[must_use]
pub(crate) fn div_narrow(numerator: U512, denominator: U512, rounding: Rounding) -> Option<u128> {
    if denominator.is_zero() {
        return None;
    }
    let mut quotient = numerator / denominator;
    if rounding.is_up() && !(numerator % denominator).is_zero() {
        quotient += U512::ONE;
    }
    u128::try_from(quotient).ok()
}
