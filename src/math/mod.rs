//! Exact integer arithmetic for pool calculations.
//!
//! [`mul_div`] multiplies two amounts through a 256-bit intermediate and
//! divides with an explicit rounding direction.  Three-factor swap
//! products go through a 512-bit intermediate.
//! No floating point is used anywhere in the crate.
//!
//! Results always round against the caller:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal payout, shares minted | [`Rounding::Down`](crate::domain::Rounding::Down) |
//! | Base asset owed on deposit, exact-out input | [`Rounding::Up`](crate::domain::Rounding::Up) |
//! | Reported fee | [`Rounding::Up`](crate::domain::Rounding::Up) |

mod wide;

pub use wide::mul_div;
pub(crate) use wide::{div_narrow, widen};
