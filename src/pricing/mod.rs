//! Pure pricing engine.
//!
//! Functions here read a [`Reserves`](crate::domain::Reserves) snapshot and
//! return amounts; they never mutate anything.  The pool controller calls
//! them to stage every state change before committing it.

mod liquidity;
mod swap;

pub use liquidity::{deposit_terms, initial_terms, withdrawal_terms};
pub use swap::{price, quote_exact_in, quote_exact_out, spot_price};
