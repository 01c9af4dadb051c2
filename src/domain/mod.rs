//! Fundamental domain value types of the exchange engine.
//!
//! Amounts, shares, accounts, the two pool assets, reserve snapshots,
//! swap quotes, liquidity receipts and pool events.  All numeric types
//! are newtypes with checked arithmetic.

mod account;
mod amount;
mod asset;
mod basis_points;
mod event;
mod fee_tier;
mod liquidity;
mod reserves;
mod rounding;
mod shares;
mod swap_quote;

pub(crate) use basis_points::MAX_BPS;

pub use account::Account;
pub use amount::Amount;
pub use asset::{Asset, SwapSide};
pub use basis_points::BasisPoints;
pub use event::{EventKind, PoolEvent};
pub use fee_tier::FeeTier;
pub use liquidity::{LiquidityMinted, Withdrawal};
pub use reserves::Reserves;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_quote::SwapQuote;
