//! Seams between the pool and its environment.
//!
//! [`AssetLedger`] is the only capability a pool needs from outside: moving
//! assets and reading allowances and balances.

mod asset_ledger;

pub use asset_ledger::{AssetLedger, AssetTransfer};
