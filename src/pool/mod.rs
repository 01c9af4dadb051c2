//! The stateful pool controller.
//!
//! [`DexPool`] is the only component that mutates reserves and share
//! positions.  It reads prices from [`pricing`](crate::pricing), keeps its
//! books in [`ledger`](crate::ledger) and moves assets through an injected
//! [`AssetLedger`](crate::traits::AssetLedger).

mod dex_pool;

#[cfg(test)]
mod proptest_properties;

pub use dex_pool::DexPool;
