//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use dex_engine::prelude::*;
//! ```

pub use crate::assets::MemoryLedger;
pub use crate::config::{DexConfig, EmptyPoolPolicy};
pub use crate::domain::{
    Account, Amount, Asset, BasisPoints, EventKind, FeeTier, LiquidityMinted, PoolEvent, Reserves,
    Rounding, Shares, SwapQuote, SwapSide, Withdrawal,
};
pub use crate::error::{DexError, Result, TransferError};
pub use crate::pool::DexPool;
pub use crate::traits::{AssetLedger, AssetTransfer};
