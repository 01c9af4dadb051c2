//! # DEX Engine
//!
//! A two-asset constant-product exchange: one pool, a quote asset (the
//! native currency) and a base asset (a fungible token), liquidity shares,
//! fee-bearing swaps in both directions, and an injected asset ledger that
//! moves the actual balances.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `tracing` | yes | Structured logs of pool mutations and rejected calls |
//! | `serde` | no | `Serialize` / `Deserialize` for configs, values and events |
//!
//! ## Seed a pool and swap
//!
//! ```rust
//! use dex_engine::prelude::*;
//!
//! let pool_account = Account::from_bytes([0xde; 20]);
//! let alice = Account::from_bytes([0xa1; 20]);
//!
//! // 1. Fund a ledger and let the pool pull alice's base asset
//! let mut ledger = MemoryLedger::new();
//! ledger.mint(Asset::Quote, alice, Amount::new(1_000_000))?;
//! ledger.mint(Asset::Base, alice, Amount::new(1_000_000))?;
//! ledger.approve(Asset::Base, alice, pool_account, Amount::new(1_000_000));
//!
//! // 2. Build the pool and seed it 1:2
//! let config = DexConfig::with_defaults(pool_account)?;
//! let mut pool = DexPool::new(config, ledger)?;
//! pool.init(alice, Amount::new(200_000), Amount::new(100_000))?;
//!
//! // 3. Sell 1 000 quote units for at least 1 900 base units
//! let quote = pool.swap_in(alice, SwapSide::QuoteToBase, Amount::new(1_000), Amount::new(1_900))?;
//! assert_eq!(quote.amount_out(), Amount::new(1_974));
//! assert_eq!(quote.fee(), Amount::new(3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller     │  init / deposit / withdraw / swap_in / swap_out
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐   terms    ┌──────────────┐
//! │   DexPool     │ ─────────▶ │   pricing     │  pure quotes
//! └──┬────────┬──┘            └──────────────┘
//!    │ commit │ settle
//!    ▼        ▼
//! ┌────────┐ ┌──────────────┐
//! │ ledger │ │ AssetLedger   │  transfers, allowances
//! └────────┘ └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Reserves`](domain::Reserves), [`PoolEvent`](domain::PoolEvent), etc. |
//! | [`pricing`] | Swap quotes and liquidity terms as pure functions |
//! | [`ledger`] | Reserve and share books owned by the pool |
//! | [`pool`] | [`DexPool`](pool::DexPool), the stateful controller |
//! | [`traits`] | [`AssetLedger`](traits::AssetLedger), the asset-movement seam |
//! | [`assets`] | [`MemoryLedger`](assets::MemoryLedger), an in-memory asset ledger |
//! | [`config`] | [`DexConfig`](config::DexConfig) pool blueprint |
//! | [`bootstrap`] | Deploy-time funding and seeding on a `MemoryLedger` |
//! | [`math`] | Wide-integer mul-div with explicit rounding |
//! | [`error`] | [`DexError`](error::DexError) and [`TransferError`](error::TransferError) |
//! | [`prelude`] | Convenience re-exports |

pub mod assets;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod pricing;
pub mod traits;
