//! Pool configuration.
//!
//! [`DexConfig`] is the declarative blueprint a
//! [`DexPool`](crate::pool::DexPool) is built from: its custody account,
//! its fee, and what happens once it is emptied.

mod dex_config;

pub use dex_config::{DexConfig, EmptyPoolPolicy};
