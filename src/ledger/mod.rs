//! Leaf state owned exclusively by the pool controller.
//!
//! - [`ReserveLedger`]: the two reserve balances.
//! - [`ShareLedger`]: provider positions and total shares.

mod reserve_ledger;
mod share_ledger;

pub use reserve_ledger::ReserveLedger;
pub use share_ledger::{ShareCheckpoint, ShareLedger};
