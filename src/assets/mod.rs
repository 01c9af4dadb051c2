//! Asset ledger implementations.

mod memory;

pub use memory::MemoryLedger;
