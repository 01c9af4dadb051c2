//! Receipts returned by liquidity provision and withdrawal.

use super::{Amount, Shares};

/// Outcome of a deposit (or of the initial seeding).
///
/// `base_in` is what the provider paid on the base side to keep the
/// reserve ratio unchanged, rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityMinted {
    /// Shares credited to the provider.
    pub shares: Shares,
    /// Quote asset supplied.
    pub quote_in: Amount,
    /// Base asset supplied.
    pub base_in: Amount,
}

/// Outcome of burning shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Withdrawal {
    /// Shares burned from the provider's position.
    pub shares: Shares,
    /// Quote asset paid out, rounded down.
    pub quote_out: Amount,
    /// Base asset paid out, rounded down.
    pub base_out: Amount,
}
