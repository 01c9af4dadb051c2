//! Observable records emitted by every successful pool mutation.

use core::fmt;

use super::{Account, Amount, Reserves, Shares, SwapSide};

/// Kind of mutation that produced a [`PoolEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// First seeding of the pool.
    Initialized,
    /// Proportional deposit.
    LiquidityProvided,
    /// Share burn.
    LiquidityRemoved,
    /// Exact-input or exact-output swap.
    Swapped,
    /// Seeding of a pool whose shares were all burned.
    Reseeded,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initialized => "initialized",
            Self::LiquidityProvided => "liquidity_provided",
            Self::LiquidityRemoved => "liquidity_removed",
            Self::Swapped => "swapped",
            Self::Reseeded => "reseeded",
        };
        f.write_str(name)
    }
}

/// A committed pool mutation, with the reserves it left behind.
///
/// Consumed by whatever orchestrates the pool (a deploy script, an
/// indexer) to follow its progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolEvent {
    /// The pool was seeded by `provider`.
    Initialized {
        /// Initializing account.
        provider: Account,
        /// Quote asset supplied.
        quote_in: Amount,
        /// Base asset supplied.
        base_in: Amount,
        /// Shares minted (equal to `quote_in`).
        shares_minted: Shares,
        /// Reserves after the call.
        reserves: Reserves,
    },
    /// `provider` deposited at the current ratio.
    LiquidityProvided {
        /// Depositing account.
        provider: Account,
        /// Quote asset supplied.
        quote_in: Amount,
        /// Base asset pulled.
        base_in: Amount,
        /// Shares minted.
        shares_minted: Shares,
        /// Reserves after the call.
        reserves: Reserves,
    },
    /// `provider` burned shares for a pro-rata payout.
    LiquidityRemoved {
        /// Withdrawing account.
        provider: Account,
        /// Shares burned.
        shares_burned: Shares,
        /// Quote asset paid out.
        quote_out: Amount,
        /// Base asset paid out.
        base_out: Amount,
        /// Reserves after the call.
        reserves: Reserves,
    },
    /// `trader` swapped one asset for the other.
    Swapped {
        /// Trading account.
        trader: Account,
        /// Direction of the trade.
        side: SwapSide,
        /// Amount paid in.
        amount_in: Amount,
        /// Amount paid out.
        amount_out: Amount,
        /// Fee retained by the pool.
        fee: Amount,
        /// Reserves after the call.
        reserves: Reserves,
    },
    /// An emptied pool was seeded again by `provider`.
    Reseeded {
        /// Seeding account.
        provider: Account,
        /// Quote asset supplied.
        quote_in: Amount,
        /// Base asset supplied.
        base_in: Amount,
        /// Shares minted (equal to `quote_in`).
        shares_minted: Shares,
        /// Reserves after the call.
        reserves: Reserves,
    },
}

impl PoolEvent {
    /// The kind of mutation.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Initialized { .. } => EventKind::Initialized,
            Self::LiquidityProvided { .. } => EventKind::LiquidityProvided,
            Self::LiquidityRemoved { .. } => EventKind::LiquidityRemoved,
            Self::Swapped { .. } => EventKind::Swapped,
            Self::Reseeded { .. } => EventKind::Reseeded,
        }
    }

    /// The account whose call produced the event.
    #[must_use]
    pub const fn caller(&self) -> Account {
        match self {
            Self::Initialized { provider, .. }
            | Self::LiquidityProvided { provider, .. }
            | Self::LiquidityRemoved { provider, .. }
            | Self::Reseeded { provider, .. } => *provider,
            Self::Swapped { trader, .. } => *trader,
        }
    }

    /// Reserves immediately after the mutation.
    #[must_use]
    pub const fn reserves(&self) -> Reserves {
        match self {
            Self::Initialized { reserves, .. }
            | Self::LiquidityProvided { reserves, .. }
            | Self::LiquidityRemoved { reserves, .. }
            | Self::Swapped { reserves, .. }
            | Self::Reseeded { reserves, .. } => *reserves,
        }
    }
}

impl fmt::Display for PoolEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.kind(), self.caller(), self.reserves())
    }
}
