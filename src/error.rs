//! Unified error types for the exchange engine.
//!
//! Every fallible pool operation returns [`DexError`].  Failures raised by
//! the injected asset ledger are [`TransferError`]s and surface unchanged
//! inside [`DexError::Transfer`].
//!
//! All errors abort the whole operation: no pool state is left
//! half-updated and nothing is retried internally.

use thiserror::Error;

use crate::domain::{Account, Amount, Asset, Shares};

/// Crate-wide result alias.
pub type Result<T, E = DexError> = core::result::Result<T, E>;

/// Errors produced by the pool controller and pricing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// `init` was called on a pool that is already initialized.
    #[error("pool is already initialized")]
    AlreadyInitialized,

    /// A mutating call was made before `init`.
    #[error("pool is not initialized")]
    NotInitialized,

    /// A required amount was zero.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// A deposit was too small relative to the reserves to mint any share.
    #[error("deposit too small to mint any liquidity")]
    ZeroLiquidityMinted,

    /// Burning the requested shares would pay out nothing on one side.
    #[error("withdrawal too small: one side rounds down to zero")]
    ZeroWithdrawal,

    /// The swap would produce no output.
    #[error("swap produces zero output")]
    ZeroOutput,

    /// The caller tried to burn zero shares or more shares than it owns.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller asked to burn.
        requested: Shares,
        /// Shares the caller actually holds.
        available: Shares,
    },

    /// The quoted amount breaks the caller's slippage bound.
    #[error("slippage exceeded: quoted {quoted}, bound {bound}")]
    SlippageExceeded {
        /// Amount the pool would settle (output for exact-in, input for exact-out).
        quoted: Amount,
        /// The caller's bound (minimum output or maximum input).
        bound: Amount,
    },

    /// An asset movement failed in the external ledger.
    #[error("asset transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// Every share has been burned; the pool holds no reserves.
    #[error("pool is empty")]
    EmptyPool,

    /// `reseed` was called while shares are still outstanding.
    #[error("pool still has outstanding shares")]
    PoolNotEmpty,

    /// `reseed` was called but the configuration rejects re-seeding.
    #[error("re-seeding an empty pool is disabled")]
    ReseedDisabled,

    /// The requested output is not strictly below the output reserve.
    #[error("insufficient reserves for the requested output")]
    InsufficientReserves,

    /// Arithmetic overflow or underflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Fee parameter out of range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// The pool's own custody account cannot trade with or provide
    /// liquidity to itself.
    #[error("invalid caller: {0}")]
    InvalidCaller(Account),

    /// Configuration parameter out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A staged state change would break a pool invariant.
    #[error("invariant violated: {0}")]
    InvariantViolated(&'static str),
}

/// Errors reported by an [`AssetLedger`](crate::traits::AssetLedger).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The debited account does not hold enough of the asset.
    #[error("insufficient {asset} balance for {account}: needed {needed}, available {available}")]
    InsufficientBalance {
        /// Asset being moved.
        asset: Asset,
        /// Debited account.
        account: Account,
        /// Amount requested.
        needed: Amount,
        /// Current balance.
        available: Amount,
    },

    /// The spender's allowance over the owner's balance is too low.
    #[error("insufficient {asset} allowance from {owner} to {spender}: needed {needed}, available {available}")]
    InsufficientAllowance {
        /// Asset being moved.
        asset: Asset,
        /// Owner of the funds.
        owner: Account,
        /// Account spending on the owner's behalf.
        spender: Account,
        /// Amount requested.
        needed: Amount,
        /// Current allowance.
        available: Amount,
    },

    /// Crediting would overflow the recipient's balance.
    #[error("{asset} balance overflow")]
    Overflow {
        /// Asset being credited.
        asset: Asset,
    },

    /// A batch failed and undoing its earlier legs failed as well.
    #[error("partial settlement: compensation of {executed} executed transfer(s) failed")]
    PartialSettlement {
        /// Number of legs that had been executed before the failure.
        executed: usize,
    },
}
