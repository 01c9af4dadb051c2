//! The asset-movement capability a pool is built on.
//!
//! The pool never owns asset balances.  It asks an injected
//! [`AssetLedger`] to move the native quote asset and the base token
//! between accounts, and to report allowances and balances.
//!
//! # Atomic settlement
//!
//! Every pool call settles all of its asset movements through one
//! [`AssetLedger::settle`] batch.  The batch either executes completely or
//! leaves balances as they were.  The provided implementation runs the
//! legs in order and, on failure, reverses the legs already executed;
//! ledgers that can stage changes should override it.

use crate::domain::{Account, Amount, Asset};
use crate::error::TransferError;

/// One leg of a settlement batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetTransfer {
    /// `from` moves its own funds to `to`.
    Direct {
        /// Asset moved.
        asset: Asset,
        /// Debited account.
        from: Account,
        /// Credited account.
        to: Account,
        /// Amount moved.
        amount: Amount,
    },
    /// `spender` moves `owner`'s funds to `to`, consuming allowance.
    Delegated {
        /// Asset moved.
        asset: Asset,
        /// Account spending the allowance.
        spender: Account,
        /// Debited account.
        owner: Account,
        /// Credited account.
        to: Account,
        /// Amount moved.
        amount: Amount,
    },
}

impl AssetTransfer {
    /// A direct transfer that returns this leg's funds to their origin.
    ///
    /// Allowance consumed by a delegated leg is not restored.
    #[must_use]
    pub const fn compensation(&self) -> Self {
        match *self {
            Self::Direct {
                asset,
                from,
                to,
                amount,
            }
            | Self::Delegated {
                asset,
                owner: from,
                to,
                amount,
                ..
            } => Self::Direct {
                asset,
                from: to,
                to: from,
                amount,
            },
        }
    }
}

/// External ledger of asset balances and allowances.
///
/// Implementations must not call back into the pool that owns them.
pub trait AssetLedger {
    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`TransferError::InsufficientBalance`] if `from` holds too little.
    /// - [`TransferError::Overflow`] if `to`'s balance would overflow.
    fn transfer(
        &mut self,
        asset: Asset,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Moves `amount` of `owner`'s `asset` to `to` on behalf of `spender`,
    /// consuming `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// - [`TransferError::InsufficientAllowance`] if the allowance is too low.
    /// - [`TransferError::InsufficientBalance`] if `owner` holds too little.
    /// - [`TransferError::Overflow`] if `to`'s balance would overflow.
    fn transfer_from(
        &mut self,
        asset: Asset,
        spender: Account,
        owner: Account,
        to: Account,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Amount of `owner`'s `asset` that `spender` may move.
    fn allowance_of(&self, asset: Asset, owner: Account, spender: Account) -> Amount;

    /// Balance of `asset` held by `owner`.
    fn balance_of(&self, asset: Asset, owner: Account) -> Amount;

    /// Executes one leg.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying transfer.
    fn execute(&mut self, transfer: &AssetTransfer) -> Result<(), TransferError> {
        match *transfer {
            AssetTransfer::Direct {
                asset,
                from,
                to,
                amount,
            } => self.transfer(asset, from, to, amount),
            AssetTransfer::Delegated {
                asset,
                spender,
                owner,
                to,
                amount,
            } => self.transfer_from(asset, spender, owner, to, amount),
        }
    }

    /// Executes all legs or none.
    ///
    /// # Errors
    ///
    /// Returns the first leg's error after reversing the legs already
    /// executed, or [`TransferError::PartialSettlement`] if a reversal
    /// itself fails.
    fn settle(&mut self, transfers: &[AssetTransfer]) -> Result<(), TransferError> {
        for (executed, transfer) in transfers.iter().enumerate() {
            if let Err(err) = self.execute(transfer) {
                for done in transfers[..executed].iter().rev() {
                    if self.execute(&done.compensation()).is_err() {
                        return Err(TransferError::PartialSettlement { executed });
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
