//! In-memory [`AssetLedger`] for tests, simulations and bootstrap scripts.

use std::collections::HashMap;

use crate::domain::{Account, Amount, Asset};
use crate::error::TransferError;
use crate::traits::{AssetLedger, AssetTransfer};

/// Balances and allowances held in hash maps.
///
/// Plays the part of both the native currency and the base token
/// contract.  [`settle`](AssetLedger::settle) stages the whole batch on a
/// copy and swaps it in only if every leg succeeds.
///
/// # Examples
///
/// ```
/// use dex_engine::assets::MemoryLedger;
/// use dex_engine::domain::{Account, Amount, Asset};
/// use dex_engine::traits::AssetLedger;
///
/// let alice = Account::from_bytes([1; 20]);
/// let bob = Account::from_bytes([2; 20]);
///
/// let mut ledger = MemoryLedger::new();
/// ledger.mint(Asset::Base, alice, Amount::new(100))?;
/// ledger.transfer(Asset::Base, alice, bob, Amount::new(40))?;
/// assert_eq!(ledger.balance_of(Asset::Base, bob), Amount::new(40));
/// # Ok::<(), dex_engine::error::TransferError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    balances: HashMap<(Asset, Account), Amount>,
    allowances: HashMap<(Asset, Account, Account), Amount>,
}

impl MemoryLedger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `asset` out of thin air for `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Overflow`] if the balance would overflow.
    pub fn mint(&mut self, asset: Asset, to: Account, amount: Amount) -> Result<(), TransferError> {
        self.credit(asset, to, amount)
    }

    /// Sets `spender`'s allowance over `owner`'s `asset` to `amount`.
    pub fn approve(&mut self, asset: Asset, owner: Account, spender: Account, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(asset, owner, spender));
        } else {
            self.allowances.insert((asset, owner, spender), amount);
        }
    }

    /// Sum of all balances of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Overflow`] if the sum does not fit.
    pub fn total_supply(&self, asset: Asset) -> Result<Amount, TransferError> {
        self.balances
            .iter()
            .filter(|((held, _), _)| *held == asset)
            .try_fold(Amount::ZERO, |sum, (_, amount)| {
                sum.checked_add(amount)
                    .ok_or(TransferError::Overflow { asset })
            })
    }

    fn debit(&mut self, asset: Asset, from: Account, amount: Amount) -> Result<(), TransferError> {
        let available = self.balance_of(asset, from);
        let remaining =
            available
                .checked_sub(&amount)
                .ok_or(TransferError::InsufficientBalance {
                    asset,
                    account: from,
                    needed: amount,
                    available,
                })?;
        if remaining.is_zero() {
            self.balances.remove(&(asset, from));
        } else {
            self.balances.insert((asset, from), remaining);
        }
        Ok(())
    }

    fn credit(&mut self, asset: Asset, to: Account, amount: Amount) -> Result<(), TransferError> {
        if amount.is_zero() {
            return Ok(());
        }
        let updated = self
            .balance_of(asset, to)
            .checked_add(&amount)
            .ok_or(TransferError::Overflow { asset })?;
        self.balances.insert((asset, to), updated);
        Ok(())
    }
}

impl AssetLedger for MemoryLedger {
    fn transfer(
        &mut self,
        asset: Asset,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if from == to {
            let available = self.balance_of(asset, from);
            if available < amount {
                return Err(TransferError::InsufficientBalance {
                    asset,
                    account: from,
                    needed: amount,
                    available,
                });
            }
            return Ok(());
        }
        // probe the credit so a failing credit leaves `from` intact
        self.balance_of(asset, to)
            .checked_add(&amount)
            .ok_or(TransferError::Overflow { asset })?;
        self.debit(asset, from, amount)?;
        self.credit(asset, to, amount)
    }

    fn transfer_from(
        &mut self,
        asset: Asset,
        spender: Account,
        owner: Account,
        to: Account,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let available = self.allowance_of(asset, owner, spender);
        let remaining =
            available
                .checked_sub(&amount)
                .ok_or(TransferError::InsufficientAllowance {
                    asset,
                    owner,
                    spender,
                    needed: amount,
                    available,
                })?;
        self.transfer(asset, owner, to, amount)?;
        self.approve(asset, owner, spender, remaining);
        Ok(())
    }

    fn allowance_of(&self, asset: Asset, owner: Account, spender: Account) -> Amount {
        self.allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn balance_of(&self, asset: Asset, owner: Account) -> Amount {
        self.balances
            .get(&(asset, owner))
            .copied()
            .unwrap_or_default()
    }

    fn settle(&mut self, transfers: &[AssetTransfer]) -> Result<(), TransferError> {
        let mut staged = self.clone();
        for transfer in transfers {
            staged.execute(transfer)?;
        }
        *self = staged;
        Ok(())
    }
}
