//! Liquidity-provider positions and total shares outstanding.

use std::collections::BTreeMap;

use crate::domain::{Account, Shares};
use crate::error::{DexError, Result};

/// Tracks who owns how many shares of the pool.
///
/// # Invariant
///
/// `Σ positions == total` after every call.  Zero-share positions are
/// removed, so [`providers`](Self::providers) counts actual holders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLedger {
    positions: BTreeMap<Account, Shares>,
    total: Shares,
}

/// A single position's state before a change, used to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareCheckpoint {
    account: Account,
    position: Shares,
    total: Shares,
}

impl ShareLedger {
    /// An empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: BTreeMap::new(),
            total: Shares::ZERO,
        }
    }

    /// Total shares outstanding.
    pub const fn total(&self) -> Shares {
        self.total
    }

    /// Shares held by `account`; zero for unknown accounts.
    pub fn shares_of(&self, account: &Account) -> Shares {
        self.positions.get(account).copied().unwrap_or_default()
    }

    /// Number of accounts holding a non-zero position.
    #[must_use]
    pub fn providers(&self) -> usize {
        self.positions.len()
    }

    /// Records `account`'s position and the total before a change.
    #[must_use]
    pub fn checkpoint(&self, account: Account) -> ShareCheckpoint {
        ShareCheckpoint {
            account,
            position: self.shares_of(&account),
            total: self.total,
        }
    }

    /// Restores the state captured by [`checkpoint`](Self::checkpoint).
    ///
    /// Only valid while no other position has changed since.
    pub fn restore(&mut self, checkpoint: ShareCheckpoint) {
        self.set_position(checkpoint.account, checkpoint.position);
        self.total = checkpoint.total;
    }

    /// Credits `amount` new shares to `account`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the position or the total overflows;
    /// nothing changes in that case.
    pub fn mint(&mut self, account: Account, amount: Shares) -> Result<()> {
        let position = self
            .shares_of(&account)
            .checked_add(&amount)
            .ok_or(DexError::Overflow("position overflow on mint"))?;
        let total = self
            .total
            .checked_add(&amount)
            .ok_or(DexError::Overflow("total shares overflow on mint"))?;
        self.set_position(account, position);
        self.total = total;
        Ok(())
    }

    /// Burns `amount` shares from `account`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientShares`] if `amount` is zero or
    /// exceeds the position; nothing changes in that case.
    pub fn burn(&mut self, account: Account, amount: Shares) -> Result<()> {
        let available = self.shares_of(&account);
        if amount.is_zero() || amount > available {
            return Err(DexError::InsufficientShares {
                requested: amount,
                available,
            });
        }
        let position = available
            .checked_sub(&amount)
            .ok_or(DexError::Overflow("position underflow on burn"))?;
        let total = self
            .total
            .checked_sub(&amount)
            .ok_or(DexError::InvariantViolated("total shares below a position"))?;
        self.set_position(account, position);
        self.total = total;
        Ok(())
    }

    /// Recomputes `Σ positions` and compares it with the tracked total.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut sum = Shares::ZERO;
        for shares in self.positions.values() {
            match sum.checked_add(shares) {
                Some(next) => sum = next,
                None => return false,
            }
        }
        sum == self.total
    }

    fn set_position(&mut self, account: Account, shares: Shares) {
        if shares.is_zero() {
            self.positions.remove(&account);
        } else {
            self.positions.insert(account, shares);
        }
    }
}
