//! Live reserve balances owned by the pool.

use crate::domain::Reserves;

/// Holds the pool's two-sided reserves.
///
/// Only the pool controller writes to it, and only by committing a
/// [`Reserves`] snapshot it has already staged and validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReserveLedger {
    current: Reserves,
}

impl ReserveLedger {
    /// An empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Reserves::EMPTY,
        }
    }

    /// Current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> Reserves {
        self.current
    }

    /// Replaces the reserves with a staged snapshot and returns the
    /// previous one so the caller can roll back.
    pub fn commit(&mut self, next: Reserves) -> Reserves {
        core::mem::replace(&mut self.current, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, Asset};

    #[test]
    fn commit_returns_previous() {
        let mut ledger = ReserveLedger::new();
        let staged = Reserves::new(Amount::new(5), Amount::new(7));
        assert_eq!(ledger.commit(staged), Reserves::EMPTY);
        assert_eq!(ledger.snapshot(), staged);
        assert_eq!(ledger.snapshot().get(Asset::Base), Amount::new(7));
    }
}
