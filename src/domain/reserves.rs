//! Two-sided reserve snapshot.

use core::fmt;

use bnum::types::U256;

use super::{Amount, Asset, SwapSide};

/// The pool's reserves of both assets at one point in time.
///
/// A plain value: the live copy is owned by the
/// [`ReserveLedger`](crate::ledger::ReserveLedger).  Transition helpers
/// return a new snapshot and never mutate in place, so a controller can
/// stage and validate a change before committing it.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::{Amount, Reserves, SwapSide};
///
/// let r = Reserves::new(Amount::new(10), Amount::new(40));
/// let (r_in, r_out) = r.for_side(SwapSide::BaseToQuote);
/// assert_eq!((r_in, r_out), (Amount::new(40), Amount::new(10)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reserves {
    quote: Amount,
    base: Amount,
}

impl Reserves {
    /// Both sides empty.
    pub const EMPTY: Self = Self::new(Amount::ZERO, Amount::ZERO);

    /// Creates a snapshot from both reserve amounts.
    #[must_use]
    pub const fn new(quote: Amount, base: Amount) -> Self {
        Self { quote, base }
    }

    /// Quote-asset reserve.
    pub const fn quote(&self) -> Amount {
        self.quote
    }

    /// Base-asset reserve.
    pub const fn base(&self) -> Amount {
        self.base
    }

    /// Reserve of the given asset.
    pub const fn get(&self, asset: Asset) -> Amount {
        match asset {
            Asset::Quote => self.quote,
            Asset::Base => self.base,
        }
    }

    /// Returns `true` when both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quote.is_zero() && self.base.is_zero()
    }

    /// Returns `true` when both reserves are strictly positive.
    #[must_use]
    pub const fn is_funded(&self) -> bool {
        !self.quote.is_zero() && !self.base.is_zero()
    }

    /// `(reserve_in, reserve_out)` for a swap in direction `side`.
    #[must_use]
    pub const fn for_side(&self, side: SwapSide) -> (Amount, Amount) {
        (self.get(side.input()), self.get(side.output()))
    }

    /// The constant-product invariant `quote × base`, without overflow.
    #[must_use]
    pub fn product(&self) -> U256 {
        U256::from(self.quote.get()) * U256::from(self.base.get())
    }

    /// Reserves after adding `quote_in` and `base_in`.
    #[must_use]
    pub const fn checked_deposit(&self, quote_in: Amount, base_in: Amount) -> Option<Self> {
        match (self.quote.checked_add(&quote_in), self.base.checked_add(&base_in)) {
            (Some(quote), Some(base)) => Some(Self { quote, base }),
            _ => None,
        }
    }

    /// Reserves after removing `quote_out` and `base_out`.
    #[must_use]
    pub const fn checked_withdraw(&self, quote_out: Amount, base_out: Amount) -> Option<Self> {
        match (self.quote.checked_sub(&quote_out), self.base.checked_sub(&base_out)) {
            (Some(quote), Some(base)) => Some(Self { quote, base }),
            _ => None,
        }
    }

    /// Reserves after a swap: the input side grows by `amount_in`, the
    /// output side shrinks by `amount_out`.
    #[must_use]
    pub const fn checked_swap(
        &self,
        side: SwapSide,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Option<Self> {
        match side {
            SwapSide::QuoteToBase => {
                match (self.quote.checked_add(&amount_in), self.base.checked_sub(&amount_out)) {
                    (Some(quote), Some(base)) => Some(Self { quote, base }),
                    _ => None,
                }
            }
            SwapSide::BaseToQuote => {
                match (self.base.checked_add(&amount_in), self.quote.checked_sub(&amount_out)) {
                    (Some(base), Some(quote)) => Some(Self { quote, base }),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quote={} base={}", self.quote, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserves(q: u128, b: u128) -> Reserves {
        Reserves::new(Amount::new(q), Amount::new(b))
    }

    #[test]
    fn empty_and_funded() {
        assert!(Reserves::EMPTY.is_empty());
        assert!(!Reserves::EMPTY.is_funded());
        assert!(reserves(1, 1).is_funded());
        assert!(!reserves(1, 0).is_funded());
        assert!(!reserves(1, 0).is_empty());
    }

    #[test]
    fn product_does_not_overflow_u128() {
        let r = reserves(u128::MAX, u128::MAX);
        assert!(r.product() > U256::from(u128::MAX));
    }

    #[test]
    fn swap_moves_both_sides() {
        let r = reserves(100, 200);
        assert_eq!(
            r.checked_swap(SwapSide::QuoteToBase, Amount::new(10), Amount::new(18)),
            Some(reserves(110, 182))
        );
        assert_eq!(
            r.checked_swap(SwapSide::BaseToQuote, Amount::new(20), Amount::new(9)),
            Some(reserves(91, 220))
        );
    }

    #[test]
    fn swap_rejects_draining_more_than_reserve() {
        let r = reserves(100, 200);
        assert_eq!(
            r.checked_swap(SwapSide::QuoteToBase, Amount::new(1), Amount::new(201)),
            None
        );
    }

    #[test]
    fn deposit_then_withdraw() {
        let r = reserves(5, 5);
        let Some(up) = r.checked_deposit(Amount::new(5), Amount::new(5)) else {
            unreachable!("no overflow");
        };
        assert_eq!(up, reserves(10, 10));
        assert_eq!(up.checked_withdraw(Amount::new(10), Amount::new(10)), Some(Reserves::EMPTY));
        assert_eq!(r.checked_withdraw(Amount::new(6), Amount::ZERO), None);
    }

    #[test]
    fn display() {
        assert_eq!(reserves(1, 2).to_string(), "quote=1 base=2");
    }
}
