//! Raw asset amount with checked arithmetic.

use core::fmt;

/// An asset amount in its smallest indivisible unit (wei for the native
/// quote asset, the token's base unit for the base asset).
///
/// `Amount` never interprets decimals: one ether is `Amount::new(10^18)`.
/// Reserve and balance arithmetic goes through the `checked_*` methods,
/// which yield `None` where plain integer operators would panic or wrap.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::Amount;
///
/// let reserve = Amount::new(200);
/// let deposit = Amount::new(100);
/// assert_eq!(reserve.checked_add(&deposit), Some(Amount::new(300)));
/// assert_eq!(deposit.checked_sub(&reserve), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    /// Largest amount a reserve or balance can hold.
    pub const MAX: Self = Self(u128::MAX);

    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    /// Raw units.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `self + other`, or `None` past [`Amount::MAX`].
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        if let Some(units) = self.0.checked_add(other.0) {
            Some(Self(units))
        } else {
            None
        }
    }

    /// `self - other`, or `None` when `other` is larger.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        if let Some(units) = self.0.checked_sub(other.0) {
            Some(Self(units))
        } else {
            None
        }
    }
}

impl From<u128> for Amount {
    fn from(units: u128) -> Self {
        Self(units)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
