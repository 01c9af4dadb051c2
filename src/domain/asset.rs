//! The two assets a pool trades and the direction of a swap.

use core::fmt;

/// One side of the pool.
///
/// The quote asset is the chain's native currency; the base asset is the
/// fungible token paired against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Asset {
    /// Native currency supplied as call value.
    Quote,
    /// Fungible token moved through allowances.
    Base,
}

impl Asset {
    /// Returns the other side of the pool.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Quote => Self::Base,
            Self::Base => Self::Quote,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote => f.write_str("quote"),
            Self::Base => f.write_str("base"),
        }
    }
}

/// Direction of a swap.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::{Asset, SwapSide};
///
/// let side = SwapSide::QuoteToBase;
/// assert_eq!(side.input(), Asset::Quote);
/// assert_eq!(side.output(), Asset::Base);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapSide {
    /// Sell the quote asset, receive the base asset.
    QuoteToBase,
    /// Sell the base asset, receive the quote asset.
    BaseToQuote,
}

impl SwapSide {
    /// Asset the trader pays in.
    #[must_use]
    pub const fn input(&self) -> Asset {
        match self {
            Self::QuoteToBase => Asset::Quote,
            Self::BaseToQuote => Asset::Base,
        }
    }

    /// Asset the trader receives.
    #[must_use]
    pub const fn output(&self) -> Asset {
        self.input().opposite()
    }
}

impl fmt::Display for SwapSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuoteToBase => f.write_str("quote->base"),
            Self::BaseToQuote => f.write_str("base->quote"),
        }
    }
}
