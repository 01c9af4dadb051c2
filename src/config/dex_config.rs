//! Configuration for a constant-product exchange pool.

use core::fmt;

use crate::domain::{Account, BasisPoints, FeeTier};
use crate::error::{DexError, Result};

/// What a pool does once every share has been burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmptyPoolPolicy {
    /// `reseed` may set a new price ratio, exactly like `init`.
    #[default]
    Reseed,
    /// The emptied pool stays empty for good.
    Reject,
}

impl fmt::Display for EmptyPoolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reseed => f.write_str("reseed"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Immutable parameters of a [`DexPool`](crate::pool::DexPool).
///
/// # Validation
///
/// - `pool_address` must not be the zero account.
/// - The fee must be strictly below 100%.
///
/// # Examples
///
/// ```
/// use dex_engine::config::{DexConfig, EmptyPoolPolicy};
/// use dex_engine::domain::{Account, FeeTier};
///
/// let cfg = DexConfig::new(
///     Account::from_bytes([0xde; 20]),
///     FeeTier::TIER_0_30_PERCENT,
///     EmptyPoolPolicy::Reseed,
/// );
/// assert!(cfg.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DexConfig {
    pool_address: Account,
    #[cfg_attr(feature = "serde", serde(default))]
    fee_tier: FeeTier,
    #[cfg_attr(feature = "serde", serde(default))]
    empty_pool_policy: EmptyPoolPolicy,
}

impl DexConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(
        pool_address: Account,
        fee_tier: FeeTier,
        empty_pool_policy: EmptyPoolPolicy,
    ) -> Result<Self> {
        let config = Self {
            pool_address,
            fee_tier,
            empty_pool_policy,
        };
        config.validate()?;
        Ok(config)
    }

    /// A 0.30% pool that may be re-seeded.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn with_defaults(pool_address: Account) -> Result<Self> {
        Self::new(pool_address, FeeTier::default(), EmptyPoolPolicy::default())
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidConfiguration`] if `pool_address` is zero.
    /// - [`DexError::InvalidFee`] if the fee is 100% or more.
    pub fn validate(&self) -> Result<()> {
        if self.pool_address.is_zero() {
            return Err(DexError::InvalidConfiguration(
                "pool address must not be the zero account",
            ));
        }
        if self.fee_tier.basis_points() >= BasisPoints::MAX_PERCENT {
            return Err(DexError::InvalidFee("fee must be below 100%"));
        }
        Ok(())
    }

    /// Account that holds the pool's reserves in the asset ledger.
    #[must_use]
    pub const fn pool_address(&self) -> Account {
        self.pool_address
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Behaviour once every share has been burned.
    #[must_use]
    pub const fn empty_pool_policy(&self) -> EmptyPoolPolicy {
        self.empty_pool_policy
    }
}

impl fmt::Display for DexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DexConfig(pool={}, fee={}, empty={})",
            self.pool_address, self.fee_tier, self.empty_pool_policy
        )
    }
}
