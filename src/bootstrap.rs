//! Deploy-time bootstrap of a pool over a [`MemoryLedger`].
//!
//! Reproduces the usual launch sequence of a base-token / native-currency
//! exchange:
//!
//! 1. mint the base asset's whole supply to the deployer;
//! 2. hand a seed grant of it to a second account;
//! 3. approve the pool to pull the deployer's base asset;
//! 4. `init` the pool with matching quote and base amounts.

use crate::assets::MemoryLedger;
use crate::config::DexConfig;
use crate::domain::{Account, Amount, Asset};
use crate::error::{DexError, Result};
use crate::pool::DexPool;
use crate::traits::AssetLedger;

/// `10^18`, one whole unit of an 18-decimal asset.
pub const ETHER: u128 = 1_000_000_000_000_000_000;

/// Recipient of the seed grant unless the plan names another.
pub const DEFAULT_GRANT_RECIPIENT: Account = Account::from_bytes([
    0x8b, 0x1d, 0x5d, 0x73, 0xd9, 0x05, 0x92, 0xe4, 0xe6, 0xdf, 0xb2, 0x89, 0xc3, 0x1a, 0xd5, 0x19,
    0x8a, 0x08, 0x91, 0xec,
]);

/// Amounts and accounts of a bootstrap run.
///
/// Defaults: 1000 ether of base supply, a 10 ether grant, a 100 ether
/// allowance, 5 ether of each asset as opening liquidity and 10 000 ether
/// of native balance for the deployer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapPlan {
    /// Receives the base supply and seeds the pool.
    pub deployer: Account,
    /// Receives `grant_amount` of the base asset.
    pub grant_recipient: Account,
    pub grant_amount: Amount,
    pub base_supply: Amount,
    /// Allowance granted to the pool over the deployer's base asset.
    pub pool_allowance: Amount,
    /// Opening amount of each asset; also the shares minted.
    pub initial_liquidity: Amount,
    pub deployer_native: Amount,
}

impl BootstrapPlan {
    /// The default plan for `deployer`.
    #[must_use]
    pub const fn new(deployer: Account) -> Self {
        Self {
            deployer,
            grant_recipient: DEFAULT_GRANT_RECIPIENT,
            grant_amount: Amount::new(10 * ETHER),
            base_supply: Amount::new(1_000 * ETHER),
            pool_allowance: Amount::new(100 * ETHER),
            initial_liquidity: Amount::new(5 * ETHER),
            deployer_native: Amount::new(10_000 * ETHER),
        }
    }

    /// Checks the plan can run to completion.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidConfiguration`] if the deployer is the zero
    ///   account, the opening liquidity exceeds the allowance, the grant
    ///   plus the opening liquidity exceed the supply, or the native
    ///   balance cannot cover the opening liquidity.
    /// - [`DexError::ZeroAmount`] if the opening liquidity is zero.
    pub fn validate(&self) -> Result<()> {
        if self.deployer.is_zero() {
            return Err(DexError::InvalidConfiguration(
                "deployer must not be the zero account",
            ));
        }
        if self.initial_liquidity.is_zero() {
            return Err(DexError::ZeroAmount("initial liquidity must be positive"));
        }
        if self.initial_liquidity > self.pool_allowance {
            return Err(DexError::InvalidConfiguration(
                "initial liquidity exceeds the pool allowance",
            ));
        }
        let committed = self
            .grant_amount
            .checked_add(&self.initial_liquidity)
            .ok_or(DexError::Overflow("grant plus initial liquidity"))?;
        if committed > self.base_supply {
            return Err(DexError::InvalidConfiguration(
                "grant plus initial liquidity exceed the base supply",
            ));
        }
        if self.initial_liquidity > self.deployer_native {
            return Err(DexError::InvalidConfiguration(
                "deployer cannot fund the initial quote liquidity",
            ));
        }
        Ok(())
    }
}

/// Funds `ledger` according to `plan` and returns an initialized pool.
///
/// # Errors
///
/// Returns the error of [`BootstrapPlan::validate`], of
/// [`DexConfig::validate`], of any ledger step, or of
/// [`DexPool::init`].
///
/// # Examples
///
/// ```
/// use dex_engine::bootstrap::{bootstrap_pool, BootstrapPlan, ETHER};
/// use dex_engine::assets::MemoryLedger;
/// use dex_engine::config::DexConfig;
/// use dex_engine::domain::{Account, Amount, Shares};
///
/// let deployer = Account::from_bytes([0x01; 20]);
/// let config = DexConfig::with_defaults(Account::from_bytes([0xde; 20]))?;
/// let pool = bootstrap_pool(config, &BootstrapPlan::new(deployer), MemoryLedger::new())?;
///
/// assert_eq!(pool.total_shares(), Shares::new(5 * ETHER));
/// assert_eq!(pool.reserves().base(), Amount::new(5 * ETHER));
/// # Ok::<(), dex_engine::error::DexError>(())
/// ```
pub fn bootstrap_pool(
    config: DexConfig,
    plan: &BootstrapPlan,
    mut ledger: MemoryLedger,
) -> Result<DexPool<MemoryLedger>> {
    plan.validate()?;
    let pool_address = config.pool_address();

    ledger.mint(Asset::Base, plan.deployer, plan.base_supply)?;
    ledger.mint(Asset::Quote, plan.deployer, plan.deployer_native)?;
    #[cfg(feature = "tracing")]
    {
        tracing::info!(
            deployer = %plan.deployer,
            base_supply = %plan.base_supply,
            "Minted base supply"
        );
    }

    if !plan.grant_amount.is_zero() {
        ledger.transfer(
            Asset::Base,
            plan.deployer,
            plan.grant_recipient,
            plan.grant_amount,
        )?;
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                recipient = %plan.grant_recipient,
                amount = %plan.grant_amount,
                "Transferred seed grant"
            );
        }
    }

    ledger.approve(Asset::Base, plan.deployer, pool_address, plan.pool_allowance);
    #[cfg(feature = "tracing")]
    {
        tracing::info!(
            pool = %pool_address,
            allowance = %plan.pool_allowance,
            "Approved pool"
        );
    }

    let mut pool = DexPool::new(config, ledger)?;
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    let shares = pool.init(plan.deployer, plan.initial_liquidity, plan.initial_liquidity)?;
    #[cfg(feature = "tracing")]
    {
        tracing::info!(
            provider = %plan.deployer,
            shares = %shares,
            reserves = %pool.reserves(),
            "Seeded pool"
        );
    }
    Ok(pool)
}
