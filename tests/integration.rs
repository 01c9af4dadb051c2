//! Integration tests exercising the full system through the public API.
//!
//! These tests cover the bootstrap flow, a multi-provider trading
//! lifecycle, the empty-pool path and a custom asset ledger plugged into
//! the pool.

#![allow(clippy::panic)]

use std::collections::HashMap;

use dex_engine::assets::MemoryLedger;
use dex_engine::bootstrap::{bootstrap_pool, BootstrapPlan, DEFAULT_GRANT_RECIPIENT, ETHER};
use dex_engine::config::{DexConfig, EmptyPoolPolicy};
use dex_engine::domain::{
    Account, Amount, Asset, BasisPoints, EventKind, FeeTier, PoolEvent, Reserves, Shares, SwapSide,
};
use dex_engine::error::{DexError, TransferError};
use dex_engine::pool::DexPool;
use dex_engine::traits::AssetLedger;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const POOL: Account = Account::from_bytes([0xde; 20]);
const DEPLOYER: Account = Account::from_bytes([0x01; 20]);
const TRADER: Account = Account::from_bytes([0x02; 20]);
const PROVIDER: Account = Account::from_bytes([0x03; 20]);

fn config() -> DexConfig {
    let Ok(cfg) = DexConfig::with_defaults(POOL) else {
        panic!("valid config");
    };
    cfg
}

fn bootstrapped() -> DexPool<MemoryLedger> {
    let Ok(pool) = bootstrap_pool(config(), &BootstrapPlan::new(DEPLOYER), MemoryLedger::new())
    else {
        panic!("bootstrap");
    };
    pool
}

fn fund(pool: &mut DexPool<MemoryLedger>, account: Account, amount: u128) {
    for asset in [Asset::Quote, Asset::Base] {
        let Ok(()) = pool.ledger_mut().mint(asset, account, Amount::new(amount)) else {
            panic!("mint");
        };
    }
    pool.ledger_mut()
        .approve(Asset::Base, account, POOL, Amount::new(amount));
}

fn assert_custody_matches(pool: &DexPool<MemoryLedger>) {
    let reserves = pool.reserves();
    assert_eq!(pool.ledger().balance_of(Asset::Quote, POOL), reserves.quote());
    assert_eq!(pool.ledger().balance_of(Asset::Base, POOL), reserves.base());
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[test]
fn bootstrap_seeds_one_to_one_pool() {
    let pool = bootstrapped();
    let five = Amount::new(5 * ETHER);
    assert_eq!(pool.reserves(), Reserves::new(five, five));
    assert_eq!(pool.total_shares(), Shares::new(5 * ETHER));
    assert_eq!(pool.shares_of(&DEPLOYER), Shares::new(5 * ETHER));
    assert_eq!(
        pool.ledger().balance_of(Asset::Base, DEFAULT_GRANT_RECIPIENT),
        Amount::new(10 * ETHER)
    );
    assert_eq!(
        pool.ledger().total_supply(Asset::Base),
        Ok(Amount::new(1_000 * ETHER))
    );
    assert_custody_matches(&pool);

    let events = pool.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind(), EventKind::Initialized);
    assert_eq!(events[0].caller(), DEPLOYER);
}

#[test]
fn bootstrap_twice_on_same_pool_rejected() {
    let mut pool = bootstrapped();
    let result = pool.init(DEPLOYER, Amount::new(ETHER), Amount::new(ETHER));
    assert_eq!(result, Err(DexError::AlreadyInitialized));
}

// ---------------------------------------------------------------------------
// Trading lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_keeps_books_and_custody_aligned() {
    let mut pool = bootstrapped();
    fund(&mut pool, TRADER, 100 * ETHER);
    fund(&mut pool, PROVIDER, 100 * ETHER);

    // provider joins at the opening ratio
    let Ok(minted) = pool.deposit(PROVIDER, Amount::new(5 * ETHER)) else {
        panic!("deposit");
    };
    assert_eq!(minted.base_in, Amount::new(5 * ETHER));
    assert_eq!(minted.shares, Shares::new(5 * ETHER));

    // trader buys base, then sells some back
    let k0 = pool.reserves().product();
    let Ok(buy) = pool.swap_in(TRADER, SwapSide::QuoteToBase, Amount::new(ETHER), Amount::ZERO)
    else {
        panic!("buy");
    };
    let Ok(sell) = pool.swap_out(
        TRADER,
        SwapSide::BaseToQuote,
        Amount::new(ETHER / 2),
        buy.amount_out(),
    ) else {
        panic!("sell");
    };
    assert!(sell.amount_in() <= buy.amount_out());
    assert!(pool.reserves().product() >= k0);
    assert_custody_matches(&pool);

    // both providers exit; retained fees leave the joiner ahead in total value
    let Ok(exit) = pool.withdraw(PROVIDER, minted.shares) else {
        panic!("withdraw provider");
    };
    assert!(exit.quote_out.get() + exit.base_out.get() >= 10 * ETHER);
    let Ok(_) = pool.withdraw(DEPLOYER, Shares::new(5 * ETHER)) else {
        panic!("withdraw deployer");
    };

    assert_eq!(pool.total_shares(), Shares::ZERO);
    assert_eq!(pool.reserves(), Reserves::EMPTY);
    assert_custody_matches(&pool);

    let kinds: Vec<_> = pool.drain_events().iter().map(PoolEvent::kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Initialized,
            EventKind::LiquidityProvided,
            EventKind::Swapped,
            EventKind::Swapped,
            EventKind::LiquidityRemoved,
            EventKind::LiquidityRemoved,
        ]
    );
}

#[test]
fn quotes_match_executed_swaps() {
    let mut pool = bootstrapped();
    fund(&mut pool, TRADER, 100 * ETHER);
    let Ok(quoted) = pool.quote(SwapSide::BaseToQuote, Amount::new(ETHER)) else {
        panic!("quote");
    };
    let Ok(executed) = pool.swap_in(
        TRADER,
        SwapSide::BaseToQuote,
        Amount::new(ETHER),
        quoted.amount_out(),
    ) else {
        panic!("swap");
    };
    assert_eq!(quoted, executed);
}

#[test]
fn slippage_bound_blocks_front_run_trade() {
    let mut pool = bootstrapped();
    fund(&mut pool, TRADER, 100 * ETHER);
    fund(&mut pool, PROVIDER, 100 * ETHER);

    let Ok(quoted) = pool.quote(SwapSide::QuoteToBase, Amount::new(ETHER)) else {
        panic!("quote");
    };
    let Ok(_) = pool.swap_in(PROVIDER, SwapSide::QuoteToBase, Amount::new(2 * ETHER), Amount::ZERO)
    else {
        panic!("front run");
    };
    let reserves = pool.reserves();
    let result = pool.swap_in(
        TRADER,
        SwapSide::QuoteToBase,
        Amount::new(ETHER),
        quoted.amount_out(),
    );
    assert!(matches!(result, Err(DexError::SlippageExceeded { .. })));
    assert_eq!(pool.reserves(), reserves);
}

#[test]
fn trader_without_allowance_cannot_sell_base() {
    let mut pool = bootstrapped();
    let Ok(()) = pool
        .ledger_mut()
        .mint(Asset::Base, TRADER, Amount::new(ETHER))
    else {
        panic!("mint");
    };
    let result = pool.swap_in(TRADER, SwapSide::BaseToQuote, Amount::new(ETHER), Amount::ZERO);
    assert!(matches!(
        result,
        Err(DexError::Transfer(TransferError::InsufficientAllowance { .. }))
    ));
    assert_eq!(pool.events().len(), 1);
}

// ---------------------------------------------------------------------------
// Empty pool
// ---------------------------------------------------------------------------

#[test]
fn emptied_pool_can_be_reseeded_at_new_price() {
    let mut pool = bootstrapped();
    let Ok(_) = pool.withdraw(DEPLOYER, Shares::new(5 * ETHER)) else {
        panic!("withdraw");
    };
    let Ok(minted) = pool.reseed(DEPLOYER, Amount::new(4 * ETHER), Amount::new(ETHER)) else {
        panic!("reseed");
    };
    assert_eq!(minted, Shares::new(ETHER));
    assert_eq!(
        pool.spot_price(SwapSide::QuoteToBase),
        Ok((Amount::new(4 * ETHER), Amount::new(ETHER)))
    );
}

#[test]
fn emptied_pool_stays_empty_under_reject_policy() {
    let Ok(cfg) = DexConfig::new(POOL, FeeTier::TIER_1_00_PERCENT, EmptyPoolPolicy::Reject)
    else {
        panic!("config");
    };
    let Ok(mut pool) = bootstrap_pool(cfg, &BootstrapPlan::new(DEPLOYER), MemoryLedger::new())
    else {
        panic!("bootstrap");
    };
    let Ok(_) = pool.withdraw(DEPLOYER, Shares::new(5 * ETHER)) else {
        panic!("withdraw");
    };
    assert_eq!(
        pool.reseed(DEPLOYER, Amount::new(ETHER), Amount::new(ETHER)),
        Err(DexError::ReseedDisabled)
    );
    assert_eq!(
        pool.deposit(DEPLOYER, Amount::new(ETHER)),
        Err(DexError::EmptyPool)
    );
}

// ---------------------------------------------------------------------------
// Custom asset ledger
// ---------------------------------------------------------------------------

/// A ledger that refuses direct transfers of one asset to one account.
#[derive(Debug, Default)]
struct BlockingLedger {
    inner: MemoryLedger,
    blocked: Option<(Asset, Account)>,
}

impl AssetLedger for BlockingLedger {
    fn transfer(
        &mut self,
        asset: Asset,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if self.blocked == Some((asset, to)) {
            return Err(TransferError::InsufficientBalance {
                asset,
                account: from,
                needed: amount,
                available: Amount::ZERO,
            });
        }
        self.inner.transfer(asset, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        asset: Asset,
        spender: Account,
        owner: Account,
        to: Account,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.inner.transfer_from(asset, spender, owner, to, amount)
    }

    fn allowance_of(&self, asset: Asset, owner: Account, spender: Account) -> Amount {
        self.inner.allowance_of(asset, owner, spender)
    }

    fn balance_of(&self, asset: Asset, owner: Account) -> Amount {
        self.inner.balance_of(asset, owner)
    }
}

#[test]
fn custom_ledger_compensates_failed_payout() {
    let mut inner = MemoryLedger::new();
    for asset in [Asset::Quote, Asset::Base] {
        let Ok(()) = inner.mint(asset, TRADER, Amount::new(1_000_000)) else {
            panic!("mint");
        };
    }
    inner.approve(Asset::Base, TRADER, POOL, Amount::new(1_000_000));
    let ledger = BlockingLedger {
        inner,
        blocked: None,
    };
    let Ok(cfg) = DexConfig::new(
        POOL,
        FeeTier::new(BasisPoints::new(25)),
        EmptyPoolPolicy::Reseed,
    ) else {
        panic!("config");
    };
    let Ok(mut pool) = DexPool::new(cfg, ledger) else {
        panic!("pool");
    };
    let Ok(_) = pool.init(TRADER, Amount::new(100_000), Amount::new(100_000)) else {
        panic!("init");
    };

    pool.ledger_mut().blocked = Some((Asset::Base, TRADER));
    let before: HashMap<Asset, Amount> = [Asset::Quote, Asset::Base]
        .into_iter()
        .map(|asset| (asset, pool.ledger().balance_of(asset, TRADER)))
        .collect();

    let result = pool.swap_in(TRADER, SwapSide::QuoteToBase, Amount::new(1_000), Amount::ZERO);
    assert!(matches!(result, Err(DexError::Transfer(_))));
    assert_eq!(
        pool.reserves(),
        Reserves::new(Amount::new(100_000), Amount::new(100_000))
    );
    for (asset, amount) in before {
        assert_eq!(pool.ledger().balance_of(asset, TRADER), amount);
    }
    assert_eq!(pool.ledger().balance_of(Asset::Quote, POOL), Amount::new(100_000));
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[test]
fn events_and_config_serialize_to_json() {
    let pool = bootstrapped();
    let Ok(json) = serde_json::to_string(pool.events()) else {
        panic!("serialize events");
    };
    let Ok(events) = serde_json::from_str::<Vec<PoolEvent>>(&json) else {
        panic!("deserialize events");
    };
    assert_eq!(events.as_slice(), pool.events());

    let Ok(json) = serde_json::to_string(pool.config()) else {
        panic!("serialize config");
    };
    let Ok(cfg) = serde_json::from_str::<DexConfig>(&json) else {
        panic!("deserialize config");
    };
    assert_eq!(&cfg, pool.config());
}
