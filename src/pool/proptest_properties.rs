//! Property-based tests for the pool's accounting invariants.
//!
//! 1. **Constant product**: `quote × base` never decreases across swaps.
//! 2. **Share conservation**: positions always sum to the total.
//! 3. **Deposit round trip**: with no trade in between, deposit then
//!    withdraw returns the quote supplied exactly and the base supplied
//!    less at most the one unit its ceiling added.
//! 4. **Quote purity**: quoting twice gives the same answer and changes
//!    nothing.
//! 5. **Slippage atomicity**: a rejected bound leaves pool and ledger
//!    untouched.
//! 6. **Exact-out covers exact-in**: paying the exact-out input buys at
//!    least the requested output.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::assets::MemoryLedger;
use crate::config::DexConfig;
use crate::domain::{Account, Amount, Asset, Shares, SwapSide};
use crate::pool::DexPool;
use crate::pricing;
use crate::traits::AssetLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const POOL: Account = Account::from_bytes([0xde; 20]);
const ALICE: Account = Account::from_bytes([0xa1; 20]);
const BOB: Account = Account::from_bytes([0xb0; 20]);

const FUNDING: u128 = 1_000_000_000_000_000_000_000_000;

fn make_pool(quote: u128, base: u128) -> DexPool<MemoryLedger> {
    let mut ledger = MemoryLedger::new();
    for account in [ALICE, BOB] {
        for asset in [Asset::Quote, Asset::Base] {
            let Ok(()) = ledger.mint(asset, account, Amount::new(FUNDING)) else {
                panic!("mint");
            };
        }
        ledger.approve(Asset::Base, account, POOL, Amount::new(FUNDING));
    }
    let Ok(config) = DexConfig::with_defaults(POOL) else {
        panic!("valid config");
    };
    let Ok(mut pool) = DexPool::new(config, ledger) else {
        panic!("valid pool");
    };
    let Ok(_) = pool.init(ALICE, Amount::new(base), Amount::new(quote)) else {
        panic!("init");
    };
    pool
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..1_000_000_000_000_000_000u128
}

fn side_strategy() -> impl Strategy<Value = SwapSide> {
    prop_oneof![Just(SwapSide::QuoteToBase), Just(SwapSide::BaseToQuote)]
}

// ---------------------------------------------------------------------------
// 1. Constant product
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_constant_product_never_decreases(
        quote in reserve_strategy(),
        base in reserve_strategy(),
        trades in prop::collection::vec((side_strategy(), 1u128..1_000_000_000u128), 1..8),
    ) {
        let mut pool = make_pool(quote, base);
        let mut k = pool.reserves().product();
        for (side, amount_in) in trades {
            if pool.swap_in(BOB, side, Amount::new(amount_in), Amount::ZERO).is_err() {
                continue;
            }
            let next = pool.reserves().product();
            prop_assert!(next >= k, "k decreased: {} -> {}", k, next);
            k = next;
        }
    }

    #[test]
    fn prop_exact_out_never_decreases_product(
        quote in reserve_strategy(),
        base in reserve_strategy(),
        side in side_strategy(),
        divisor in 2u128..1_000u128,
    ) {
        let mut pool = make_pool(quote, base);
        let k = pool.reserves().product();
        let (_, reserve_out) = pool.reserves().for_side(side);
        let amount_out = (reserve_out.get() / divisor).max(1);
        if pool.swap_out(BOB, side, Amount::new(amount_out), Amount::MAX).is_ok() {
            prop_assert!(pool.reserves().product() >= k);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Share conservation and 3. deposit round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shares_sum_to_total(
        quote in reserve_strategy(),
        base in reserve_strategy(),
        deposits in prop::collection::vec(1u128..1_000_000_000_000u128, 1..6),
        burn_divisor in 1u128..10u128,
    ) {
        let mut pool = make_pool(quote, base);
        for amount in deposits {
            let _ = pool.deposit(BOB, Amount::new(amount));
            prop_assert!(pool.share_ledger().is_consistent());
        }
        let burn = pool.shares_of(&ALICE).get() / burn_divisor;
        let _ = pool.withdraw(ALICE, Shares::new(burn));
        prop_assert!(pool.share_ledger().is_consistent());
        let sum = pool.shares_of(&ALICE).get() + pool.shares_of(&BOB).get();
        prop_assert_eq!(sum, pool.total_shares().get());
    }

    #[test]
    fn prop_deposit_withdraw_returns_what_was_supplied(
        quote in reserve_strategy(),
        base in reserve_strategy(),
        supplied in 1u128..1_000_000_000_000u128,
    ) {
        let mut pool = make_pool(quote, base);
        let Ok(minted) = pool.deposit(BOB, Amount::new(supplied)) else {
            return Ok(());
        };
        let Ok(withdrawal) = pool.withdraw(BOB, minted.shares) else {
            return Ok(());
        };
        prop_assert_eq!(withdrawal.shares, minted.shares);
        prop_assert_eq!(withdrawal.quote_out, minted.quote_in);
        prop_assert!(withdrawal.base_out <= minted.base_in);
        prop_assert!(minted.base_in.get() - withdrawal.base_out.get() <= 1);
    }
}

// ---------------------------------------------------------------------------
// 4. Quote purity and 5. slippage atomicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_is_pure(
        quote in reserve_strategy(),
        base in reserve_strategy(),
        side in side_strategy(),
        amount_in in 1u128..1_000_000_000_000u128,
    ) {
        let pool = make_pool(quote, base);
        let before = pool.reserves();
        let first = pool.quote(side, Amount::new(amount_in));
        let second = pool.quote(side, Amount::new(amount_in));
        prop_assert_eq!(first, second);
        prop_assert_eq!(pool.reserves(), before);
    }

    #[test]
    fn prop_slippage_failure_mutates_nothing(
        quote in reserve_strategy(),
        base in reserve_strategy(),
        side in side_strategy(),
        amount_in in 1u128..1_000_000_000_000u128,
    ) {
        let mut pool = make_pool(quote, base);
        let Ok(quoted) = pool.quote(side, Amount::new(amount_in)) else {
            return Ok(());
        };
        let reserves = pool.reserves();
        let ledger = pool.ledger().clone();
        let Some(bound) = quoted.amount_out().checked_add(&Amount::new(1)) else {
            return Ok(());
        };
        let result = pool.swap_in(BOB, side, Amount::new(amount_in), bound);
        prop_assert!(result.is_err());
        prop_assert_eq!(pool.reserves(), reserves);
        prop_assert_eq!(pool.ledger(), &ledger);
        prop_assert_eq!(pool.events().len(), 1);
    }
}

// ---------------------------------------------------------------------------
// 6. Exact-out covers exact-in
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exact_out_input_buys_requested_output(
        quote in reserve_strategy(),
        base in reserve_strategy(),
        side in side_strategy(),
        divisor in 2u128..10_000u128,
    ) {
        let pool = make_pool(quote, base);
        let reserves = pool.reserves();
        let (_, reserve_out) = reserves.for_side(side);
        let amount_out = Amount::new((reserve_out.get() / divisor).max(1));
        let Ok(needed) = pool.quote_out(side, amount_out) else {
            return Ok(());
        };
        let Ok(bought) = pricing::quote_exact_in(reserves, side, needed.amount_in(), pool.fee_tier())
        else {
            return Ok(());
        };
        prop_assert!(bought.amount_out() >= amount_out);
    }

    #[test]
    fn prop_pool_custody_matches_reserves(
        quote in reserve_strategy(),
        base in reserve_strategy(),
        trades in prop::collection::vec((side_strategy(), 1u128..1_000_000_000u128), 1..6),
    ) {
        let mut pool = make_pool(quote, base);
        for (side, amount_in) in trades {
            let _ = pool.swap_in(BOB, side, Amount::new(amount_in), Amount::ZERO);
        }
        let reserves = pool.reserves();
        prop_assert_eq!(pool.ledger().balance_of(Asset::Quote, POOL), reserves.quote());
        prop_assert_eq!(pool.ledger().balance_of(Asset::Base, POOL), reserves.base());
    }
}
