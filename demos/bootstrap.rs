//! Bootstrap example.
//!
//! Funds an in-memory ledger, seeds a pool with 5 ether of each asset,
//! then trades against it in both directions and removes liquidity.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=dex_engine=debug cargo run --example bootstrap
//! ```

use dex_engine::assets::MemoryLedger;
use dex_engine::bootstrap::{bootstrap_pool, BootstrapPlan, ETHER};
use dex_engine::config::DexConfig;
use dex_engine::domain::{Account, Amount, Asset, BasisPoints, Shares, SwapSide};
use dex_engine::traits::AssetLedger;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Constant-product DEX bootstrap ===\n");

    // ── 1. Deploy ───────────────────────────────────────────────────────
    let deployer = Account::from_bytes([0x01; 20]);
    let pool_account = Account::from_bytes([0xde; 20]);
    let config = DexConfig::with_defaults(pool_account)?;
    let plan = BootstrapPlan::new(deployer);

    let mut pool = bootstrap_pool(config, &plan, MemoryLedger::new())?;
    println!("Config:   {config}");
    println!("Reserves: {}", pool.reserves());
    println!("Shares:   {}\n", pool.total_shares());

    // ── 2. Fund a trader ────────────────────────────────────────────────
    let trader = Account::from_bytes([0x02; 20]);
    pool.ledger_mut()
        .mint(Asset::Quote, trader, Amount::new(10 * ETHER))?;
    pool.ledger_mut()
        .mint(Asset::Base, trader, Amount::new(10 * ETHER))?;
    pool.ledger_mut()
        .approve(Asset::Base, trader, pool_account, Amount::new(10 * ETHER));

    // ── 3. Trade ────────────────────────────────────────────────────────
    let preview = pool.quote(SwapSide::QuoteToBase, Amount::new(ETHER))?;
    let min_out = preview.min_out_with_tolerance(BasisPoints::new(50))?;
    let buy = pool.swap_in(trader, SwapSide::QuoteToBase, Amount::new(ETHER), min_out)?;
    println!("Buy:  {buy}");

    let sell = pool.swap_out(
        trader,
        SwapSide::BaseToQuote,
        Amount::new(ETHER / 4),
        buy.amount_out(),
    )?;
    println!("Sell: {sell}");

    let (num, den) = pool.spot_price(SwapSide::QuoteToBase)?;
    println!("Spot: {num} base per {den} quote\n");

    // ── 4. Remove half of the deployer's liquidity ──────────────────────
    let half = Shares::new(pool.shares_of(&deployer).get() / 2);
    let withdrawal = pool.withdraw(deployer, half)?;
    println!(
        "Withdrew {} quote and {} base for {} shares",
        withdrawal.quote_out, withdrawal.base_out, withdrawal.shares
    );
    println!(
        "Deployer balances: quote={} base={}",
        pool.ledger().balance_of(Asset::Quote, deployer),
        pool.ledger().balance_of(Asset::Base, deployer)
    );

    // ── 5. Event log ────────────────────────────────────────────────────
    println!("\nEvents:");
    for event in pool.drain_events() {
        println!("  {event}");
    }

    Ok(())
}
