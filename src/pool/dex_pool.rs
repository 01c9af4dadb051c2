//! The pool controller.
//!
//! Every mutating entry point follows the same sequence:
//!
//! 1. check preconditions against the current state;
//! 2. ask [`pricing`](crate::pricing) for the terms;
//! 3. stage the next reserves and share change and validate them;
//! 4. commit both ledgers;
//! 5. settle the asset movements through the [`AssetLedger`] in one batch;
//! 6. on a failed settlement restore the pre-call state, otherwise record
//!    a [`PoolEvent`].
//!
//! A call therefore either takes full effect or leaves the pool and the
//! asset ledger exactly as they were.

use crate::config::{DexConfig, EmptyPoolPolicy};
use crate::domain::{
    Account, Amount, Asset, FeeTier, LiquidityMinted, PoolEvent, Reserves, Shares, SwapQuote,
    SwapSide, Withdrawal,
};
use crate::error::{DexError, Result, TransferError};
use crate::ledger::{ReserveLedger, ShareLedger};
use crate::pricing;
use crate::traits::{AssetLedger, AssetTransfer};

/// How a call changes the caller's share position.
#[derive(Debug, Clone, Copy)]
enum ShareChange {
    Mint(Shares),
    Burn(Shares),
    Keep,
}

/// A two-asset constant-product pool.
///
/// The pool owns its [`AssetLedger`]; all mutation goes through `&mut self`,
/// so a ledger can never call back into a pool mid-operation.
///
/// # Examples
///
/// ```
/// use dex_engine::assets::MemoryLedger;
/// use dex_engine::config::DexConfig;
/// use dex_engine::domain::{Account, Amount, Asset, Shares, SwapSide};
/// use dex_engine::pool::DexPool;
///
/// let pool_account = Account::from_bytes([0xde; 20]);
/// let alice = Account::from_bytes([0xa1; 20]);
///
/// let mut ledger = MemoryLedger::new();
/// ledger.mint(Asset::Quote, alice, Amount::new(10_000))?;
/// ledger.mint(Asset::Base, alice, Amount::new(10_000))?;
/// ledger.approve(Asset::Base, alice, pool_account, Amount::new(10_000));
///
/// let mut pool = DexPool::new(DexConfig::with_defaults(pool_account)?, ledger)?;
/// let shares = pool.init(alice, Amount::new(1_000), Amount::new(1_000))?;
/// assert_eq!(shares, Shares::new(1_000));
///
/// let quote = pool.swap_in(alice, SwapSide::QuoteToBase, Amount::new(100), Amount::new(1))?;
/// assert_eq!(quote.amount_out(), Amount::new(90));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DexPool<L> {
    config: DexConfig,
    ledger: L,
    reserves: ReserveLedger,
    shares: ShareLedger,
    initialized: bool,
    events: Vec<PoolEvent>,
}

impl<L: AssetLedger> DexPool<L> {
    /// Creates an uninitialized pool over `ledger`.
    ///
    /// # Errors
    ///
    /// Returns the error of [`DexConfig::validate`].
    pub fn new(config: DexConfig, ledger: L) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ledger,
            reserves: ReserveLedger::new(),
            shares: ShareLedger::new(),
            initialized: false,
            events: Vec::new(),
        })
    }

    // -- mutations ------------------------------------------------------------

    /// Seeds the pool with `quote_supplied` of the quote asset and
    /// `base_amount` of the base asset, minting `quote_supplied` shares to
    /// `caller`.  The ratio of the two amounts becomes the opening price.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidCaller`] if `caller` is the pool's own account.
    /// - [`DexError::AlreadyInitialized`] on any call after the first success.
    /// - [`DexError::ZeroAmount`] if either amount is zero.
    /// - [`DexError::Transfer`] if the pool's allowance over the caller's base
    ///   asset is too small, or if either pull fails to settle.
    pub fn init(
        &mut self,
        caller: Account,
        base_amount: Amount,
        quote_supplied: Amount,
    ) -> Result<Shares> {
        let result = if self.initialized {
            Err(DexError::AlreadyInitialized)
        } else {
            self.ensure_caller(caller)
                .and_then(|()| self.seed(caller, base_amount, quote_supplied))
        };
        let minted = traced("init", caller, result)?;
        self.initialized = true;
        self.record(PoolEvent::Initialized {
            provider: caller,
            quote_in: minted.quote_in,
            base_in: minted.base_in,
            shares_minted: minted.shares,
            reserves: self.reserves(),
        });
        Ok(minted.shares)
    }

    /// Seeds a pool whose shares were all burned, exactly like
    /// [`init`](Self::init) seeds a fresh one.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before [`init`](Self::init).
    /// - [`DexError::PoolNotEmpty`] while any share is outstanding.
    /// - [`DexError::InvalidCaller`] if `caller` is the pool's own account.
    /// - [`DexError::ReseedDisabled`] under [`EmptyPoolPolicy::Reject`].
    /// - Otherwise the errors of [`init`](Self::init).
    pub fn reseed(
        &mut self,
        caller: Account,
        base_amount: Amount,
        quote_supplied: Amount,
    ) -> Result<Shares> {
        let result = if !self.initialized {
            Err(DexError::NotInitialized)
        } else if !self.shares.total().is_zero() {
            Err(DexError::PoolNotEmpty)
        } else if self.config.empty_pool_policy() == EmptyPoolPolicy::Reject {
            Err(DexError::ReseedDisabled)
        } else {
            self.ensure_caller(caller)
                .and_then(|()| self.seed(caller, base_amount, quote_supplied))
        };
        let minted = traced("reseed", caller, result)?;
        self.record(PoolEvent::Reseeded {
            provider: caller,
            quote_in: minted.quote_in,
            base_in: minted.base_in,
            shares_minted: minted.shares,
            reserves: self.reserves(),
        });
        Ok(minted.shares)
    }

    /// Deposits `quote_supplied` of the quote asset together with the base
    /// amount the current ratio requires (rounded up), minting shares
    /// proportional to the quote contribution (rounded down).
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before [`init`](Self::init).
    /// - [`DexError::InvalidCaller`] if `caller` is the pool's own account.
    /// - [`DexError::ZeroAmount`] if `quote_supplied` is zero.
    /// - [`DexError::EmptyPool`] once every share has been burned.
    /// - [`DexError::ZeroLiquidityMinted`] if the deposit is too small to
    ///   mint a share.
    /// - [`DexError::Transfer`] if the base allowance is too small or either
    ///   pull fails to settle.
    pub fn deposit(&mut self, caller: Account, quote_supplied: Amount) -> Result<LiquidityMinted> {
        let result = self.try_deposit(caller, quote_supplied);
        let minted = traced("deposit", caller, result)?;
        self.record(PoolEvent::LiquidityProvided {
            provider: caller,
            quote_in: minted.quote_in,
            base_in: minted.base_in,
            shares_minted: minted.shares,
            reserves: self.reserves(),
        });
        Ok(minted)
    }

    /// Burns `shares` of `caller`'s position for a pro-rata share of both
    /// reserves (rounded down).
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before [`init`](Self::init).
    /// - [`DexError::InvalidCaller`] if `caller` is the pool's own account.
    /// - [`DexError::InsufficientShares`] if `shares` is zero or exceeds the
    ///   caller's position.
    /// - [`DexError::ZeroWithdrawal`] if either payout rounds down to zero.
    /// - [`DexError::Transfer`] if a payout fails to settle.
    pub fn withdraw(&mut self, caller: Account, shares: Shares) -> Result<Withdrawal> {
        let result = self.try_withdraw(caller, shares);
        let withdrawal = traced("withdraw", caller, result)?;
        self.record(PoolEvent::LiquidityRemoved {
            provider: caller,
            shares_burned: withdrawal.shares,
            quote_out: withdrawal.quote_out,
            base_out: withdrawal.base_out,
            reserves: self.reserves(),
        });
        Ok(withdrawal)
    }

    /// Sells exactly `amount_in` in direction `side`, requiring at least
    /// `min_amount_out` back.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before [`init`](Self::init).
    /// - [`DexError::EmptyPool`] once every share has been burned.
    /// - [`DexError::InvalidCaller`] if `caller` is the pool's own account.
    /// - [`DexError::ZeroOutput`] if the trade is too small to buy anything.
    /// - [`DexError::SlippageExceeded`] if the output is below
    ///   `min_amount_out`.
    /// - [`DexError::Transfer`] if the input cannot be pulled or the output
    ///   cannot be paid.
    pub fn swap_in(
        &mut self,
        caller: Account,
        side: SwapSide,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapQuote> {
        let result = self.ensure_caller(caller).and_then(|()| {
            let quote = self.quote(side, amount_in)?;
            if quote.amount_out() < min_amount_out {
                return Err(DexError::SlippageExceeded {
                    quoted: quote.amount_out(),
                    bound: min_amount_out,
                });
            }
            self.execute_swap(caller, quote)
        });
        let quote = traced("swap_in", caller, result)?;
        self.record_swap(caller, quote);
        Ok(quote)
    }

    /// Buys exactly `amount_out` in direction `side`, paying at most
    /// `max_amount_in`.
    ///
    /// # Errors
    ///
    /// - [`DexError::NotInitialized`] before [`init`](Self::init).
    /// - [`DexError::InvalidCaller`] if `caller` is the pool's own account.
    /// - [`DexError::ZeroAmount`] if `amount_out` is zero.
    /// - [`DexError::EmptyPool`] once every share has been burned.
    /// - [`DexError::InsufficientReserves`] if `amount_out` would drain the
    ///   output reserve.
    /// - [`DexError::SlippageExceeded`] if the input exceeds `max_amount_in`.
    /// - [`DexError::Transfer`] if the input cannot be pulled or the output
    ///   cannot be paid.
    pub fn swap_out(
        &mut self,
        caller: Account,
        side: SwapSide,
        amount_out: Amount,
        max_amount_in: Amount,
    ) -> Result<SwapQuote> {
        let result = self.ensure_caller(caller).and_then(|()| {
            let quote = self.quote_out(side, amount_out)?;
            if quote.amount_in() > max_amount_in {
                return Err(DexError::SlippageExceeded {
                    quoted: quote.amount_in(),
                    bound: max_amount_in,
                });
            }
            self.execute_swap(caller, quote)
        });
        let quote = traced("swap_out", caller, result)?;
        self.record_swap(caller, quote);
        Ok(quote)
    }

    // -- queries --------------------------------------------------------------

    /// Quotes selling exactly `amount_in`; never mutates.
    ///
    /// # Errors
    ///
    /// [`DexError::NotInitialized`] before [`init`](Self::init), otherwise
    /// the errors of [`pricing::quote_exact_in`].
    pub fn quote(&self, side: SwapSide, amount_in: Amount) -> Result<SwapQuote> {
        self.ensure_initialized()?;
        pricing::quote_exact_in(self.reserves(), side, amount_in, self.fee_tier())
    }

    /// Quotes buying exactly `amount_out`; never mutates.
    ///
    /// # Errors
    ///
    /// [`DexError::NotInitialized`] before [`init`](Self::init), otherwise
    /// the errors of [`pricing::quote_exact_out`].
    pub fn quote_out(&self, side: SwapSide, amount_out: Amount) -> Result<SwapQuote> {
        self.ensure_initialized()?;
        pricing::quote_exact_out(self.reserves(), side, amount_out, self.fee_tier())
    }

    /// Marginal price of `side` as `(reserve_out, reserve_in)`.
    ///
    /// # Errors
    ///
    /// [`DexError::NotInitialized`] or [`DexError::EmptyPool`].
    pub fn spot_price(&self, side: SwapSide) -> Result<(Amount, Amount)> {
        self.ensure_initialized()?;
        pricing::spot_price(self.reserves(), side)
    }

    /// Current reserves.
    #[must_use]
    pub const fn reserves(&self) -> Reserves {
        self.reserves.snapshot()
    }

    /// Shares held by `provider`.
    #[must_use]
    pub fn shares_of(&self, provider: &Account) -> Shares {
        self.shares.shares_of(provider)
    }

    /// Shares outstanding.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.shares.total()
    }

    /// Whether [`init`](Self::init) has succeeded.  Never reverts.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub const fn config(&self) -> &DexConfig {
        &self.config
    }

    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }

    /// Read access to the provider book.
    #[must_use]
    pub const fn share_ledger(&self) -> &ShareLedger {
        &self.shares
    }

    /// Events recorded since the last [`drain_events`](Self::drain_events).
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Takes the buffered events.
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        core::mem::take(&mut self.events)
    }

    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the asset ledger, for funding and approvals.
    ///
    /// Moving assets out of the pool account behind the pool's back leaves
    /// the reserves claiming more than the pool holds; payouts then fail to
    /// settle and roll back.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    // -- internals ------------------------------------------------------------

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(DexError::NotInitialized)
        }
    }

    /// Transfers between the pool account and itself move nothing, so the
    /// pool may never act as its own counterparty.
    fn ensure_caller(&self, caller: Account) -> Result<()> {
        if caller == self.config.pool_address() {
            Err(DexError::InvalidCaller(caller))
        } else {
            Ok(())
        }
    }

    fn seed(
        &mut self,
        caller: Account,
        base_amount: Amount,
        quote_supplied: Amount,
    ) -> Result<LiquidityMinted> {
        let minted = pricing::initial_terms(quote_supplied, base_amount)?;
        self.ensure_allowance(caller, minted.base_in)?;
        let next = Reserves::new(minted.quote_in, minted.base_in);
        let batch = [
            self.pull(Asset::Quote, caller, minted.quote_in),
            self.pull(Asset::Base, caller, minted.base_in),
        ];
        self.apply(caller, next, ShareChange::Mint(minted.shares), &batch)?;
        Ok(minted)
    }

    fn try_deposit(&mut self, caller: Account, quote_supplied: Amount) -> Result<LiquidityMinted> {
        self.ensure_caller(caller)?;
        self.ensure_initialized()?;
        let current = self.reserves();
        let minted = pricing::deposit_terms(current, self.shares.total(), quote_supplied)?;
        self.ensure_allowance(caller, minted.base_in)?;
        let next = current
            .checked_deposit(minted.quote_in, minted.base_in)
            .ok_or(DexError::Overflow("reserves overflow on deposit"))?;
        let batch = [
            self.pull(Asset::Quote, caller, minted.quote_in),
            self.pull(Asset::Base, caller, minted.base_in),
        ];
        self.apply(caller, next, ShareChange::Mint(minted.shares), &batch)?;
        Ok(minted)
    }

    fn try_withdraw(&mut self, caller: Account, shares: Shares) -> Result<Withdrawal> {
        self.ensure_caller(caller)?;
        self.ensure_initialized()?;
        let available = self.shares.shares_of(&caller);
        if shares.is_zero() || shares > available {
            return Err(DexError::InsufficientShares {
                requested: shares,
                available,
            });
        }
        let current = self.reserves();
        let withdrawal = pricing::withdrawal_terms(current, self.shares.total(), shares)?;
        let next = current
            .checked_withdraw(withdrawal.quote_out, withdrawal.base_out)
            .ok_or(DexError::InvariantViolated("payout exceeds reserves"))?;
        let batch = [
            self.pay(Asset::Quote, caller, withdrawal.quote_out),
            self.pay(Asset::Base, caller, withdrawal.base_out),
        ];
        self.apply(caller, next, ShareChange::Burn(shares), &batch)?;
        Ok(withdrawal)
    }

    fn execute_swap(&mut self, caller: Account, quote: SwapQuote) -> Result<SwapQuote> {
        let side = quote.side();
        if side.input() == Asset::Base {
            self.ensure_allowance(caller, quote.amount_in())?;
        }
        let current = self.reserves();
        let next = current
            .checked_swap(side, quote.amount_in(), quote.amount_out())
            .ok_or(DexError::Overflow("reserves overflow on swap"))?;
        if next.product() < current.product() {
            return Err(DexError::InvariantViolated("constant product decreased"));
        }
        let batch = [
            self.pull(side.input(), caller, quote.amount_in()),
            self.pay(side.output(), caller, quote.amount_out()),
        ];
        self.apply(caller, next, ShareChange::Keep, &batch)?;
        Ok(quote)
    }

    /// Checks the pool may `transfer_from` `amount` of the caller's base
    /// asset, before anything is staged.
    fn ensure_allowance(&self, owner: Account, amount: Amount) -> Result<()> {
        let spender = self.config.pool_address();
        let available = self.ledger.allowance_of(Asset::Base, owner, spender);
        if available < amount {
            return Err(TransferError::InsufficientAllowance {
                asset: Asset::Base,
                owner,
                spender,
                needed: amount,
                available,
            }
            .into());
        }
        Ok(())
    }

    /// The native quote asset arrives with the call; the base asset is
    /// pulled through the pool's allowance.
    fn pull(&self, asset: Asset, caller: Account, amount: Amount) -> AssetTransfer {
        let pool = self.config.pool_address();
        match asset {
            Asset::Quote => AssetTransfer::Direct {
                asset,
                from: caller,
                to: pool,
                amount,
            },
            Asset::Base => AssetTransfer::Delegated {
                asset,
                spender: pool,
                owner: caller,
                to: pool,
                amount,
            },
        }
    }

    fn pay(&self, asset: Asset, caller: Account, amount: Amount) -> AssetTransfer {
        AssetTransfer::Direct {
            asset,
            from: self.config.pool_address(),
            to: caller,
            amount,
        }
    }

    /// Validates and commits the staged state, then settles `batch`.
    /// Restores the previous state if settlement fails.
    fn apply(
        &mut self,
        caller: Account,
        next: Reserves,
        change: ShareChange,
        batch: &[AssetTransfer],
    ) -> Result<()> {
        let checkpoint = self.shares.checkpoint(caller);
        match change {
            ShareChange::Mint(amount) => self.shares.mint(caller, amount)?,
            ShareChange::Burn(amount) => self.shares.burn(caller, amount)?,
            ShareChange::Keep => {}
        }
        if let Err(err) = check_backing(next, self.shares.total()) {
            self.shares.restore(checkpoint);
            return Err(err);
        }
        let previous = self.reserves.commit(next);

        if let Err(err) = self.ledger.settle(batch) {
            #[cfg(feature = "tracing")]
            {
                tracing::warn!(
                    caller = %caller,
                    error = %err,
                    reserves = %previous,
                    "Settlement failed, rolling back"
                );
            }
            self.reserves.commit(previous);
            self.shares.restore(checkpoint);
            return Err(err.into());
        }
        Ok(())
    }

    fn record_swap(&mut self, trader: Account, quote: SwapQuote) {
        self.record(PoolEvent::Swapped {
            trader,
            side: quote.side(),
            amount_in: quote.amount_in(),
            amount_out: quote.amount_out(),
            fee: quote.fee(),
            reserves: self.reserves(),
        });
    }

    fn record(&mut self, event: PoolEvent) {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                kind = %event.kind(),
                caller = %event.caller(),
                reserves = %event.reserves(),
                total_shares = %self.shares.total(),
                "Pool updated"
            );
        }
        self.events.push(event);
    }
}

/// Outstanding shares must be backed by both reserves, and an empty pool
/// must hold nothing.
fn check_backing(reserves: Reserves, total_shares: Shares) -> Result<()> {
    match (total_shares.is_zero(), reserves.is_empty(), reserves.is_funded()) {
        (true, true, _) | (false, _, true) => Ok(()),
        (true, false, _) => Err(DexError::InvariantViolated("reserves left without shares")),
        (false, _, false) => Err(DexError::InvariantViolated("shares without reserves")),
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn traced<T>(operation: &'static str, caller: Account, result: Result<T>) -> Result<T> {
    #[cfg(feature = "tracing")]
    {
        if let Err(err) = &result {
            tracing::debug!(operation, caller = %caller, error = %err, "Call rejected");
        }
    }
    result
}
