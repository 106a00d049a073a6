#![no_std]

//! Credit line contract: lender-configured underwriting bounds, delegated
//! per-borrower terms, and loan-terms derivation for the lending market.
//!
//! # Roles
//! * lender — wired at `initialize`; owns the configuration, the admin
//!   list, and the pause switch.
//! * admin — delegated by the lender; manages per-borrower underwriting.
//! * market — the external loan-lifecycle orchestrator; the only caller
//!   allowed to consume borrowing capacity via `on_before_loan_taken`.
//!
//! Every state-mutating entry point returns `Result`; an `Err` aborts the
//! invocation and rolls back all storage writes, so there is never a
//! partially applied configuration or capacity change.

mod events;
mod rates;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

use events::{
    publish_admin_configured, publish_borrower_configured, publish_credit_line_configured,
    publish_paused, AdminConfiguredEvent, BorrowerConfiguredEvent, CreditLineConfiguredEvent,
};
use types::{BorrowPolicy, BorrowerConfig, CreditLineConfig, Error, LoanTerms};

#[contract]
pub struct CreditLine;

#[contractimpl]
impl CreditLine {
    /// One-time wiring of the market, lender, and lending token addresses.
    /// Stands in for the factory's construction step; not reconfigurable.
    pub fn initialize(env: Env, market: Address, lender: Address, token: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        lender.require_auth();
        storage::write_wiring(&env, &market, &lender, &token);
        Ok(())
    }

    /// Replace the credit line configuration wholesale (lender only).
    ///
    /// Fails with `InvalidCreditLineConfiguration` if any min/max pair is
    /// out of order or a fixed-point denominator is zero; nothing is
    /// applied in that case.
    pub fn configure_credit_line(env: Env, config: CreditLineConfig) -> Result<(), Error> {
        Self::require_lender_auth(&env)?;
        storage::bump_instance_ttl(&env);
        config.validate()?;
        storage::write_config(&env, &config);
        publish_credit_line_configured(
            &env,
            CreditLineConfiguredEvent {
                treasury: config.treasury,
                min_borrow_amount: config.min_borrow_amount,
                max_borrow_amount: config.max_borrow_amount,
                interest_rate_factor: config.interest_rate_factor,
            },
        );
        Ok(())
    }

    /// Current credit line configuration, if one has been set.
    pub fn credit_line_configuration(env: Env) -> Option<CreditLineConfig> {
        storage::read_config(&env)
    }

    /// Grant or revoke admin status (lender only). A no-op toggle is
    /// rejected with `AlreadyConfigured` so callers must track state
    /// instead of double-submitting.
    pub fn configure_admin(env: Env, account: Address, admin: bool) -> Result<(), Error> {
        Self::require_lender_auth(&env)?;
        if storage::read_admin(&env, &account) == admin {
            return Err(Error::AlreadyConfigured);
        }
        storage::write_admin(&env, &account, admin);
        publish_admin_configured(&env, AdminConfiguredEvent { account, admin });
        Ok(())
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        storage::read_admin(&env, &account)
    }

    /// Write one borrower's underwriting terms (admin only, not paused).
    /// The whole record is validated against the credit line bounds; any
    /// violation rejects it without touching storage.
    pub fn configure_borrower(
        env: Env,
        caller: Address,
        borrower: Address,
        config: BorrowerConfig,
    ) -> Result<(), Error> {
        Self::require_admin_auth(&env, &caller)?;
        Self::require_not_paused(&env)?;
        let line = storage::read_config(&env).ok_or(Error::InvalidCreditLineConfiguration)?;
        Self::store_borrower(&env, &line, &borrower, &config)
    }

    /// Batch form of `configure_borrower`. Fails fast: the first invalid
    /// record aborts the call, and the rollback discards any earlier
    /// writes, so the batch applies atomically or not at all.
    pub fn configure_borrowers(
        env: Env,
        caller: Address,
        borrowers: Vec<Address>,
        configs: Vec<BorrowerConfig>,
    ) -> Result<(), Error> {
        Self::require_admin_auth(&env, &caller)?;
        Self::require_not_paused(&env)?;
        if borrowers.len() != configs.len() {
            return Err(Error::ArrayLengthMismatch);
        }
        let line = storage::read_config(&env).ok_or(Error::InvalidCreditLineConfiguration)?;
        for (borrower, config) in borrowers.iter().zip(configs.iter()) {
            Self::store_borrower(&env, &line, &borrower, &config)?;
        }
        Ok(())
    }

    pub fn borrower_configuration(env: Env, borrower: Address) -> Option<BorrowerConfig> {
        storage::read_borrower(&env, &borrower)
    }

    /// Derive loan terms for a borrower without consuming capacity (view).
    ///
    /// # Errors
    /// * `InvalidAmount` — amount is non-positive or outside the
    ///   borrower's [min, max] window (boundaries inclusive).
    /// * `BorrowerConfigurationExpired` — no configuration, or the ledger
    ///   time is past `expiration` (a timestamp equal to `expiration`
    ///   still passes).
    /// * `InvalidDuration` — duration outside the borrower's negotiable
    ///   window.
    pub fn determine_loan_terms(
        env: Env,
        borrower: Address,
        amount: i128,
        duration_in_periods: u32,
    ) -> Result<LoanTerms, Error> {
        let (terms, _) = Self::build_loan_terms(&env, &borrower, amount, duration_in_periods)?;
        Ok(terms)
    }

    /// Market hook, called while issuing a loan. Re-derives the terms (so
    /// every `determine_loan_terms` validation applies) and then consumes
    /// borrowing capacity according to the borrower's policy:
    /// `Reset` zeroes `max_borrow_amount`, `Decrease` subtracts the
    /// amount, `Keep` leaves it untouched.
    pub fn on_before_loan_taken(
        env: Env,
        borrower: Address,
        amount: i128,
        duration_in_periods: u32,
        _loan_id: u64,
    ) -> Result<LoanTerms, Error> {
        Self::require_market_auth(&env)?;
        Self::require_not_paused(&env)?;
        let (terms, mut config) =
            Self::build_loan_terms(&env, &borrower, amount, duration_in_periods)?;
        match config.borrow_policy {
            BorrowPolicy::Keep => {}
            BorrowPolicy::Decrease => {
                // Capacity exhaustion; unreachable after re-validation but
                // kept checked rather than assumed.
                config.max_borrow_amount = config
                    .max_borrow_amount
                    .checked_sub(amount)
                    .ok_or(Error::InvalidAmount)?;
                storage::write_borrower(&env, &borrower, &config);
            }
            BorrowPolicy::Reset => {
                config.max_borrow_amount = 0;
                storage::write_borrower(&env, &borrower, &config);
            }
        }
        Ok(terms)
    }

    /// Pause borrower configuration and the market hook (lender only).
    /// Views and lender-level configuration stay available.
    pub fn pause(env: Env) -> Result<(), Error> {
        Self::require_lender_auth(&env)?;
        storage::write_paused(&env, true);
        publish_paused(&env, true);
        Ok(())
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        Self::require_lender_auth(&env)?;
        storage::write_paused(&env, false);
        publish_paused(&env, false);
        Ok(())
    }

    pub fn paused(env: Env) -> bool {
        storage::read_paused(&env)
    }

    pub fn market(env: Env) -> Result<Address, Error> {
        storage::read_market(&env)
    }

    pub fn lender(env: Env) -> Result<Address, Error> {
        storage::read_lender(&env)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        storage::read_token(&env)
    }

    // ── internal ─────────────────────────────────────────────────────────

    fn require_lender_auth(env: &Env) -> Result<Address, Error> {
        let lender = storage::read_lender(env)?;
        lender.require_auth();
        Ok(lender)
    }

    fn require_market_auth(env: &Env) -> Result<Address, Error> {
        let market = storage::read_market(env)?;
        market.require_auth();
        Ok(market)
    }

    fn require_admin_auth(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if !storage::read_admin(env, caller) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn require_not_paused(env: &Env) -> Result<(), Error> {
        if storage::read_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    fn store_borrower(
        env: &Env,
        line: &CreditLineConfig,
        borrower: &Address,
        config: &BorrowerConfig,
    ) -> Result<(), Error> {
        config.validate(line)?;
        storage::write_borrower(env, borrower, config);
        publish_borrower_configured(
            env,
            BorrowerConfiguredEvent {
                borrower: borrower.clone(),
                expiration: config.expiration,
                max_borrow_amount: config.max_borrow_amount,
            },
        );
        Ok(())
    }

    /// Shared validation path for `determine_loan_terms` and the market
    /// hook. A missing borrower configuration is treated as the
    /// zero-expiration case: borrowing is disabled.
    fn build_loan_terms(
        env: &Env,
        borrower: &Address,
        amount: i128,
        duration_in_periods: u32,
    ) -> Result<(LoanTerms, BorrowerConfig), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let line = storage::read_config(env).ok_or(Error::InvalidCreditLineConfiguration)?;
        let config =
            storage::read_borrower(env, borrower).ok_or(Error::BorrowerConfigurationExpired)?;
        if env.ledger().timestamp() > config.expiration {
            return Err(Error::BorrowerConfigurationExpired);
        }
        if amount < config.min_borrow_amount || amount > config.max_borrow_amount {
            return Err(Error::InvalidAmount);
        }
        if duration_in_periods < config.min_duration_in_periods
            || duration_in_periods > config.max_duration_in_periods
        {
            return Err(Error::InvalidDuration);
        }
        let addon_amount = if config.addon_recipient.is_some() {
            rates::calculate_addon_amount(
                amount,
                duration_in_periods,
                config.addon_fixed_cost_rate,
                config.addon_period_cost_rate,
                line.interest_rate_factor,
            )
            .ok_or(Error::Overflow)?
        } else {
            0
        };
        let terms = LoanTerms {
            token: storage::read_token(env)?,
            treasury: line.treasury.clone(),
            period_in_seconds: line.period_in_seconds,
            duration_in_periods,
            interest_rate_factor: line.interest_rate_factor,
            interest_rate_primary: config.interest_rate_primary,
            interest_rate_secondary: config.interest_rate_secondary,
            interest_formula: config.interest_formula,
            addon_recipient: config.addon_recipient.clone(),
            addon_amount,
            auto_repayment: config.auto_repayment,
        };
        Ok((terms, config))
    }
}
