#![no_std]

//! Liquidity pool contract: the lender's capital ledger behind one or
//! more credit lines, reconciled against loan lifecycle hooks from the
//! lending market.
//!
//! # Roles
//! * lender — wired at `initialize`; moves capital in and out and owns
//!   the admin list and the pause switch.
//! * admin — delegated by the lender; may push repayments into the
//!   market on borrowers' behalf.
//! * market — the external loan-lifecycle orchestrator; the only caller
//!   allowed to invoke the `on_*` hooks.
//!
//! Capital is tracked per credit line as a `PoolBalance`: `borrowable`
//! principal available for new loans plus accumulated `addons` fees.
//! Every state-mutating entry point returns `Result`; an `Err` aborts
//! the invocation and rolls back all storage writes.

mod events;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, token, vec, Address, Env, IntoVal, Symbol, Val, Vec};

use events::{
    publish_auto_repayment, publish_deposit, publish_paused, publish_repayment_initiated,
    publish_rescue, publish_withdraw, AutoRepaymentEvent, DepositEvent, RepaymentInitiatedEvent,
    RescueEvent, WithdrawEvent,
};
use types::{Error, LoanState, PoolBalance};

/// How long, in ledgers, the market's spending allowance on the pooled
/// token stays live after being granted.
const MARKET_ALLOWANCE_TTL_LEDGERS: u32 = 200_000;

#[contract]
pub struct LiquidityPool;

#[contractimpl]
impl LiquidityPool {
    /// One-time wiring of the market, lender, and pooled token addresses.
    /// Stands in for the factory's construction step; not reconfigurable.
    pub fn initialize(env: Env, market: Address, lender: Address, token: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        lender.require_auth();
        storage::write_wiring(&env, &market, &lender, &token);
        Ok(())
    }

    /// Move `amount` of the pooled token from the lender into the pool
    /// and credit it as borrowable capital for `credit_line`.
    ///
    /// The first successful deposit also grants the market an unlimited
    /// spending allowance on the pooled token, so it can move principal
    /// out when issuing loans.
    pub fn deposit(env: Env, credit_line: Address, amount: i128) -> Result<(), Error> {
        storage::enter_reentrancy_guard(&env)?;
        let lender = Self::require_lender_auth(&env)?;
        storage::bump_instance_ttl(&env);
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let mut balance = storage::read_balance(&env, &credit_line);
        balance.borrowable = balance
            .borrowable
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        storage::write_balance(&env, &credit_line, &balance);

        let token_client = token::Client::new(&env, &storage::read_token(&env)?);
        let pool = env.current_contract_address();
        token_client.transfer(&lender, &pool, &amount);
        if !storage::read_market_approved(&env) {
            let market = storage::read_market(&env)?;
            let expiration_ledger = env.ledger().sequence() + MARKET_ALLOWANCE_TTL_LEDGERS;
            token_client.approve(&pool, &market, &i128::MAX, &expiration_ledger);
            storage::write_market_approved(&env);
        }

        publish_deposit(&env, DepositEvent { credit_line, amount });
        storage::leave_reentrancy_guard(&env);
        Ok(())
    }

    /// Take capital back out of `credit_line`'s balance and transfer it
    /// to the lender. Either component may be zero, but not both.
    pub fn withdraw(
        env: Env,
        credit_line: Address,
        borrowable_amount: i128,
        addon_amount: i128,
    ) -> Result<(), Error> {
        storage::enter_reentrancy_guard(&env)?;
        let lender = Self::require_lender_auth(&env)?;
        if borrowable_amount < 0 || addon_amount < 0 {
            return Err(Error::InvalidAmount);
        }
        if borrowable_amount == 0 && addon_amount == 0 {
            return Err(Error::InvalidAmount);
        }
        let mut balance = storage::read_balance(&env, &credit_line);
        if borrowable_amount > balance.borrowable || addon_amount > balance.addons {
            return Err(Error::InsufficientBalance);
        }
        balance.borrowable -= borrowable_amount;
        balance.addons -= addon_amount;
        storage::write_balance(&env, &credit_line, &balance);

        let token_client = token::Client::new(&env, &storage::read_token(&env)?);
        token_client.transfer(
            &env.current_contract_address(),
            &lender,
            &(borrowable_amount + addon_amount),
        );

        publish_withdraw(
            &env,
            WithdrawEvent {
                credit_line,
                borrowable_amount,
                addon_amount,
            },
        );
        storage::leave_reentrancy_guard(&env);
        Ok(())
    }

    /// Recover tokens that ended up on the pool outside its accounting,
    /// e.g. a direct transfer of an unrelated asset. No balance is
    /// touched; the tokens go to the lender.
    pub fn rescue(env: Env, token: Address, amount: i128) -> Result<(), Error> {
        storage::enter_reentrancy_guard(&env)?;
        let lender = Self::require_lender_auth(&env)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &lender,
            &amount,
        );
        publish_rescue(&env, RescueEvent { token, amount });
        storage::leave_reentrancy_guard(&env);
        Ok(())
    }

    /// Push a batch of repayments into the market on borrowers' behalf
    /// (admin only). The market settles each one against the pool's
    /// allowance; any repayment failing there aborts and rolls back the
    /// whole batch.
    pub fn auto_repay(
        env: Env,
        caller: Address,
        loan_ids: Vec<u64>,
        amounts: Vec<i128>,
    ) -> Result<(), Error> {
        Self::require_admin_auth(&env, &caller)?;
        if loan_ids.len() != amounts.len() {
            return Err(Error::ArrayLengthMismatch);
        }
        publish_auto_repayment(
            &env,
            AutoRepaymentEvent {
                count: loan_ids.len(),
            },
        );
        let market = storage::read_market(&env)?;
        let repay = Symbol::new(&env, "repay_loan");
        for (loan_id, amount) in loan_ids.iter().zip(amounts.iter()) {
            publish_repayment_initiated(&env, RepaymentInitiatedEvent { loan_id, amount });
            let args: Vec<Val> = vec![&env, loan_id.into_val(&env), amount.into_val(&env)];
            env.invoke_contract::<()>(&market, &repay, args);
        }
        Ok(())
    }

    // ── market hooks ─────────────────────────────────────────────────────

    /// Called by the market before issuing a loan. The pool has no veto
    /// beyond its pause switch; issuance capacity is enforced by the
    /// balance reconciliation in `on_after_loan_taken`.
    pub fn on_before_loan_taken(
        env: Env,
        _loan_id: u64,
        _credit_line: Address,
    ) -> Result<bool, Error> {
        Self::require_market_auth(&env)?;
        Self::require_not_paused(&env)?;
        Ok(true)
    }

    /// Called by the market after issuing a loan. Fetches the loan from
    /// the market, moves its principal plus addon out of `credit_line`'s
    /// borrowable balance, accrues the addon, and remembers which credit
    /// line funded the loan.
    pub fn on_after_loan_taken(env: Env, loan_id: u64, credit_line: Address) -> Result<bool, Error> {
        let market = Self::require_market_auth(&env)?;
        Self::require_not_paused(&env)?;
        let loan = Self::fetch_loan_state(&env, &market, loan_id);
        let total = loan
            .borrowed_amount
            .checked_add(loan.addon_amount)
            .ok_or(Error::Overflow)?;
        let mut balance = storage::read_balance(&env, &credit_line);
        if total > balance.borrowable {
            return Err(Error::InsufficientBalance);
        }
        balance.borrowable -= total;
        balance.addons = balance
            .addons
            .checked_add(loan.addon_amount)
            .ok_or(Error::Overflow)?;
        storage::write_balance(&env, &credit_line, &balance);
        storage::write_loan_credit_line(&env, loan_id, &credit_line);
        Ok(true)
    }

    /// Called by the market after a repayment lands. Returns the repaid
    /// principal to the funding credit line's borrowable balance. A loan
    /// this pool never funded is ignored.
    pub fn on_after_loan_payment(env: Env, loan_id: u64, repay_amount: i128) -> Result<bool, Error> {
        Self::require_market_auth(&env)?;
        Self::require_not_paused(&env)?;
        if let Some(credit_line) = storage::read_loan_credit_line(&env, loan_id) {
            let mut balance = storage::read_balance(&env, &credit_line);
            balance.borrowable = balance
                .borrowable
                .checked_add(repay_amount)
                .ok_or(Error::Overflow)?;
            storage::write_balance(&env, &credit_line, &balance);
        }
        Ok(true)
    }

    /// Called by the market after a loan is revoked. Unwinds the net
    /// principal flow: if the loan repaid less than it borrowed, the
    /// outstanding difference comes back to the borrowable balance; if
    /// it repaid more, the surplus is taken back out. Accrued addons are
    /// kept either way, matching the fee staying earned on revocation.
    /// A loan this pool never funded is ignored.
    pub fn on_after_loan_revoke(env: Env, loan_id: u64) -> Result<bool, Error> {
        let market = Self::require_market_auth(&env)?;
        Self::require_not_paused(&env)?;
        if let Some(credit_line) = storage::read_loan_credit_line(&env, loan_id) {
            let loan = Self::fetch_loan_state(&env, &market, loan_id);
            let mut balance = storage::read_balance(&env, &credit_line);
            if loan.borrowed_amount >= loan.repaid_amount {
                balance.borrowable = balance
                    .borrowable
                    .checked_add(loan.borrowed_amount - loan.repaid_amount)
                    .ok_or(Error::Overflow)?;
            } else {
                let surplus = loan.repaid_amount - loan.borrowed_amount;
                if surplus > balance.borrowable {
                    return Err(Error::InsufficientBalance);
                }
                balance.borrowable -= surplus;
            }
            storage::write_balance(&env, &credit_line, &balance);
            storage::remove_loan_credit_line(&env, loan_id);
        }
        Ok(true)
    }

    // ── administration ───────────────────────────────────────────────────

    /// Grant or revoke admin status (lender only). A no-op toggle is
    /// rejected with `AlreadyConfigured` so callers must track state
    /// instead of double-submitting.
    pub fn configure_admin(env: Env, account: Address, admin: bool) -> Result<(), Error> {
        Self::require_lender_auth(&env)?;
        if storage::read_admin(&env, &account) == admin {
            return Err(Error::AlreadyConfigured);
        }
        storage::write_admin(&env, &account, admin);
        Ok(())
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        storage::read_admin(&env, &account)
    }

    /// Pause the market hooks (lender only). Lender capital movements
    /// and views stay available.
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

    pub fn get_balance(env: Env, credit_line: Address) -> PoolBalance {
        storage::read_balance(&env, &credit_line)
    }

    /// Which credit line funded a loan, while the loan is live.
    pub fn loan_credit_line(env: Env, loan_id: u64) -> Option<Address> {
        storage::read_loan_credit_line(&env, loan_id)
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

    fn fetch_loan_state(env: &Env, market: &Address, loan_id: u64) -> LoanState {
        let args: Vec<Val> = vec![env, loan_id.into_val(env)];
        env.invoke_contract(market, &Symbol::new(env, "get_loan_state"), args)
    }
}

#[cfg(test)]
mod test;
