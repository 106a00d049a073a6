//! Storage keys and typed accessors for the liquidity pool contract.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Error, PoolBalance};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Market,                // Address, wired once at initialize
    Lender,                // Address, the owner role
    Token,                 // Address of the pooled token
    Paused,                // bool
    MarketApproved,        // bool, set once the spending allowance is granted
    ReentrancyGuard,       // bool, held across token-moving entry points
    Admin(Address),        // bool per delegated admin
    Balance(Address),      // PoolBalance per credit line
    LoanCreditLine(u64),   // Address, which credit line funded a loan
}

const TTL_THRESHOLD: u32 = 100_000;
const TTL_EXTEND_TO: u32 = 200_000;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Market)
}

pub fn read_market(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Market)
        .ok_or(Error::NotInitialized)
}

pub fn read_lender(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Lender)
        .ok_or(Error::NotInitialized)
}

pub fn read_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

pub fn write_wiring(env: &Env, market: &Address, lender: &Address, token: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Market, market);
    instance.set(&DataKey::Lender, lender);
    instance.set(&DataKey::Token, token);
    instance.set(&DataKey::Paused, &false);
}

pub fn read_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn write_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn read_market_approved(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::MarketApproved)
        .unwrap_or(false)
}

pub fn write_market_approved(env: &Env) {
    env.storage().instance().set(&DataKey::MarketApproved, &true);
}

pub fn read_admin(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Admin(account.clone()))
        .unwrap_or(false)
}

pub fn write_admin(env: &Env, account: &Address, admin: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::Admin(account.clone()), &admin);
}

pub fn read_balance(env: &Env, credit_line: &Address) -> PoolBalance {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(credit_line.clone()))
        .unwrap_or(PoolBalance {
            borrowable: 0,
            addons: 0,
        })
}

pub fn write_balance(env: &Env, credit_line: &Address, balance: &PoolBalance) {
    let key = DataKey::Balance(credit_line.clone());
    let persistent = env.storage().persistent();
    persistent.set(&key, balance);
    persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn read_loan_credit_line(env: &Env, loan_id: u64) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::LoanCreditLine(loan_id))
}

pub fn write_loan_credit_line(env: &Env, loan_id: u64, credit_line: &Address) {
    let key = DataKey::LoanCreditLine(loan_id);
    let persistent = env.storage().persistent();
    persistent.set(&key, credit_line);
    persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn remove_loan_credit_line(env: &Env, loan_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::LoanCreditLine(loan_id));
}

pub fn enter_reentrancy_guard(env: &Env) -> Result<(), Error> {
    let instance = env.storage().instance();
    if instance.get(&DataKey::ReentrancyGuard).unwrap_or(false) {
        return Err(Error::Reentrancy);
    }
    instance.set(&DataKey::ReentrancyGuard, &true);
    Ok(())
}

pub fn leave_reentrancy_guard(env: &Env) {
    env.storage().instance().set(&DataKey::ReentrancyGuard, &false);
}

pub fn bump_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
