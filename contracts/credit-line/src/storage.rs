//! Storage keys and typed accessors for the credit line contract.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{BorrowerConfig, CreditLineConfig, Error};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Market,                   // Address, wired once at initialize
    Lender,                   // Address, the owner role
    Token,                    // Address of the lending token
    Paused,                   // bool
    Config,                   // CreditLineConfig
    Admin(Address),           // bool per delegated admin
    Borrower(Address),        // BorrowerConfig per borrower
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

pub fn read_config(env: &Env) -> Option<CreditLineConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn write_config(env: &Env, config: &CreditLineConfig) {
    env.storage().instance().set(&DataKey::Config, config);
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

pub fn read_borrower(env: &Env, borrower: &Address) -> Option<BorrowerConfig> {
    let key = DataKey::Borrower(borrower.clone());
    let persistent = env.storage().persistent();
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    persistent.get(&key)
}

pub fn write_borrower(env: &Env, borrower: &Address, config: &BorrowerConfig) {
    let key = DataKey::Borrower(borrower.clone());
    let persistent = env.storage().persistent();
    persistent.set(&key, config);
    persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn bump_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
