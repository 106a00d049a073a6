//! Event types and topic constants for the credit line contract.
//! Stable event schemas for indexing and analytics.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Emitted whenever the lender replaces the credit line configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditLineConfiguredEvent {
    pub treasury: Address,
    pub min_borrow_amount: i128,
    pub max_borrow_amount: i128,
    pub interest_rate_factor: u64,
}

/// Emitted when the lender grants or revokes an admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminConfiguredEvent {
    pub account: Address,
    pub admin: bool,
}

/// Emitted when an admin writes a borrower configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowerConfiguredEvent {
    pub borrower: Address,
    pub expiration: u64,
    pub max_borrow_amount: i128,
}

pub fn publish_credit_line_configured(env: &Env, event: CreditLineConfiguredEvent) {
    env.events()
        .publish((symbol_short!("line"), symbol_short!("config")), event);
}

pub fn publish_admin_configured(env: &Env, event: AdminConfiguredEvent) {
    env.events()
        .publish((symbol_short!("line"), symbol_short!("admin")), event);
}

pub fn publish_borrower_configured(env: &Env, event: BorrowerConfiguredEvent) {
    env.events()
        .publish((symbol_short!("line"), symbol_short!("borrower")), event);
}

pub fn publish_paused(env: &Env, paused: bool) {
    let topic = if paused {
        symbol_short!("paused")
    } else {
        symbol_short!("unpaused")
    };
    env.events().publish((symbol_short!("line"), topic), ());
}
