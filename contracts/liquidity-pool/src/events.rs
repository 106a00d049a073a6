//! Event types and topic constants for the liquidity pool contract.
//! Stable event schemas for indexing and analytics.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Emitted when the lender adds capital for a credit line.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub credit_line: Address,
    pub amount: i128,
}

/// Emitted when the lender takes capital back out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub credit_line: Address,
    pub borrowable_amount: i128,
    pub addon_amount: i128,
}

/// Emitted when the lender recovers tokens sent to the pool by mistake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RescueEvent {
    pub token: Address,
    pub amount: i128,
}

/// Emitted once per `auto_repay` batch, before the repayments run.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AutoRepaymentEvent {
    pub count: u32,
}

/// Emitted for each repayment the pool pushes into the market.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepaymentInitiatedEvent {
    pub loan_id: u64,
    pub amount: i128,
}

pub fn publish_deposit(env: &Env, event: DepositEvent) {
    env.events()
        .publish((symbol_short!("pool"), symbol_short!("deposit")), event);
}

pub fn publish_withdraw(env: &Env, event: WithdrawEvent) {
    env.events()
        .publish((symbol_short!("pool"), symbol_short!("withdraw")), event);
}

pub fn publish_rescue(env: &Env, event: RescueEvent) {
    env.events()
        .publish((symbol_short!("pool"), symbol_short!("rescue")), event);
}

pub fn publish_auto_repayment(env: &Env, event: AutoRepaymentEvent) {
    env.events()
        .publish((symbol_short!("pool"), symbol_short!("autorepay")), event);
}

pub fn publish_repayment_initiated(env: &Env, event: RepaymentInitiatedEvent) {
    env.events()
        .publish((symbol_short!("pool"), symbol_short!("repay")), event);
}

pub fn publish_paused(env: &Env, paused: bool) {
    let topic = if paused {
        symbol_short!("paused")
    } else {
        symbol_short!("unpaused")
    };
    env.events().publish((symbol_short!("pool"), topic), ());
}
