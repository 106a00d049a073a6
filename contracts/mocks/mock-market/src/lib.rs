#![no_std]

//! Test stand-in for the loan market. Stores loan states that the pool
//! hooks are normally fed with, and records `repay_loan` calls so tests
//! can assert on the pool's auto-repayment behavior.

use soroban_sdk::{contract, contractimpl, contracttype, Env, Vec};

/// Mirrors the pool's view of a loan. Field names must stay in sync with
/// the pool contract, since values cross the contract boundary as maps
/// keyed by field name.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanState {
    pub borrowed_amount: i128,
    pub addon_amount: i128,
    pub repaid_amount: i128,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Loan(u64),
    Repayments,
}

#[contract]
pub struct MockMarket;

#[contractimpl]
impl MockMarket {
    pub fn set_loan_state(env: Env, loan_id: u64, state: LoanState) {
        env.storage().instance().set(&DataKey::Loan(loan_id), &state);
    }

    pub fn get_loan_state(env: Env, loan_id: u64) -> LoanState {
        env.storage()
            .instance()
            .get(&DataKey::Loan(loan_id))
            .unwrap_or(LoanState {
                borrowed_amount: 0,
                addon_amount: 0,
                repaid_amount: 0,
            })
    }

    /// Bumps the loan's repaid amount and records the call.
    pub fn repay_loan(env: Env, loan_id: u64, amount: i128) {
        let mut state = Self::get_loan_state(env.clone(), loan_id);
        state.repaid_amount += amount;
        env.storage().instance().set(&DataKey::Loan(loan_id), &state);
        let mut calls: Vec<(u64, i128)> = env
            .storage()
            .instance()
            .get(&DataKey::Repayments)
            .unwrap_or(Vec::new(&env));
        calls.push_back((loan_id, amount));
        env.storage().instance().set(&DataKey::Repayments, &calls);
    }

    /// Every `repay_loan` call seen so far, in order.
    pub fn repayments(env: Env) -> Vec<(u64, i128)> {
        env.storage()
            .instance()
            .get(&DataKey::Repayments)
            .unwrap_or(Vec::new(&env))
    }
}
