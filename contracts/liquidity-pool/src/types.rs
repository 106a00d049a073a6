//! Core data types for the liquidity pool contract.

use soroban_sdk::contracttype;

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    ContractPaused = 4,
    AlreadyConfigured = 5,
    ArrayLengthMismatch = 6,
    InvalidAmount = 7,
    InsufficientBalance = 8,
    Reentrancy = 9,
    Overflow = 10,
}

/// Capital accounted to one credit line.
///
/// `borrowable` is the principal available for new loans; `addons` is the
/// accumulated addon fees, withdrawable but never lent out again.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolBalance {
    pub borrowable: i128,
    pub addons: i128,
}

/// The market's view of a loan, fetched when reconciling pool balances.
/// Field names must match the market contract's type, since values cross
/// the contract boundary as maps keyed by field name.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanState {
    pub borrowed_amount: i128,
    pub addon_amount: i128,
    pub repaid_amount: i128,
}
