//! Core data types for the credit line contract.

use soroban_sdk::{contracttype, Address};

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    ContractPaused = 4,
    InvalidCreditLineConfiguration = 5,
    InvalidBorrowerConfiguration = 6,
    AlreadyConfigured = 7,
    ArrayLengthMismatch = 8,
    InvalidAmount = 9,
    InvalidDuration = 10,
    BorrowerConfigurationExpired = 11,
    Overflow = 12,
}

/// Interest accrual formula a loan is taken under. The credit line only
/// carries this through to the loan terms; the market applies it.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InterestFormula {
    Simple = 0,
    Compound = 1,
}

/// How a borrower's remaining capacity changes after taking a loan.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BorrowPolicy {
    Keep = 0,
    Decrease = 1,
    Reset = 2,
}

/// Lender-wide underwriting bounds for one credit line.
///
/// Every borrower configuration must fit inside these windows. All rates
/// share `interest_rate_factor` as their fixed-point denominator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditLineConfig {
    pub treasury: Address,
    pub period_in_seconds: u64,
    pub min_duration_in_periods: u32,
    pub max_duration_in_periods: u32,
    pub min_borrow_amount: i128,
    pub max_borrow_amount: i128,
    pub interest_rate_factor: u64,
    pub min_interest_rate_primary: u64,
    pub max_interest_rate_primary: u64,
    pub min_interest_rate_secondary: u64,
    pub max_interest_rate_secondary: u64,
    pub min_addon_fixed_cost_rate: u64,
    pub max_addon_fixed_cost_rate: u64,
    pub min_addon_period_cost_rate: u64,
    pub max_addon_period_cost_rate: u64,
}

impl CreditLineConfig {
    /// Rejects any configuration violating the ordering invariants, so a
    /// stored config is always internally consistent.
    pub fn validate(&self) -> Result<(), Error> {
        if self.period_in_seconds == 0 || self.interest_rate_factor == 0 {
            return Err(Error::InvalidCreditLineConfiguration);
        }
        if self.min_borrow_amount < 0 || self.min_borrow_amount > self.max_borrow_amount {
            return Err(Error::InvalidCreditLineConfiguration);
        }
        if self.min_duration_in_periods > self.max_duration_in_periods {
            return Err(Error::InvalidCreditLineConfiguration);
        }
        if self.min_interest_rate_primary > self.max_interest_rate_primary
            || self.min_interest_rate_secondary > self.max_interest_rate_secondary
        {
            return Err(Error::InvalidCreditLineConfiguration);
        }
        if self.min_addon_fixed_cost_rate > self.max_addon_fixed_cost_rate
            || self.min_addon_period_cost_rate > self.max_addon_period_cost_rate
        {
            return Err(Error::InvalidCreditLineConfiguration);
        }
        Ok(())
    }
}

/// Per-borrower underwriting terms, set by an admin and bounded by the
/// credit line configuration at write time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowerConfig {
    pub expiration: u64,
    pub min_borrow_amount: i128,
    pub max_borrow_amount: i128,
    pub min_duration_in_periods: u32,
    pub max_duration_in_periods: u32,
    pub interest_rate_primary: u64,
    pub interest_rate_secondary: u64,
    pub addon_fixed_cost_rate: u64,
    pub addon_period_cost_rate: u64,
    pub addon_recipient: Option<Address>,
    pub interest_formula: InterestFormula,
    pub borrow_policy: BorrowPolicy,
    pub auto_repayment: bool,
}

impl BorrowerConfig {
    /// Validates the whole record against the credit line bounds. Nothing
    /// is applied when any field is out of range.
    pub fn validate(&self, line: &CreditLineConfig) -> Result<(), Error> {
        if self.min_borrow_amount > self.max_borrow_amount
            || self.min_borrow_amount < line.min_borrow_amount
            || self.max_borrow_amount > line.max_borrow_amount
        {
            return Err(Error::InvalidBorrowerConfiguration);
        }
        if self.min_duration_in_periods > self.max_duration_in_periods
            || self.min_duration_in_periods < line.min_duration_in_periods
            || self.max_duration_in_periods > line.max_duration_in_periods
        {
            return Err(Error::InvalidBorrowerConfiguration);
        }
        if self.interest_rate_primary < line.min_interest_rate_primary
            || self.interest_rate_primary > line.max_interest_rate_primary
        {
            return Err(Error::InvalidBorrowerConfiguration);
        }
        if self.interest_rate_secondary < line.min_interest_rate_secondary
            || self.interest_rate_secondary > line.max_interest_rate_secondary
        {
            return Err(Error::InvalidBorrowerConfiguration);
        }
        if self.addon_fixed_cost_rate < line.min_addon_fixed_cost_rate
            || self.addon_fixed_cost_rate > line.max_addon_fixed_cost_rate
        {
            return Err(Error::InvalidBorrowerConfiguration);
        }
        if self.addon_period_cost_rate < line.min_addon_period_cost_rate
            || self.addon_period_cost_rate > line.max_addon_period_cost_rate
        {
            return Err(Error::InvalidBorrowerConfiguration);
        }
        // An active addon fee needs somewhere to go.
        if (self.addon_fixed_cost_rate != 0 || self.addon_period_cost_rate != 0)
            && self.addon_recipient.is_none()
        {
            return Err(Error::InvalidBorrowerConfiguration);
        }
        Ok(())
    }
}

/// Underwriting result handed back to the market for loan issuance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanTerms {
    pub token: Address,
    pub treasury: Address,
    pub period_in_seconds: u64,
    pub duration_in_periods: u32,
    pub interest_rate_factor: u64,
    pub interest_rate_primary: u64,
    pub interest_rate_secondary: u64,
    pub interest_formula: InterestFormula,
    pub addon_recipient: Option<Address>,
    pub addon_amount: i128,
    pub auto_repayment: bool,
}
