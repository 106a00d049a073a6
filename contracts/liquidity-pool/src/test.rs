use super::*;
use lending_mock_market::{LoanState as MarketLoanState, MockMarket, MockMarketClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{token, vec, Address, Env};

// ── helpers ───────────────────────────────────────────────────────────────

/// Registers the pool with a mock market and a fresh Stellar asset, wires
/// them via `initialize`, and mints the lender 1000 tokens. Assumes
/// mocked auths.
fn setup(
    env: &Env,
) -> (
    LiquidityPoolClient<'_>,
    MockMarketClient<'_>,
    token::Client<'_>,
    Address,
    Address,
) {
    let market_id = env.register(MockMarket, ());
    let market = MockMarketClient::new(env, &market_id);
    let lender = Address::generate(env);
    let token_admin = Address::generate(env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token_client = token::Client::new(env, &sac.address());
    token::StellarAssetClient::new(env, &sac.address()).mint(&lender, &1_000);
    let pool_id = env.register(LiquidityPool, ());
    let pool = LiquidityPoolClient::new(env, &pool_id);
    pool.initialize(&market_id, &lender, &sac.address());
    let credit_line = Address::generate(env);
    (pool, market, token_client, lender, credit_line)
}

fn loan(borrowed: i128, addon: i128, repaid: i128) -> MarketLoanState {
    MarketLoanState {
        borrowed_amount: borrowed,
        addon_amount: addon,
        repaid_amount: repaid,
    }
}

// ── initialize ────────────────────────────────────────────────────────────

#[test]
fn test_initialize_wires_roles_and_token() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, token_client, lender, _line) = setup(&env);
    assert_eq!(pool.market(), market.address);
    assert_eq!(pool.lender(), lender);
    assert_eq!(pool.token(), token_client.address);
    assert!(!pool.paused());
}

#[test]
fn test_initialize_twice_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, token_client, lender, _line) = setup(&env);
    let res = pool.try_initialize(&market.address, &lender, &token_client.address);
    assert_eq!(res, Err(Ok(Error::AlreadyInitialized)));
}

// ── deposit ───────────────────────────────────────────────────────────────

#[test]
fn test_deposit_credits_borrowable_and_moves_tokens() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, token_client, lender, line) = setup(&env);
    pool.deposit(&line, &325);
    assert_eq!(
        pool.get_balance(&line),
        PoolBalance {
            borrowable: 325,
            addons: 0
        }
    );
    assert_eq!(token_client.balance(&lender), 675);
    assert_eq!(token_client.balance(&pool.address), 325);
}

#[test]
fn test_deposit_accumulates_per_credit_line() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, line) = setup(&env);
    let other_line = Address::generate(&env);
    pool.deposit(&line, &100);
    pool.deposit(&line, &200);
    pool.deposit(&other_line, &50);
    assert_eq!(pool.get_balance(&line).borrowable, 300);
    assert_eq!(pool.get_balance(&other_line).borrowable, 50);
}

#[test]
fn test_first_deposit_grants_market_allowance() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, token_client, _lender, line) = setup(&env);
    assert_eq!(token_client.allowance(&pool.address, &market.address), 0);
    pool.deposit(&line, &100);
    assert_eq!(
        token_client.allowance(&pool.address, &market.address),
        i128::MAX
    );
    // A second deposit must not trip over the already granted allowance.
    pool.deposit(&line, &100);
    assert_eq!(pool.get_balance(&line).borrowable, 200);
}

#[test]
fn test_deposit_rejects_non_positive_amount() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, line) = setup(&env);
    assert_eq!(pool.try_deposit(&line, &0), Err(Ok(Error::InvalidAmount)));
    assert_eq!(pool.try_deposit(&line, &-5), Err(Ok(Error::InvalidAmount)));
}

#[test]
#[should_panic]
fn test_deposit_requires_lender_auth() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, line) = setup(&env);
    env.set_auths(&[]);
    pool.deposit(&line, &100);
}

// ── withdraw ──────────────────────────────────────────────────────────────

#[test]
fn test_withdraw_debits_balance_and_returns_tokens() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, token_client, lender, line) = setup(&env);
    pool.deposit(&line, &500);
    pool.withdraw(&line, &100, &0);
    assert_eq!(pool.get_balance(&line).borrowable, 400);
    assert_eq!(token_client.balance(&lender), 600);
    assert_eq!(token_client.balance(&pool.address), 400);
}

#[test]
fn test_withdraw_rejects_zero_and_negative_components() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &500);
    assert_eq!(pool.try_withdraw(&line, &0, &0), Err(Ok(Error::InvalidAmount)));
    assert_eq!(
        pool.try_withdraw(&line, &-1, &0),
        Err(Ok(Error::InvalidAmount))
    );
    assert_eq!(
        pool.try_withdraw(&line, &0, &-1),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
fn test_withdraw_rejects_overdraw() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &500);
    assert_eq!(
        pool.try_withdraw(&line, &501, &0),
        Err(Ok(Error::InsufficientBalance))
    );
    assert_eq!(
        pool.try_withdraw(&line, &0, &1),
        Err(Ok(Error::InsufficientBalance))
    );
    // Failed attempts left the balance untouched.
    assert_eq!(pool.get_balance(&line).borrowable, 500);
}

// ── loan lifecycle hooks ──────────────────────────────────────────────────

#[test]
fn test_loan_taken_moves_principal_and_accrues_addon() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 0));
    assert!(pool.on_after_loan_taken(&1, &line));
    assert_eq!(
        pool.get_balance(&line),
        PoolBalance {
            borrowable: 0,
            addons: 25
        }
    );
    assert_eq!(pool.loan_credit_line(&1), Some(line));
}

#[test]
fn test_addons_withdrawable_but_never_lendable() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, token_client, lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 0));
    pool.on_after_loan_taken(&1, &line);
    // One token above the accrued addons must be refused.
    assert_eq!(
        pool.try_withdraw(&line, &0, &26),
        Err(Ok(Error::InsufficientBalance))
    );
    pool.withdraw(&line, &0, &25);
    assert_eq!(
        pool.get_balance(&line),
        PoolBalance {
            borrowable: 0,
            addons: 0
        }
    );
    assert_eq!(token_client.balance(&lender), 700);
}

#[test]
fn test_loan_taken_rejects_underfunded_credit_line() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &100);
    market.set_loan_state(&1, &loan(300, 25, 0));
    assert_eq!(
        pool.try_on_after_loan_taken(&1, &line),
        Err(Ok(Error::InsufficientBalance))
    );
    assert_eq!(pool.loan_credit_line(&1), None);
}

#[test]
fn test_loan_payment_returns_principal() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 0));
    pool.on_after_loan_taken(&1, &line);
    assert!(pool.on_after_loan_payment(&1, &100));
    // 325 deposited - (300 + 25) disbursed + 100 repaid.
    assert_eq!(
        pool.get_balance(&line),
        PoolBalance {
            borrowable: 100,
            addons: 25
        }
    );
}

#[test]
fn test_loan_payment_for_unknown_loan_is_a_no_op() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    assert!(pool.on_after_loan_payment(&99, &100));
    assert_eq!(pool.get_balance(&line).borrowable, 325);
}

#[test]
fn test_loan_revoke_returns_outstanding_principal() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 0));
    pool.on_after_loan_taken(&1, &line);
    market.set_loan_state(&1, &loan(300, 25, 100));
    pool.on_after_loan_payment(&1, &100);
    assert!(pool.on_after_loan_revoke(&1));
    // 100 repaid plus the outstanding 200 came back; the addon stays.
    assert_eq!(
        pool.get_balance(&line),
        PoolBalance {
            borrowable: 300,
            addons: 25
        }
    );
    assert_eq!(pool.loan_credit_line(&1), None);
}

#[test]
fn test_loan_revoke_claws_back_repayment_surplus() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 0));
    pool.on_after_loan_taken(&1, &line);
    market.set_loan_state(&1, &loan(300, 25, 400));
    pool.on_after_loan_payment(&1, &400);
    assert!(pool.on_after_loan_revoke(&1));
    assert_eq!(pool.get_balance(&line).borrowable, 300);
}

#[test]
fn test_loan_revoke_rejects_unfunded_clawback() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 0));
    pool.on_after_loan_taken(&1, &line);
    // Repayments the pool never saw: the surplus cannot be clawed back.
    market.set_loan_state(&1, &loan(300, 25, 400));
    assert_eq!(
        pool.try_on_after_loan_revoke(&1),
        Err(Ok(Error::InsufficientBalance))
    );
}

#[test]
fn test_loan_revoke_for_unknown_loan_is_a_no_op() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 100));
    pool.on_after_loan_taken(&1, &line);
    pool.on_after_loan_revoke(&1);
    let settled = pool.get_balance(&line);
    // Revoking the same loan twice must change nothing.
    assert!(pool.on_after_loan_revoke(&1));
    assert_eq!(pool.get_balance(&line), settled);
}

#[test]
fn test_before_loan_taken_acknowledges() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, line) = setup(&env);
    assert!(pool.on_before_loan_taken(&1, &line));
}

#[test]
fn test_hooks_rejected_while_paused() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 0));
    pool.pause();
    assert_eq!(
        pool.try_on_before_loan_taken(&1, &line),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        pool.try_on_after_loan_taken(&1, &line),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        pool.try_on_after_loan_payment(&1, &100),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        pool.try_on_after_loan_revoke(&1),
        Err(Ok(Error::ContractPaused))
    );
}

#[test]
fn test_pause_leaves_lender_capital_movements_available() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, line) = setup(&env);
    pool.pause();
    pool.deposit(&line, &100);
    pool.withdraw(&line, &50, &0);
    assert_eq!(pool.get_balance(&line).borrowable, 50);
    pool.unpause();
    assert!(!pool.paused());
}

#[test]
#[should_panic]
fn test_hooks_require_market_auth() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, line) = setup(&env);
    pool.deposit(&line, &325);
    market.set_loan_state(&1, &loan(300, 25, 0));
    env.set_auths(&[]);
    pool.on_after_loan_taken(&1, &line);
}

// ── auto repayment ────────────────────────────────────────────────────────

#[test]
fn test_auto_repay_pushes_each_repayment_into_the_market() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, _line) = setup(&env);
    let admin = Address::generate(&env);
    pool.configure_admin(&admin, &true);
    market.set_loan_state(&1, &loan(300, 25, 0));
    market.set_loan_state(&2, &loan(150, 0, 0));
    pool.auto_repay(
        &admin,
        &vec![&env, 1u64, 2u64],
        &vec![&env, 100i128, 50i128],
    );
    assert_eq!(
        market.repayments(),
        vec![&env, (1u64, 100i128), (2u64, 50i128)]
    );
    assert_eq!(market.get_loan_state(&1).repaid_amount, 100);
    assert_eq!(market.get_loan_state(&2).repaid_amount, 50);
}

#[test]
fn test_auto_repay_rejects_length_mismatch() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, market, _token, _lender, _line) = setup(&env);
    let admin = Address::generate(&env);
    pool.configure_admin(&admin, &true);
    let res = pool.try_auto_repay(&admin, &vec![&env, 1u64, 2u64], &vec![&env, 100i128]);
    assert_eq!(res, Err(Ok(Error::ArrayLengthMismatch)));
    assert_eq!(market.repayments(), vec![&env]);
}

#[test]
fn test_auto_repay_rejects_non_admin_caller() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, _line) = setup(&env);
    let stranger = Address::generate(&env);
    let res = pool.try_auto_repay(&stranger, &vec![&env, 1u64], &vec![&env, 100i128]);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));
}

// ── rescue ────────────────────────────────────────────────────────────────

#[test]
fn test_rescue_recovers_stray_tokens() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, lender, _line) = setup(&env);
    let stray_admin = Address::generate(&env);
    let stray = env.register_stellar_asset_contract_v2(stray_admin);
    let stray_client = token::Client::new(&env, &stray.address());
    token::StellarAssetClient::new(&env, &stray.address()).mint(&pool.address, &40);
    pool.rescue(&stray.address(), &40);
    assert_eq!(stray_client.balance(&lender), 40);
    assert_eq!(stray_client.balance(&pool.address), 0);
}

#[test]
fn test_rescue_does_not_touch_pool_accounting() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, token_client, _lender, line) = setup(&env);
    pool.deposit(&line, &300);
    token::StellarAssetClient::new(&env, &token_client.address).mint(&pool.address, &40);
    pool.rescue(&token_client.address, &40);
    assert_eq!(pool.get_balance(&line).borrowable, 300);
    assert_eq!(token_client.balance(&pool.address), 300);
}

#[test]
fn test_rescue_rejects_non_positive_amount() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, token_client, _lender, _line) = setup(&env);
    assert_eq!(
        pool.try_rescue(&token_client.address, &0),
        Err(Ok(Error::InvalidAmount))
    );
}

// ── administration ────────────────────────────────────────────────────────

#[test]
fn test_configure_admin_grant_and_revoke() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, _line) = setup(&env);
    let admin = Address::generate(&env);
    pool.configure_admin(&admin, &true);
    assert!(pool.is_admin(&admin));
    pool.configure_admin(&admin, &false);
    assert!(!pool.is_admin(&admin));
}

#[test]
fn test_configure_admin_rejects_no_op_toggle() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, _line) = setup(&env);
    let admin = Address::generate(&env);
    assert_eq!(
        pool.try_configure_admin(&admin, &false),
        Err(Ok(Error::AlreadyConfigured))
    );
    pool.configure_admin(&admin, &true);
    assert_eq!(
        pool.try_configure_admin(&admin, &true),
        Err(Ok(Error::AlreadyConfigured))
    );
}

#[test]
#[should_panic]
fn test_pause_requires_lender_auth() {
    let env = Env::default();
    env.mock_all_auths();
    let (pool, _market, _token, _lender, _line) = setup(&env);
    env.set_auths(&[]);
    pool.pause();
}
