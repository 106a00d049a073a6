//! Fixed-point addon (origination) fee math.
//!
//! Rates are plain integers over a configured `interest_rate_factor`
//! denominator; no floating point anywhere.

/// Addon fee owed for a loan of `borrow_amount` over `duration_in_periods`:
///
/// `borrow_amount * (fixed + period * duration) / factor`, truncated.
///
/// Returns `None` on intermediate overflow. The caller guarantees
/// `borrow_amount >= 0` and `interest_rate_factor > 0`, so truncation is
/// a floor.
pub fn calculate_addon_amount(
    borrow_amount: i128,
    duration_in_periods: u32,
    addon_fixed_cost_rate: u64,
    addon_period_cost_rate: u64,
    interest_rate_factor: u64,
) -> Option<i128> {
    let period_cost =
        (addon_period_cost_rate as i128).checked_mul(duration_in_periods as i128)?;
    let total_rate = (addon_fixed_cost_rate as i128).checked_add(period_cost)?;
    let scaled = borrow_amount.checked_mul(total_rate)?;
    Some(scaled / interest_rate_factor as i128)
}
