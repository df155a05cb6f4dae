use tracing::debug;

use super::types::ProjectionPoint;

/// Longest horizon solved by stepping period by period. Longer horizons
/// that are known to converge use the closed-form solution instead.
pub const MAX_SIMULATED_PERIODS: u32 = 10_000_000;

#[inline]
fn grow(balance: f64, rate_percent: f64, deposit: f64) -> f64 {
    balance * (1.0 + rate_percent / 100.0) + deposit
}

/// Balance after `periods` rounds of growth at `rate_percent` per period,
/// adding `deposit` at the end of each period.
pub fn compound_interest(principal: f64, rate_percent: f64, periods: u32, deposit: f64) -> f64 {
    let mut balance = principal;
    for _ in 0..periods {
        balance = grow(balance, rate_percent, deposit);
    }
    balance
}

pub fn compound_interest_schedule(
    principal: f64,
    rate_percent: f64,
    periods: u32,
    deposit: f64,
) -> Vec<ProjectionPoint> {
    let mut points = Vec::with_capacity(periods as usize);
    let mut balance = principal;
    let mut total_deposited = 0.0;
    for period in 1..=periods {
        balance = grow(balance, rate_percent, deposit);
        total_deposited += deposit;
        points.push(ProjectionPoint {
            period,
            balance,
            total_deposited,
            interest_earned: balance - principal - total_deposited,
        });
    }
    points
}

/// Minimum number of periods for `start` to reach `target`, or `None` when
/// the balance never gets there.
pub fn periods_to_goal(start: f64, target: f64, deposit: f64, rate_percent: f64) -> Option<u32> {
    if start >= target {
        return Some(0);
    }
    if rate_percent == 0.0 {
        if deposit <= 0.0 {
            return None;
        }
        return whole_periods((target - start) / deposit);
    }

    if let Some(estimate) = closed_form_periods(start, target, deposit, rate_percent) {
        if estimate > f64::from(MAX_SIMULATED_PERIODS) {
            return whole_periods(estimate);
        }
    }

    let mut balance = start;
    for period in 1..=MAX_SIMULATED_PERIODS {
        let next = grow(balance, rate_percent, deposit);
        if next >= target {
            return Some(period);
        }
        // The growth rule is monotone: once the balance stops rising it
        // never climbs back.
        if next.is_nan() || next <= balance {
            debug!(start, target, deposit, rate_percent, period, "goal balance stalled");
            return None;
        }
        balance = next;
    }

    debug!(
        start,
        target,
        deposit,
        rate_percent,
        max_periods = MAX_SIMULATED_PERIODS,
        "goal not reached within period limit"
    );
    None
}

/// Real-valued period count from the annuity formula, when growth is positive.
fn closed_form_periods(start: f64, target: f64, deposit: f64, rate_percent: f64) -> Option<f64> {
    let rate = rate_percent / 100.0;
    if rate <= 0.0 || deposit < 0.0 {
        return None;
    }
    let offset = deposit / rate;
    if start + offset <= 0.0 {
        return None;
    }
    let periods = ((target + offset) / (start + offset)).ln() / rate.ln_1p();
    periods.is_finite().then_some(periods)
}

fn whole_periods(periods: f64) -> Option<u32> {
    let periods = periods.ceil();
    if periods.is_finite() && periods <= f64::from(u32::MAX) {
        Some(periods.max(0.0) as u32)
    } else {
        None
    }
}

/// Periods needed to reach `target`; `f64::INFINITY` when unreachable.
pub fn time_to_goal(start: f64, target: f64, deposit: f64, rate_percent: f64) -> f64 {
    periods_to_goal(start, target, deposit, rate_percent)
        .map(f64::from)
        .unwrap_or(f64::INFINITY)
}
