use super::types::{
    BudgetCategory, BudgetRuleResult, CategoryResult, CategoryStatus, SpendingBreakdown,
};

/// Deviation, in percentage points, still reported as on target.
const STATUS_TOLERANCE: f64 = 1.0;

/// Scores a monthly spending split against the 50/30/20 rule.
///
/// Category percentages are shares of income clamped to `[0, 100]`; with no
/// income every category reads 0% and the score bottoms out instead of
/// dividing by zero.
pub fn evaluate_budget_rule(income: f64, spending: &SpendingBreakdown) -> BudgetRuleResult {
    let essentials = evaluate_category(income, spending, BudgetCategory::Essentials);
    let lifestyle = evaluate_category(income, spending, BudgetCategory::Lifestyle);
    let investments = evaluate_category(income, spending, BudgetCategory::Investments);

    let penalty: f64 = [&essentials, &lifestyle, &investments]
        .iter()
        .map(|c| c.category.penalty_weight() * c.deviation.abs())
        .sum();
    let score = (100.0 - penalty).clamp(0.0, 100.0);

    BudgetRuleResult {
        income,
        essentials,
        lifestyle,
        investments,
        score,
    }
}

fn evaluate_category(
    income: f64,
    spending: &SpendingBreakdown,
    category: BudgetCategory,
) -> CategoryResult {
    let amount = spending.amount(category);
    let percentage = share_of_income(amount, income);
    let target_percentage = category.target_percentage();
    let deviation = percentage - target_percentage;
    CategoryResult {
        category,
        amount,
        percentage,
        target_percentage,
        deviation,
        status: status_for_deviation(deviation),
    }
}

fn share_of_income(amount: f64, income: f64) -> f64 {
    if income <= 0.0 {
        return 0.0;
    }
    let pct = amount / income * 100.0;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn status_for_deviation(deviation: f64) -> CategoryStatus {
    if deviation > STATUS_TOLERANCE {
        CategoryStatus::OverTarget
    } else if deviation < -STATUS_TOLERANCE {
        CategoryStatus::UnderTarget
    } else {
        CategoryStatus::OnTarget
    }
}

/// Percentage of income left after spending. Overspending reports 0.
pub fn savings_rate(income: f64, spending: f64) -> f64 {
    if income == 0.0 {
        return 0.0;
    }
    ((income - spending) / income * 100.0).max(0.0)
}
