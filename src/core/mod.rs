mod budget;
mod goals;
mod growth;
mod portfolio;
mod types;

pub use budget::{evaluate_budget_rule, savings_rate};
pub use goals::{days_until, goal_progress};
pub use growth::{
    MAX_SIMULATED_PERIODS, compound_interest, compound_interest_schedule, periods_to_goal,
    time_to_goal,
};
pub use portfolio::summarize_investments;
pub use types::{
    AllocationEntry, BudgetCategory, BudgetRuleResult, CategoryResult, CategoryStatus, Goal,
    GoalProgress, Investment, InvestmentSummary, ProjectionPoint, SpendingBreakdown,
};
