use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetCategory {
    Essentials,
    Lifestyle,
    Investments,
}

impl BudgetCategory {
    /// Share of income the 50/30/20 rule assigns to this category, in percent.
    pub fn target_percentage(self) -> f64 {
        match self {
            BudgetCategory::Essentials => 50.0,
            BudgetCategory::Lifestyle => 30.0,
            BudgetCategory::Investments => 20.0,
        }
    }

    /// Score points lost per percentage point of deviation.
    pub fn penalty_weight(self) -> f64 {
        match self {
            BudgetCategory::Essentials => 1.0,
            BudgetCategory::Lifestyle => 1.0,
            BudgetCategory::Investments => 1.5,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingBreakdown {
    pub essentials: f64,
    pub lifestyle: f64,
    pub investments: f64,
}

impl SpendingBreakdown {
    pub fn amount(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Essentials => self.essentials,
            BudgetCategory::Lifestyle => self.lifestyle,
            BudgetCategory::Investments => self.investments,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryStatus {
    UnderTarget,
    OnTarget,
    OverTarget,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub category: BudgetCategory,
    pub amount: f64,
    pub percentage: f64,
    pub target_percentage: f64,
    pub deviation: f64,
    pub status: CategoryStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRuleResult {
    pub income: f64,
    pub essentials: CategoryResult,
    pub lifestyle: CategoryResult,
    pub investments: CategoryResult,
    pub score: f64,
}

impl BudgetRuleResult {
    pub fn categories(&self) -> [&CategoryResult; 3] {
        [&self.essentials, &self.lifestyle, &self.investments]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub percentage: f64,
    pub remaining: f64,
    pub completed: bool,
    pub days_remaining: Option<i64>,
    pub monthly_contribution_needed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    #[serde(default)]
    pub name: String,
    pub purchase_price: f64,
    pub current_price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    pub name: String,
    pub current_value: f64,
    pub percentage: f64,
    pub profitability: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSummary {
    pub total_invested: f64,
    pub total_value: f64,
    pub total_profit: f64,
    pub total_profitability: f64,
    pub allocation: Vec<AllocationEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub period: u32,
    pub balance: f64,
    pub total_deposited: f64,
    pub interest_earned: f64,
}
