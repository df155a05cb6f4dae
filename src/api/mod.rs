mod error;

use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

pub use error::{ApiError, ApiResult};

use crate::config::ServerConfig;
use crate::core::{
    BudgetRuleResult, Goal, GoalProgress, Investment, InvestmentSummary, ProjectionPoint,
    SpendingBreakdown, compound_interest, compound_interest_schedule,
    evaluate_budget_rule, goal_progress, periods_to_goal, savings_rate, summarize_investments,
};
use crate::format::{Locale, format_compact, format_currency, format_date, format_percent};

/// Longest projection the API computes, 100 years of monthly periods.
const MAX_PROJECTION_PERIODS: u32 = 1_200;

#[derive(Debug, Clone)]
pub struct AppState {
    pub default_locale: Locale,
}

impl AppState {
    fn locale(&self, requested: Option<Locale>) -> Locale {
        requested.unwrap_or(self.default_locale)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BudgetRulePayload {
    income: Option<f64>,
    essentials: Option<f64>,
    lifestyle: Option<f64>,
    investments: Option<f64>,
    locale: Option<Locale>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GoalProgressPayload {
    target_amount: Option<f64>,
    current_amount: Option<f64>,
    deadline: Option<NaiveDate>,
    locale: Option<Locale>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InvestmentSummaryPayload {
    investments: Vec<Investment>,
    locale: Option<Locale>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompoundInterestPayload {
    principal: Option<f64>,
    rate: Option<f64>,
    periods: Option<u32>,
    deposit: Option<f64>,
    include_schedule: bool,
    locale: Option<Locale>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TimeToGoalPayload {
    #[serde(alias = "currentAmount")]
    start: Option<f64>,
    #[serde(alias = "targetAmount")]
    target: Option<f64>,
    #[serde(alias = "monthlyDeposit")]
    deposit: Option<f64>,
    #[serde(alias = "monthlyRate")]
    rate: Option<f64>,
    locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetRuleResponse {
    #[serde(flatten)]
    result: BudgetRuleResult,
    savings_rate: f64,
    formatted: BudgetRuleFormatted,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetRuleFormatted {
    income: String,
    essentials: String,
    lifestyle: String,
    investments: String,
    savings_rate: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalProgressResponse {
    #[serde(flatten)]
    progress: GoalProgress,
    formatted: GoalProgressFormatted,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalProgressFormatted {
    percentage: String,
    remaining: String,
    deadline: Option<String>,
    monthly_contribution_needed: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvestmentSummaryResponse {
    #[serde(flatten)]
    summary: InvestmentSummary,
    formatted: InvestmentSummaryFormatted,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvestmentSummaryFormatted {
    total_invested: String,
    total_value: String,
    total_profit: String,
    total_profitability: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompoundInterestResponse {
    balance: f64,
    total_deposited: f64,
    interest_earned: f64,
    formatted_balance: String,
    compact_balance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<ProjectionPoint>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeToGoalResponse {
    reachable: bool,
    periods: Option<u32>,
    projected_balance: Option<f64>,
    formatted_target: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/budget-rule",
            get(budget_rule_get_handler).post(budget_rule_post_handler),
        )
        .route("/api/goal-progress", post(goal_progress_handler))
        .route("/api/investments/summary", post(investment_summary_handler))
        .route(
            "/api/compound-interest",
            get(compound_interest_get_handler).post(compound_interest_post_handler),
        )
        .route(
            "/api/time-to-goal",
            get(time_to_goal_get_handler).post(time_to_goal_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

pub async fn run_http_server(config: ServerConfig) -> std::io::Result<()> {
    let app = app_router(AppState {
        default_locale: config.default_locale,
    });

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(
        addr = %config.listen_addr,
        locale = %config.default_locale,
        "family finance API listening"
    );

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

async fn budget_rule_get_handler(
    State(state): State<AppState>,
    payload: Result<Query<BudgetRulePayload>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(payload) = payload?;
    budget_rule_response(payload, &state).map(|body| json_response(StatusCode::OK, body))
}

async fn budget_rule_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<BudgetRulePayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload?;
    budget_rule_response(payload, &state).map(|body| json_response(StatusCode::OK, body))
}

async fn goal_progress_handler(
    State(state): State<AppState>,
    payload: Result<Json<GoalProgressPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload?;
    let now = Utc::now().naive_utc();
    goal_progress_response(payload, &state, now).map(|body| json_response(StatusCode::OK, body))
}

async fn investment_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<InvestmentSummaryPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload?;
    investment_summary_response(payload, &state).map(|body| json_response(StatusCode::OK, body))
}

async fn compound_interest_get_handler(
    State(state): State<AppState>,
    payload: Result<Query<CompoundInterestPayload>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(payload) = payload?;
    compound_interest_response(payload, &state).map(|body| json_response(StatusCode::OK, body))
}

async fn compound_interest_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompoundInterestPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload?;
    compound_interest_response(payload, &state).map(|body| json_response(StatusCode::OK, body))
}

async fn time_to_goal_get_handler(
    State(state): State<AppState>,
    payload: Result<Query<TimeToGoalPayload>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(payload) = payload?;
    time_to_goal_response(payload, &state).map(|body| json_response(StatusCode::OK, body))
}

async fn time_to_goal_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimeToGoalPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(payload) = payload?;
    time_to_goal_response(payload, &state).map(|body| json_response(StatusCode::OK, body))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn budget_rule_response(
    payload: BudgetRulePayload,
    state: &AppState,
) -> ApiResult<BudgetRuleResponse> {
    let locale = state.locale(payload.locale);
    let income = required_amount("income", payload.income)?;
    let spending = SpendingBreakdown {
        essentials: optional_amount("essentials", payload.essentials)?,
        lifestyle: optional_amount("lifestyle", payload.lifestyle)?,
        investments: optional_amount("investments", payload.investments)?,
    };

    let result = evaluate_budget_rule(income, &spending);
    // Money moved to investments counts as saved, not spent.
    let savings_rate = savings_rate(income, spending.essentials + spending.lifestyle);

    Ok(BudgetRuleResponse {
        formatted: BudgetRuleFormatted {
            income: format_currency(income, locale),
            essentials: format_percent(result.essentials.percentage, 1, locale),
            lifestyle: format_percent(result.lifestyle.percentage, 1, locale),
            investments: format_percent(result.investments.percentage, 1, locale),
            savings_rate: format_percent(savings_rate, 1, locale),
        },
        result,
        savings_rate,
    })
}

fn goal_progress_response(
    payload: GoalProgressPayload,
    state: &AppState,
    now: NaiveDateTime,
) -> ApiResult<GoalProgressResponse> {
    let locale = state.locale(payload.locale);
    let goal = Goal {
        target_amount: required_amount("targetAmount", payload.target_amount)?,
        current_amount: optional_amount("currentAmount", payload.current_amount)?,
        deadline: payload.deadline,
    };

    let progress = goal_progress(&goal, now);
    Ok(GoalProgressResponse {
        formatted: GoalProgressFormatted {
            percentage: format_percent(progress.percentage, 1, locale),
            remaining: format_currency(progress.remaining, locale),
            deadline: goal.deadline.map(|d| format_date(d, locale)),
            monthly_contribution_needed: progress
                .monthly_contribution_needed
                .map(|v| format_currency(v, locale)),
        },
        progress,
    })
}

fn investment_summary_response(
    payload: InvestmentSummaryPayload,
    state: &AppState,
) -> ApiResult<InvestmentSummaryResponse> {
    let locale = state.locale(payload.locale);
    for (idx, investment) in payload.investments.iter().enumerate() {
        validate_amount(
            &format!("investments[{idx}].purchasePrice"),
            investment.purchase_price,
        )?;
        validate_amount(
            &format!("investments[{idx}].currentPrice"),
            investment.current_price,
        )?;
    }

    let summary = summarize_investments(&payload.investments);
    Ok(InvestmentSummaryResponse {
        formatted: InvestmentSummaryFormatted {
            total_invested: format_currency(summary.total_invested, locale),
            total_value: format_currency(summary.total_value, locale),
            total_profit: format_currency(summary.total_profit, locale),
            total_profitability: format_percent(summary.total_profitability, 2, locale),
        },
        summary,
    })
}

fn compound_interest_response(
    payload: CompoundInterestPayload,
    state: &AppState,
) -> ApiResult<CompoundInterestResponse> {
    let locale = state.locale(payload.locale);
    let principal = required_amount("principal", payload.principal)?;
    let rate = rate_percent("rate", payload.rate)?;
    let deposit = optional_amount("deposit", payload.deposit)?;
    let Some(periods) = payload.periods else {
        return Err(ApiError::BadRequest("periods is required".to_string()));
    };
    if periods > MAX_PROJECTION_PERIODS {
        return Err(ApiError::BadRequest(format!(
            "periods must be <= {MAX_PROJECTION_PERIODS}"
        )));
    }

    let balance = compound_interest(principal, rate, periods, deposit);
    let total_deposited = deposit * periods as f64;
    let schedule = payload
        .include_schedule
        .then(|| compound_interest_schedule(principal, rate, periods, deposit));

    Ok(CompoundInterestResponse {
        balance,
        total_deposited,
        interest_earned: balance - principal - total_deposited,
        formatted_balance: format_currency(balance, locale),
        compact_balance: format_compact(balance, locale),
        schedule,
    })
}

fn time_to_goal_response(
    payload: TimeToGoalPayload,
    state: &AppState,
) -> ApiResult<TimeToGoalResponse> {
    let locale = state.locale(payload.locale);
    let start = optional_amount("start", payload.start)?;
    let target = required_amount("target", payload.target)?;
    let deposit = optional_amount("deposit", payload.deposit)?;
    let rate = rate_percent("rate", payload.rate)?;

    let periods = periods_to_goal(start, target, deposit, rate);
    Ok(TimeToGoalResponse {
        reachable: periods.is_some(),
        periods,
        projected_balance: periods.map(|p| compound_interest(start, rate, p, deposit)),
        formatted_target: format_currency(target, locale),
    })
}

fn validate_amount(name: &str, value: f64) -> ApiResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::BadRequest(format!(
            "{name} must be a non-negative number"
        )));
    }
    Ok(value)
}

fn required_amount(name: &str, value: Option<f64>) -> ApiResult<f64> {
    let Some(value) = value else {
        return Err(ApiError::BadRequest(format!("{name} is required")));
    };
    validate_amount(name, value)
}

fn optional_amount(name: &str, value: Option<f64>) -> ApiResult<f64> {
    validate_amount(name, value.unwrap_or(0.0))
}

fn rate_percent(name: &str, value: Option<f64>) -> ApiResult<f64> {
    let rate = value.unwrap_or(0.0);
    if !rate.is_finite() || rate <= -100.0 {
        return Err(ApiError::BadRequest(format!(
            "{name} must be a percentage greater than -100"
        )));
    }
    Ok(rate)
}
