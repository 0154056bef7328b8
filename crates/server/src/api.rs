//! JSON API routes for expense submission and approval decisions.
//!
//! Endpoints:
//! - `GET    /api/v1/expenses`                    — list expenses (role-scoped)
//! - `POST   /api/v1/expenses`                    — submit an expense and build its approval chain
//! - `PUT    /api/v1/expenses/{id}`               — edit a pending expense (owner only)
//! - `DELETE /api/v1/expenses/{id}`               — withdraw a pending expense (owner only)
//! - `POST   /api/v1/expenses/{id}/approve`       — record an approval decision
//! - `POST   /api/v1/expenses/{id}/reject`        — record a rejection decision
//! - `GET    /api/v1/approvals/workflows`         — approval step projection (role-scoped)
//! - `GET    /api/v1/approvals/rules`             — list company rules
//! - `POST   /api/v1/approvals/rules`             — create a rule (admin)
//! - `PUT    /api/v1/approvals/rules/{id}`        — update a rule (admin)
//! - `DELETE /api/v1/approvals/rules/{id}`        — delete a rule (admin)
//!
//! Caller identity arrives in the `X-User-Id` header; authenticating that
//! header is the upstream gateway's job. The workflow engine independently
//! re-validates that the caller holds a pending step.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use expenso_core::audit::{AuditContext, AuditEvent, AuditSink};
use expenso_core::domain::approval::{ApprovalRule, RuleCondition, RuleId, RuleScope, StepStatus};
use expenso_core::domain::expense::{Expense, ExpenseId, ExpenseStatus};
use expenso_core::domain::user::{User, UserId, UserRole};
use expenso_core::errors::{DomainError, WorkflowError};
use expenso_core::workflow::{build_workflow, Decision, WorkflowEngine};
use expenso_db::repositories::rule::rule_type_as_str;
use expenso_db::repositories::{
    ApprovalRuleRepository, ApprovalStepRepository, ExpenseRepository, RepositoryError,
    SqlApprovalRuleRepository, SqlApprovalStepRepository, SqlExpenseRepository, SqlUserRepository,
    UserRepository,
};
use expenso_db::{DbPool, SqlWorkflowStore};

#[derive(Clone)]
pub struct ApiState {
    db_pool: DbPool,
    engine: Arc<WorkflowEngine<SqlWorkflowStore>>,
}

pub fn router(db_pool: DbPool) -> Router {
    let state = ApiState {
        engine: Arc::new(WorkflowEngine::new(SqlWorkflowStore::new(db_pool.clone()))),
        db_pool,
    };

    Router::new()
        .route("/api/v1/expenses", get(list_expenses).post(create_expense))
        .route("/api/v1/expenses/{id}", put(update_expense).delete(delete_expense))
        .route("/api/v1/expenses/{id}/approve", post(approve_expense))
        .route("/api/v1/expenses/{id}/reject", post(reject_expense))
        .route("/api/v1/approvals/workflows", get(list_workflows))
        .route("/api/v1/approvals/rules", get(list_rules).post(create_rule))
        .route("/api/v1/approvals/rules/{id}", put(update_rule).delete(delete_rule))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self { status: StatusCode::UNAUTHORIZED, message: message.into() }
    }

    fn forbidden(message: impl Into<String>) -> Self {
        Self { status: StatusCode::FORBIDDEN, message: message.into() }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(value: WorkflowError) -> Self {
        let status = match &value {
            WorkflowError::StepNotFound { .. } => StatusCode::NOT_FOUND,
            WorkflowError::InvalidState(_) => StatusCode::BAD_REQUEST,
            WorkflowError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: value.to_string() }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(value: RepositoryError) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: value.to_string() }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self::bad_request(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// Caller resolution
// ---------------------------------------------------------------------------

async fn caller(state: &ApiState, headers: &HeaderMap) -> Result<User, ApiError> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::unauthorized("missing X-User-Id header"))?;

    SqlUserRepository::new(state.db_pool.clone())
        .find_by_id(&UserId(user_id.to_string()))
        .await?
        .ok_or_else(|| ApiError::unauthorized(format!("unknown user `{user_id}`")))
}

/// Forwards decision audit events into the structured log stream.
struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, event: AuditEvent) {
        info!(
            event_name = %event.event_type,
            correlation_id = %event.correlation_id,
            expense_id = event.expense_id.as_ref().map(|id| id.0.as_str()).unwrap_or("unknown"),
            actor = %event.actor,
            outcome = ?event.outcome,
            "workflow decision audited"
        );
    }
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub amount: Decimal,
    pub currency: String,
    pub amount_in_company_currency: Decimal,
    pub category: String,
    pub description: String,
    pub expense_date: NaiveDate,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub amount_in_company_currency: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub expense_date: Option<NaiveDate>,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: String,
    pub company_id: String,
    pub employee_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub amount_in_company_currency: Decimal,
    pub category: String,
    pub description: String,
    pub expense_date: NaiveDate,
    pub receipt_url: Option<String>,
    pub status: ExpenseStatus,
    pub current_approver_step: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id.0,
            company_id: expense.company_id.0,
            employee_id: expense.employee_id.0,
            amount: expense.amount,
            currency: expense.currency,
            amount_in_company_currency: expense.amount_in_company_currency,
            category: expense.category,
            description: expense.description,
            expense_date: expense.expense_date,
            receipt_url: expense.receipt_url,
            status: expense.status,
            current_approver_step: expense.current_approver_step,
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub comments: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub message: String,
    pub expense: DecisionExpense,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionExpense {
    pub id: String,
    pub status: ExpenseStatus,
    pub current_approver_step: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowQuery {
    pub expense_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStepResponse {
    pub id: String,
    pub company_id: String,
    pub expense_id: String,
    pub approver_id: String,
    pub step_order: u32,
    pub status: StepStatus,
    pub comment: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<expenso_core::domain::approval::ApprovalStep> for WorkflowStepResponse {
    fn from(step: expenso_core::domain::approval::ApprovalStep) -> Self {
        Self {
            id: step.id.0,
            company_id: step.company_id.0,
            expense_id: step.expense_id.0,
            approver_id: step.approver_id.0,
            step_order: step.order,
            status: step.status,
            comment: step.comment,
            decided_at: step.decided_at,
            created_at: step.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    pub name: String,
    pub rule_type: String,
    pub percentage_threshold: Option<u8>,
    pub specific_approver_id: Option<String>,
    pub categories: Option<Vec<String>>,
    pub amount_threshold: Option<Decimal>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRuleRequest {
    pub name: Option<String>,
    pub rule_type: Option<String>,
    pub percentage_threshold: Option<u8>,
    pub specific_approver_id: Option<String>,
    pub categories: Option<Vec<String>>,
    pub amount_threshold: Option<Decimal>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResponse {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub rule_type: &'static str,
    pub percentage_threshold: Option<u8>,
    pub specific_approver_id: Option<String>,
    pub categories: Vec<String>,
    pub amount_threshold: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ApprovalRule> for RuleResponse {
    fn from(rule: ApprovalRule) -> Self {
        let rule_type = rule_type_as_str(&rule.condition);
        let (percentage_threshold, specific_approver_id) = match &rule.condition {
            RuleCondition::Percentage { threshold } => (Some(*threshold), None),
            RuleCondition::SpecificApprover { approver_id } => {
                (None, Some(approver_id.0.clone()))
            }
            RuleCondition::Hybrid { threshold, approver_id } => {
                (Some(*threshold), Some(approver_id.0.clone()))
            }
        };

        Self {
            id: rule.id.0,
            company_id: rule.company_id.0,
            name: rule.name,
            rule_type,
            percentage_threshold,
            specific_approver_id,
            categories: rule.scope.categories,
            amount_threshold: rule.scope.amount_threshold,
            is_active: rule.is_active,
            created_at: rule.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Expense handlers
// ---------------------------------------------------------------------------

async fn list_expenses(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let user = caller(&state, &headers).await?;
    let repo = SqlExpenseRepository::new(state.db_pool.clone());

    let expenses = match user.role {
        UserRole::Employee => repo.list_for_employee(&user.id).await?,
        UserRole::Manager | UserRole::Admin => repo.list_for_company(&user.company_id).await?,
    };

    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}

async fn create_expense(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ApiError> {
    let employee = caller(&state, &headers).await?;
    let users = SqlUserRepository::new(state.db_pool.clone());

    let now = Utc::now();
    let mut expense = Expense {
        id: ExpenseId(Uuid::new_v4().to_string()),
        company_id: employee.company_id.clone(),
        employee_id: employee.id.clone(),
        amount: body.amount,
        currency: body.currency,
        amount_in_company_currency: body.amount_in_company_currency,
        category: body.category,
        description: body.description,
        expense_date: body.expense_date,
        receipt_url: body.receipt_url,
        status: ExpenseStatus::Pending,
        current_approver_step: 1,
        created_at: now,
        updated_at: now,
    };

    let direct_manager = match &employee.manager_id {
        Some(manager_id) => users.find_by_id(manager_id).await?,
        None => None,
    };
    let managers = users.list_managers(&employee.company_id).await?;

    let plan = build_workflow(&expense.id, &employee, direct_manager.as_ref(), &managers, now);
    expense.status = plan.initial_status;

    SqlExpenseRepository::new(state.db_pool.clone()).save(expense.clone()).await?;
    SqlApprovalStepRepository::new(state.db_pool.clone()).insert_all(&plan.steps).await?;

    info!(
        event_name = "expense.submitted",
        expense_id = %expense.id.0,
        company_id = %expense.company_id.0,
        employee_id = %expense.employee_id.0,
        step_count = plan.steps.len(),
        "expense submitted with approval chain"
    );

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

async fn update_expense(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let user = caller(&state, &headers).await?;
    let repo = SqlExpenseRepository::new(state.db_pool.clone());

    let mut expense = repo
        .find_by_id(&ExpenseId(id.clone()))
        .await?
        .filter(|expense| expense.employee_id == user.id)
        .ok_or_else(|| ApiError::not_found(format!("expense `{id}` not found")))?;

    if expense.status != ExpenseStatus::Pending {
        return Err(ApiError::bad_request("only pending expenses can be edited"));
    }

    if let (Some(amount), Some(currency)) = (body.amount, body.currency.as_ref()) {
        expense.amount = amount;
        expense.currency = currency.clone();
    }
    if let Some(converted) = body.amount_in_company_currency {
        expense.amount_in_company_currency = converted;
    }
    if let Some(category) = body.category {
        expense.category = category;
    }
    if let Some(description) = body.description {
        expense.description = description;
    }
    if let Some(expense_date) = body.expense_date {
        expense.expense_date = expense_date;
    }
    if let Some(receipt_url) = body.receipt_url {
        expense.receipt_url = Some(receipt_url);
    }
    expense.updated_at = Utc::now();

    repo.save(expense.clone()).await?;
    Ok(Json(ExpenseResponse::from(expense)))
}

async fn delete_expense(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user = caller(&state, &headers).await?;

    let removed = SqlExpenseRepository::new(state.db_pool.clone())
        .delete_pending(&ExpenseId(id.clone()), &user.id)
        .await?;

    if !removed {
        return Err(ApiError::not_found(format!("no pending expense `{id}` owned by caller")));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Decision handlers
// ---------------------------------------------------------------------------

async fn approve_expense(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, ApiError> {
    record_decision(state, headers, id, Decision::Approve, body.comments).await
}

async fn reject_expense(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, ApiError> {
    record_decision(state, headers, id, Decision::Reject, body.comments).await
}

async fn record_decision(
    state: ApiState,
    headers: HeaderMap,
    id: String,
    decision: Decision,
    comments: Option<String>,
) -> Result<Json<DecisionResponse>, ApiError> {
    let user = caller(&state, &headers).await?;
    let expense_id = ExpenseId(id);
    let correlation_id = Uuid::new_v4().to_string();

    let outcome = state
        .engine
        .record_decision_with_audit(
            &expense_id,
            &user.id,
            decision,
            comments,
            &TracingAuditSink,
            &AuditContext::new(Some(expense_id.clone()), correlation_id, user.id.0.clone()),
        )
        .await?;

    let message = match decision {
        Decision::Approve => "Expense approved successfully",
        Decision::Reject => "Expense rejected successfully",
    };

    Ok(Json(DecisionResponse {
        message: message.to_string(),
        expense: DecisionExpense {
            id: outcome.expense.id.0,
            status: outcome.expense.status,
            current_approver_step: outcome.expense.current_approver_step,
        },
    }))
}

// ---------------------------------------------------------------------------
// Workflow projection
// ---------------------------------------------------------------------------

async fn list_workflows(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Query(query): Query<WorkflowQuery>,
) -> Result<Json<Vec<WorkflowStepResponse>>, ApiError> {
    let user = caller(&state, &headers).await?;
    let steps = SqlApprovalStepRepository::new(state.db_pool.clone());
    let expenses = SqlExpenseRepository::new(state.db_pool.clone());

    let mut collected = match user.role {
        // Managers see only the steps assigned to them.
        UserRole::Manager => steps.list_for_approver(&user.id).await?,
        // Admins see every step in the company.
        UserRole::Admin => {
            let mut all = Vec::new();
            for expense in expenses.list_for_company(&user.company_id).await? {
                all.extend(steps.list_for_expense(&expense.id).await?);
            }
            all
        }
        // Employees see the chains of their own expenses.
        UserRole::Employee => {
            let mut all = Vec::new();
            for expense in expenses.list_for_employee(&user.id).await? {
                all.extend(steps.list_for_expense(&expense.id).await?);
            }
            all
        }
    };

    if let Some(expense_id) = query.expense_id {
        collected.retain(|step| step.expense_id.0 == expense_id);
    }
    collected.sort_by(|left, right| {
        left.expense_id.0.cmp(&right.expense_id.0).then(left.order.cmp(&right.order))
    });

    Ok(Json(collected.into_iter().map(WorkflowStepResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// Rule handlers
// ---------------------------------------------------------------------------

fn condition_from_request(
    rule_type: &str,
    percentage_threshold: Option<u8>,
    specific_approver_id: Option<UserId>,
) -> Result<RuleCondition, ApiError> {
    match rule_type {
        "percentage" => {
            let threshold = percentage_threshold.ok_or_else(|| {
                ApiError::bad_request("percentageThreshold is required for percentage rules")
            })?;
            Ok(RuleCondition::Percentage { threshold })
        }
        "specific_approver" => {
            let approver_id = specific_approver_id.ok_or_else(|| {
                ApiError::bad_request("specificApproverId is required for specific_approver rules")
            })?;
            Ok(RuleCondition::SpecificApprover { approver_id })
        }
        "hybrid" => {
            let threshold = percentage_threshold.ok_or_else(|| {
                ApiError::bad_request("percentageThreshold is required for hybrid rules")
            })?;
            let approver_id = specific_approver_id.ok_or_else(|| {
                ApiError::bad_request("specificApproverId is required for hybrid rules")
            })?;
            Ok(RuleCondition::Hybrid { threshold, approver_id })
        }
        other => Err(ApiError::bad_request(format!(
            "unknown rule type `{other}` (expected percentage|specific_approver|hybrid)"
        ))),
    }
}

fn require_admin(user: &User) -> Result<(), ApiError> {
    if user.role != UserRole::Admin {
        return Err(ApiError::forbidden("approval rules are managed by admins"));
    }
    Ok(())
}

async fn list_rules(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<Vec<RuleResponse>>, ApiError> {
    let user = caller(&state, &headers).await?;

    let rules = SqlApprovalRuleRepository::new(state.db_pool.clone())
        .list_for_company(&user.company_id)
        .await?;

    Ok(Json(rules.into_iter().map(RuleResponse::from).collect()))
}

async fn create_rule(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<RuleResponse>), ApiError> {
    let user = caller(&state, &headers).await?;
    require_admin(&user)?;

    let condition = condition_from_request(
        &body.rule_type,
        body.percentage_threshold,
        body.specific_approver_id.map(UserId),
    )?;

    let rule = ApprovalRule::new(
        RuleId(Uuid::new_v4().to_string()),
        user.company_id.clone(),
        body.name,
        condition,
        RuleScope {
            categories: body.categories.unwrap_or_default(),
            amount_threshold: body.amount_threshold,
        },
        body.is_active.unwrap_or(true),
        Utc::now(),
    )?;

    SqlApprovalRuleRepository::new(state.db_pool.clone()).save(rule.clone()).await?;

    info!(
        event_name = "approval_rule.created",
        rule_id = %rule.id.0,
        company_id = %rule.company_id.0,
        rule_type = rule_type_as_str(&rule.condition),
        "approval rule created"
    );

    Ok((StatusCode::CREATED, Json(RuleResponse::from(rule))))
}

async fn update_rule(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateRuleRequest>,
) -> Result<Json<RuleResponse>, ApiError> {
    let user = caller(&state, &headers).await?;
    require_admin(&user)?;

    let repo = SqlApprovalRuleRepository::new(state.db_pool.clone());
    let existing = repo
        .find_by_id(&RuleId(id.clone()))
        .await?
        .filter(|rule| rule.company_id == user.company_id)
        .ok_or_else(|| ApiError::not_found(format!("approval rule `{id}` not found")))?;

    let (current_threshold, current_approver) = match &existing.condition {
        RuleCondition::Percentage { threshold } => (Some(*threshold), None),
        RuleCondition::SpecificApprover { approver_id } => (None, Some(approver_id.clone())),
        RuleCondition::Hybrid { threshold, approver_id } => {
            (Some(*threshold), Some(approver_id.clone()))
        }
    };

    let rule_type =
        body.rule_type.unwrap_or_else(|| rule_type_as_str(&existing.condition).to_string());
    let condition = condition_from_request(
        &rule_type,
        body.percentage_threshold.or(current_threshold),
        body.specific_approver_id.map(UserId).or(current_approver),
    )?;

    let updated = ApprovalRule::new(
        existing.id.clone(),
        existing.company_id.clone(),
        body.name.unwrap_or(existing.name),
        condition,
        RuleScope {
            categories: body.categories.unwrap_or(existing.scope.categories),
            amount_threshold: body.amount_threshold.or(existing.scope.amount_threshold),
        },
        body.is_active.unwrap_or(existing.is_active),
        existing.created_at,
    )?;

    repo.save(updated.clone()).await?;
    Ok(Json(RuleResponse::from(updated)))
}

async fn delete_rule(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user = caller(&state, &headers).await?;
    require_admin(&user)?;

    let removed = SqlApprovalRuleRepository::new(state.db_pool.clone())
        .delete(&RuleId(id.clone()), &user.company_id)
        .await?;

    if !removed {
        return Err(ApiError::not_found(format!("approval rule `{id}` not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
