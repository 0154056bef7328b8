use chrono::{DateTime, Utc};
use sqlx::Row;

use expenso_core::domain::approval::{ApprovalStep, StepId, StepStatus};
use expenso_core::domain::company::CompanyId;
use expenso_core::domain::expense::ExpenseId;
use expenso_core::domain::user::UserId;

use super::{ApprovalStepRepository, RepositoryError};
use crate::DbPool;

pub struct SqlApprovalStepRepository {
    pool: DbPool,
}

impl SqlApprovalStepRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_step_status(s: &str) -> StepStatus {
    match s {
        "approved" => StepStatus::Approved,
        "rejected" => StepStatus::Rejected,
        _ => StepStatus::Pending,
    }
}

pub fn step_status_as_str(status: &StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => "pending",
        StepStatus::Approved => "approved",
        StepStatus::Rejected => "rejected",
    }
}

pub(crate) fn row_to_step(row: &sqlx::sqlite::SqliteRow) -> Result<ApprovalStep, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let company_id: String =
        row.try_get("company_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let expense_id: String =
        row.try_get("expense_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let approver_id: String =
        row.try_get("approver_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let step_order: i64 =
        row.try_get("step_order").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let status_str: String =
        row.try_get("status").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let comment: Option<String> =
        row.try_get("comment").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let decided_at_str: Option<String> =
        row.try_get("decided_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at_str: String =
        row.try_get("created_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let decided_at = decided_at_str
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc));
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());

    Ok(ApprovalStep {
        id: StepId(id),
        company_id: CompanyId(company_id),
        expense_id: ExpenseId(expense_id),
        approver_id: UserId(approver_id),
        order: step_order.max(0) as u32,
        status: parse_step_status(&status_str),
        comment,
        decided_at,
        created_at,
    })
}

#[async_trait::async_trait]
impl ApprovalStepRepository for SqlApprovalStepRepository {
    async fn list_for_expense(
        &self,
        expense_id: &ExpenseId,
    ) -> Result<Vec<ApprovalStep>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, company_id, expense_id, approver_id, step_order, status,
                    comment, decided_at, created_at
             FROM approval_steps
             WHERE expense_id = ?
             ORDER BY step_order ASC",
        )
        .bind(&expense_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_step).collect::<Result<Vec<_>, _>>()
    }

    async fn list_for_approver(
        &self,
        approver_id: &UserId,
    ) -> Result<Vec<ApprovalStep>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, company_id, expense_id, approver_id, step_order, status,
                    comment, decided_at, created_at
             FROM approval_steps
             WHERE approver_id = ?
             ORDER BY expense_id ASC, step_order ASC",
        )
        .bind(&approver_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_step).collect::<Result<Vec<_>, _>>()
    }

    async fn insert_all(&self, steps: &[ApprovalStep]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for step in steps {
            sqlx::query(
                "INSERT INTO approval_steps (id, company_id, expense_id, approver_id,
                                             step_order, status, comment, decided_at, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&step.id.0)
            .bind(&step.company_id.0)
            .bind(&step.expense_id.0)
            .bind(&step.approver_id.0)
            .bind(i64::from(step.order))
            .bind(step_status_as_str(&step.status))
            .bind(&step.comment)
            .bind(step.decided_at.map(|dt| dt.to_rfc3339()))
            .bind(step.created_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
