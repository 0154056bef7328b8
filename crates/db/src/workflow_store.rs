use sqlx::Row;

use expenso_core::domain::approval::{ApprovalRule, ApprovalStep};
use expenso_core::domain::company::CompanyId;
use expenso_core::domain::expense::{Expense, ExpenseId};
use expenso_core::workflow::store::{StoreError, WorkflowStore};

use crate::repositories::expense::{expense_status_as_str, row_to_expense};
use crate::repositories::rule::row_to_rule;
use crate::repositories::step::{row_to_step, step_status_as_str};
use crate::repositories::RepositoryError;
use crate::DbPool;

/// Workflow persistence over SQLite. `persist_decision` runs in a
/// transaction and only touches a step that is still pending, so two racing
/// decisions on one step cannot both commit.
pub struct SqlWorkflowStore {
    pool: DbPool,
}

impl SqlWorkflowStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn store_error(error: impl std::fmt::Display) -> StoreError {
    StoreError(error.to_string())
}

impl From<RepositoryError> for StoreError {
    fn from(value: RepositoryError) -> Self {
        StoreError(value.to_string())
    }
}

#[async_trait::async_trait]
impl WorkflowStore for SqlWorkflowStore {
    async fn expense(&self, id: &ExpenseId) -> Result<Option<Expense>, StoreError> {
        let row = sqlx::query(
            "SELECT id, company_id, employee_id, amount, currency,
                    amount_in_company_currency, category, description, expense_date,
                    receipt_url, status, current_approver_step, created_at, updated_at
             FROM expenses WHERE id = ?",
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some(ref r) => Ok(Some(row_to_expense(r)?)),
            None => Ok(None),
        }
    }

    async fn steps(&self, expense_id: &ExpenseId) -> Result<Vec<ApprovalStep>, StoreError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, company_id, expense_id, approver_id, step_order, status,
                    comment, decided_at, created_at
             FROM approval_steps
             WHERE expense_id = ?
             ORDER BY step_order ASC",
        )
        .bind(&expense_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.iter().map(row_to_step).collect::<Result<Vec<_>, _>>()?)
    }

    async fn active_rules(&self, company_id: &CompanyId) -> Result<Vec<ApprovalRule>, StoreError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, company_id, name, rule_type, percentage_threshold,
                    specific_approver_id, is_active, categories, amount_threshold, created_at
             FROM approval_rules
             WHERE company_id = ? AND is_active = 1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(&company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.iter().map(row_to_rule).collect::<Result<Vec<_>, _>>()?)
    }

    async fn persist_decision(
        &self,
        expense: &Expense,
        step: &ApprovalStep,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let updated = sqlx::query(
            "UPDATE approval_steps
             SET status = ?, comment = ?, decided_at = ?
             WHERE id = ? AND status = 'pending'",
        )
        .bind(step_status_as_str(&step.status))
        .bind(&step.comment)
        .bind(step.decided_at.map(|dt| dt.to_rfc3339()))
        .bind(&step.id.0)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        if updated.rows_affected() == 0 {
            return Err(StoreError(format!(
                "approval step `{}` was concurrently decided or removed",
                step.id.0
            )));
        }

        sqlx::query(
            "UPDATE expenses
             SET status = ?, current_approver_step = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(expense_status_as_str(&expense.status))
        .bind(i64::from(expense.current_approver_step))
        .bind(expense.updated_at.to_rfc3339())
        .bind(&expense.id.0)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use expenso_core::domain::approval::{ApprovalRule, RuleCondition, RuleId, RuleScope};
    use expenso_core::domain::company::{Company, CompanyId};
    use expenso_core::domain::expense::{Expense, ExpenseId, ExpenseStatus};
    use expenso_core::domain::user::{User, UserId, UserRole};
    use expenso_core::workflow::{build_workflow, Decision, WorkflowEngine, WorkflowStore};

    use super::SqlWorkflowStore;
    use crate::repositories::{
        ApprovalRuleRepository, ApprovalStepRepository, CompanyRepository, ExpenseRepository,
        SqlApprovalRuleRepository, SqlApprovalStepRepository, SqlCompanyRepository,
        SqlExpenseRepository, SqlUserRepository, UserRepository,
    };
    use crate::{connect_with_settings, migrations};

    fn user(id: &str, role: UserRole) -> User {
        User {
            id: UserId(id.to_string()),
            company_id: CompanyId("C-1".to_string()),
            email: format!("{id}@acme.test"),
            full_name: id.to_string(),
            role,
            manager_id: None,
            is_manager_approver: false,
            created_at: Utc::now(),
        }
    }

    fn expense(id: &str) -> Expense {
        let now = Utc::now();
        Expense {
            id: ExpenseId(id.to_string()),
            company_id: CompanyId("C-1".to_string()),
            employee_id: UserId("u-emp".to_string()),
            amount: Decimal::new(30_000, 2),
            currency: "USD".to_string(),
            amount_in_company_currency: Decimal::new(30_000, 2),
            category: "travel".to_string(),
            description: "Quarterly offsite travel".to_string(),
            expense_date: now.date_naive(),
            receipt_url: None,
            status: ExpenseStatus::Pending,
            current_approver_step: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Seeds a company with one employee and two managers, one pending
    /// expense and its constructed workflow.
    async fn setup() -> sqlx::SqlitePool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        SqlCompanyRepository::new(pool.clone())
            .save(Company {
                id: CompanyId("C-1".to_string()),
                name: "Acme".to_string(),
                currency: "USD".to_string(),
                country: "US".to_string(),
                created_at: Utc::now(),
            })
            .await
            .expect("insert company");

        let users = SqlUserRepository::new(pool.clone());
        let employee = user("u-emp", UserRole::Employee);
        let managers = vec![user("u-mgr-1", UserRole::Manager), user("u-mgr-2", UserRole::Manager)];
        users.save(employee.clone()).await.expect("insert employee");
        for manager in &managers {
            users.save(manager.clone()).await.expect("insert manager");
        }

        let submitted = expense("EXP-1");
        SqlExpenseRepository::new(pool.clone()).save(submitted.clone()).await.expect("insert");

        let plan = build_workflow(&submitted.id, &employee, None, &managers, Utc::now());
        SqlApprovalStepRepository::new(pool.clone())
            .insert_all(&plan.steps)
            .await
            .expect("insert steps");

        pool
    }

    #[tokio::test]
    async fn engine_drives_an_expense_to_approval_through_sqlite() {
        let pool = setup().await;
        let engine = WorkflowEngine::new(SqlWorkflowStore::new(pool.clone()));
        let expense_id = ExpenseId("EXP-1".to_string());

        let first = engine
            .record_decision(&expense_id, &UserId("u-mgr-1".to_string()), Decision::Approve, None)
            .await
            .expect("first approval");
        assert_eq!(first.expense.status, ExpenseStatus::Pending);
        assert_eq!(first.expense.current_approver_step, 2);

        let second = engine
            .record_decision(
                &expense_id,
                &UserId("u-mgr-2".to_string()),
                Decision::Approve,
                Some("looks right".to_string()),
            )
            .await
            .expect("second approval");
        assert_eq!(second.expense.status, ExpenseStatus::Approved);

        // The committed state is visible to plain reads immediately.
        let persisted = SqlExpenseRepository::new(pool.clone())
            .find_by_id(&expense_id)
            .await
            .expect("read expense")
            .expect("expense exists");
        assert_eq!(persisted.status, ExpenseStatus::Approved);

        let steps = SqlApprovalStepRepository::new(pool)
            .list_for_expense(&expense_id)
            .await
            .expect("read steps");
        assert!(steps.iter().all(|step| !step.is_pending()));
        assert_eq!(steps[1].comment.as_deref(), Some("looks right"));
    }

    #[tokio::test]
    async fn active_rules_snapshot_is_filtered_and_ordered() {
        let pool = setup().await;
        let rules = SqlApprovalRuleRepository::new(pool.clone());

        let active = ApprovalRule::new(
            RuleId("R-1".to_string()),
            CompanyId("C-1".to_string()),
            "majority",
            RuleCondition::Percentage { threshold: 50 },
            RuleScope::default(),
            true,
            Utc::now(),
        )
        .expect("valid rule");
        let mut inactive = active.clone();
        inactive.id = RuleId("R-2".to_string());
        inactive.is_active = false;

        rules.save(active).await.expect("save active");
        rules.save(inactive).await.expect("save inactive");

        let snapshot = SqlWorkflowStore::new(pool)
            .active_rules(&CompanyId("C-1".to_string()))
            .await
            .expect("load rules");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id.0, "R-1");
    }

    #[tokio::test]
    async fn stale_decision_write_is_aborted() {
        let pool = setup().await;
        let store = SqlWorkflowStore::new(pool.clone());
        let expense_id = ExpenseId("EXP-1".to_string());

        let mut settled = store.expense(&expense_id).await.expect("load").expect("exists");
        let mut steps = store.steps(&expense_id).await.expect("load steps");
        steps[0].approve(None, Utc::now());
        settled.updated_at = Utc::now();

        store.persist_decision(&settled, &steps[0]).await.expect("first write commits");

        // Replaying the same step write must fail: the row is no longer
        // pending, and the expense is untouched by the aborted transaction.
        let error = store
            .persist_decision(&settled, &steps[0])
            .await
            .expect_err("second write aborts");
        assert!(error.0.contains("concurrently decided"));
    }
}
