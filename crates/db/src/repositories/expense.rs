use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use expenso_core::domain::company::CompanyId;
use expenso_core::domain::expense::{Expense, ExpenseId, ExpenseStatus};
use expenso_core::domain::user::UserId;

use super::{ExpenseRepository, RepositoryError};
use crate::DbPool;

pub struct SqlExpenseRepository {
    pool: DbPool,
}

impl SqlExpenseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_expense_status(s: &str) -> ExpenseStatus {
    match s {
        "approved" => ExpenseStatus::Approved,
        "rejected" => ExpenseStatus::Rejected,
        _ => ExpenseStatus::Pending,
    }
}

pub fn expense_status_as_str(status: &ExpenseStatus) -> &'static str {
    match status {
        ExpenseStatus::Pending => "pending",
        ExpenseStatus::Approved => "approved",
        ExpenseStatus::Rejected => "rejected",
    }
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(raw)
        .map_err(|e| RepositoryError::Decode(format!("column `{column}`: {e}")))
}

pub(crate) fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let company_id: String =
        row.try_get("company_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let employee_id: String =
        row.try_get("employee_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let amount_str: String =
        row.try_get("amount").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let currency: String =
        row.try_get("currency").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let converted_str: String = row
        .try_get("amount_in_company_currency")
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let category: String =
        row.try_get("category").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let description: String =
        row.try_get("description").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let expense_date_str: String =
        row.try_get("expense_date").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let receipt_url: Option<String> =
        row.try_get("receipt_url").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let status_str: String =
        row.try_get("status").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let current_approver_step: i64 = row
        .try_get("current_approver_step")
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at_str: String =
        row.try_get("created_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let updated_at_str: String =
        row.try_get("updated_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let expense_date = NaiveDate::parse_from_str(&expense_date_str, "%Y-%m-%d")
        .map_err(|e| RepositoryError::Decode(format!("column `expense_date`: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());
    let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());

    Ok(Expense {
        id: ExpenseId(id),
        company_id: CompanyId(company_id),
        employee_id: UserId(employee_id),
        amount: parse_decimal("amount", &amount_str)?,
        currency,
        amount_in_company_currency: parse_decimal("amount_in_company_currency", &converted_str)?,
        category,
        description,
        expense_date,
        receipt_url,
        status: parse_expense_status(&status_str),
        current_approver_step: current_approver_step.max(0) as u32,
        created_at,
        updated_at,
    })
}

const EXPENSE_COLUMNS: &str = "id, company_id, employee_id, amount, currency,
        amount_in_company_currency, category, description, expense_date,
        receipt_url, status, current_approver_step, created_at, updated_at";

#[async_trait::async_trait]
impl ExpenseRepository for SqlExpenseRepository {
    async fn find_by_id(&self, id: &ExpenseId) -> Result<Option<Expense>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?"))
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_expense(r)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, expense: Expense) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO expenses (id, company_id, employee_id, amount, currency,
                                   amount_in_company_currency, category, description,
                                   expense_date, receipt_url, status,
                                   current_approver_step, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 amount = excluded.amount,
                 currency = excluded.currency,
                 amount_in_company_currency = excluded.amount_in_company_currency,
                 category = excluded.category,
                 description = excluded.description,
                 expense_date = excluded.expense_date,
                 receipt_url = excluded.receipt_url,
                 status = excluded.status,
                 current_approver_step = excluded.current_approver_step,
                 updated_at = excluded.updated_at",
        )
        .bind(&expense.id.0)
        .bind(&expense.company_id.0)
        .bind(&expense.employee_id.0)
        .bind(expense.amount.to_string())
        .bind(&expense.currency)
        .bind(expense.amount_in_company_currency.to_string())
        .bind(&expense.category)
        .bind(&expense.description)
        .bind(expense.expense_date.format("%Y-%m-%d").to_string())
        .bind(&expense.receipt_url)
        .bind(expense_status_as_str(&expense.status))
        .bind(i64::from(expense.current_approver_step))
        .bind(expense.created_at.to_rfc3339())
        .bind(expense.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses
             WHERE company_id = ? ORDER BY created_at DESC"
        ))
        .bind(&company_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_expense).collect::<Result<Vec<_>, _>>()
    }

    async fn list_for_employee(
        &self,
        employee_id: &UserId,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses
             WHERE employee_id = ? ORDER BY created_at DESC"
        ))
        .bind(&employee_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_expense).collect::<Result<Vec<_>, _>>()
    }

    async fn delete_pending(
        &self,
        id: &ExpenseId,
        employee_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM expenses WHERE id = ? AND employee_id = ? AND status = 'pending'",
        )
        .bind(&id.0)
        .bind(&employee_id.0)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use expenso_core::domain::company::{Company, CompanyId};
    use expenso_core::domain::expense::{Expense, ExpenseId, ExpenseStatus};
    use expenso_core::domain::user::{User, UserId, UserRole};

    use super::SqlExpenseRepository;
    use crate::repositories::{
        CompanyRepository, ExpenseRepository, SqlCompanyRepository, SqlUserRepository,
        UserRepository,
    };
    use crate::{connect_with_settings, migrations};

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

        SqlUserRepository::new(pool.clone())
            .save(User {
                id: UserId("u-emp".to_string()),
                company_id: CompanyId("C-1".to_string()),
                email: "emp@acme.test".to_string(),
                full_name: "Employee".to_string(),
                role: UserRole::Employee,
                manager_id: None,
                is_manager_approver: false,
                created_at: Utc::now(),
            })
            .await
            .expect("insert employee");

        pool
    }

    fn sample_expense(id: &str) -> Expense {
        let now = Utc::now();
        Expense {
            id: ExpenseId(id.to_string()),
            company_id: CompanyId("C-1".to_string()),
            employee_id: UserId("u-emp".to_string()),
            amount: Decimal::new(12_345, 2),
            currency: "EUR".to_string(),
            amount_in_company_currency: Decimal::new(13_400, 2),
            category: "travel".to_string(),
            description: "Taxi to airport".to_string(),
            expense_date: NaiveDate::from_ymd_opt(2026, 1, 20).expect("valid date"),
            receipt_url: None,
            status: ExpenseStatus::Pending,
            current_approver_step: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn save_and_find_round_trips_decimals_and_dates() {
        let pool = setup().await;
        let repo = SqlExpenseRepository::new(pool);

        repo.save(sample_expense("EXP-1")).await.expect("save");
        let found = repo
            .find_by_id(&ExpenseId("EXP-1".to_string()))
            .await
            .expect("find")
            .expect("should exist");

        assert_eq!(found.amount, Decimal::new(12_345, 2));
        assert_eq!(found.amount_in_company_currency, Decimal::new(13_400, 2));
        assert_eq!(found.expense_date, NaiveDate::from_ymd_opt(2026, 1, 20).expect("valid date"));
        assert_eq!(found.status, ExpenseStatus::Pending);
    }

    #[tokio::test]
    async fn delete_pending_is_owner_and_status_guarded() {
        let pool = setup().await;
        let repo = SqlExpenseRepository::new(pool);

        repo.save(sample_expense("EXP-1")).await.expect("save");

        let stranger = repo
            .delete_pending(&ExpenseId("EXP-1".to_string()), &UserId("u-other".to_string()))
            .await
            .expect("delete by stranger");
        assert!(!stranger);

        let mut approved = sample_expense("EXP-1");
        approved.status = ExpenseStatus::Approved;
        repo.save(approved).await.expect("approve");
        let terminal = repo
            .delete_pending(&ExpenseId("EXP-1".to_string()), &UserId("u-emp".to_string()))
            .await
            .expect("delete terminal");
        assert!(!terminal);

        repo.save(sample_expense("EXP-2")).await.expect("save second");
        let owner = repo
            .delete_pending(&ExpenseId("EXP-2".to_string()), &UserId("u-emp".to_string()))
            .await
            .expect("delete pending by owner");
        assert!(owner);
    }
}
