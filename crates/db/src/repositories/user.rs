use chrono::{DateTime, Utc};
use sqlx::Row;

use expenso_core::domain::company::CompanyId;
use expenso_core::domain::user::{User, UserId, UserRole};

use super::{RepositoryError, UserRepository};
use crate::DbPool;

pub struct SqlUserRepository {
    pool: DbPool,
}

impl SqlUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_role(s: &str) -> UserRole {
    match s {
        "admin" => UserRole::Admin,
        "manager" => UserRole::Manager,
        _ => UserRole::Employee,
    }
}

pub fn role_as_str(role: &UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin",
        UserRole::Manager => "manager",
        UserRole::Employee => "employee",
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let company_id: String =
        row.try_get("company_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let email: String =
        row.try_get("email").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let full_name: String =
        row.try_get("full_name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let role_str: String =
        row.try_get("role").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let manager_id: Option<String> =
        row.try_get("manager_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let is_manager_approver: i64 =
        row.try_get("is_manager_approver").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at_str: String =
        row.try_get("created_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());

    Ok(User {
        id: UserId(id),
        company_id: CompanyId(company_id),
        email,
        full_name,
        role: parse_role(&role_str),
        manager_id: manager_id.map(UserId),
        is_manager_approver: is_manager_approver != 0,
        created_at,
    })
}

#[async_trait::async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, company_id, email, full_name, role, manager_id,
                    is_manager_approver, created_at
             FROM users WHERE id = ?",
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_user(r)?)),
            None => Ok(None),
        }
    }

    async fn list_managers(&self, company_id: &CompanyId) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, company_id, email, full_name, role, manager_id,
                    is_manager_approver, created_at
             FROM users
             WHERE company_id = ? AND role = 'manager'
             ORDER BY id ASC",
        )
        .bind(&company_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()
    }

    async fn save(&self, user: User) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, company_id, email, full_name, role, manager_id,
                                is_manager_approver, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 email = excluded.email,
                 full_name = excluded.full_name,
                 role = excluded.role,
                 manager_id = excluded.manager_id,
                 is_manager_approver = excluded.is_manager_approver",
        )
        .bind(&user.id.0)
        .bind(&user.company_id.0)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(role_as_str(&user.role))
        .bind(user.manager_id.as_ref().map(|id| id.0.clone()))
        .bind(i64::from(user.is_manager_approver))
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
