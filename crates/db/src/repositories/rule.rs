use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use expenso_core::domain::approval::{ApprovalRule, RuleCondition, RuleId, RuleScope};
use expenso_core::domain::company::CompanyId;
use expenso_core::domain::user::UserId;

use super::{ApprovalRuleRepository, RepositoryError};
use crate::DbPool;

pub struct SqlApprovalRuleRepository {
    pool: DbPool,
}

impl SqlApprovalRuleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub fn rule_type_as_str(condition: &RuleCondition) -> &'static str {
    match condition {
        RuleCondition::Percentage { .. } => "percentage",
        RuleCondition::SpecificApprover { .. } => "specific_approver",
        RuleCondition::Hybrid { .. } => "hybrid",
    }
}

fn condition_from_columns(
    rule_type: &str,
    percentage_threshold: Option<i64>,
    specific_approver_id: Option<String>,
) -> Result<RuleCondition, RepositoryError> {
    let threshold = || {
        percentage_threshold
            .and_then(|value| u8::try_from(value).ok())
            .ok_or_else(|| {
                RepositoryError::Decode(format!(
                    "rule of type `{rule_type}` is missing a valid percentage_threshold"
                ))
            })
    };
    let approver = || {
        specific_approver_id.clone().map(UserId).ok_or_else(|| {
            RepositoryError::Decode(format!(
                "rule of type `{rule_type}` is missing specific_approver_id"
            ))
        })
    };

    match rule_type {
        "percentage" => Ok(RuleCondition::Percentage { threshold: threshold()? }),
        "specific_approver" => Ok(RuleCondition::SpecificApprover { approver_id: approver()? }),
        "hybrid" => Ok(RuleCondition::Hybrid { threshold: threshold()?, approver_id: approver()? }),
        other => Err(RepositoryError::Decode(format!("unknown rule type `{other}`"))),
    }
}

pub(crate) fn row_to_rule(row: &sqlx::sqlite::SqliteRow) -> Result<ApprovalRule, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let company_id: String =
        row.try_get("company_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let rule_type: String =
        row.try_get("rule_type").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let percentage_threshold: Option<i64> = row
        .try_get("percentage_threshold")
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let specific_approver_id: Option<String> = row
        .try_get("specific_approver_id")
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let is_active: i64 =
        row.try_get("is_active").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let categories_json: Option<String> =
        row.try_get("categories").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let amount_threshold_str: Option<String> =
        row.try_get("amount_threshold").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at_str: String =
        row.try_get("created_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let condition = condition_from_columns(&rule_type, percentage_threshold, specific_approver_id)?;
    let categories = match categories_json {
        Some(raw) => serde_json::from_str::<Vec<String>>(&raw)
            .map_err(|e| RepositoryError::Decode(format!("column `categories`: {e}")))?,
        None => Vec::new(),
    };
    let amount_threshold = amount_threshold_str
        .map(|raw| {
            Decimal::from_str(&raw)
                .map_err(|e| RepositoryError::Decode(format!("column `amount_threshold`: {e}")))
        })
        .transpose()?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());

    ApprovalRule::new(
        RuleId(id),
        CompanyId(company_id),
        name,
        condition,
        RuleScope { categories, amount_threshold },
        is_active != 0,
        created_at,
    )
    .map_err(|e| RepositoryError::Decode(e.to_string()))
}

const RULE_COLUMNS: &str = "id, company_id, name, rule_type, percentage_threshold,
        specific_approver_id, is_active, categories, amount_threshold, created_at";

#[async_trait::async_trait]
impl ApprovalRuleRepository for SqlApprovalRuleRepository {
    async fn find_by_id(&self, id: &RuleId) -> Result<Option<ApprovalRule>, RepositoryError> {
        let row =
            sqlx::query(&format!("SELECT {RULE_COLUMNS} FROM approval_rules WHERE id = ?"))
                .bind(&id.0)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_rule(r)?)),
            None => Ok(None),
        }
    }

    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<ApprovalRule>, RepositoryError> {
        // Creation order doubles as the first-match-wins evaluation order.
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(&format!(
            "SELECT {RULE_COLUMNS} FROM approval_rules
             WHERE company_id = ? ORDER BY created_at ASC, id ASC"
        ))
        .bind(&company_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_rule).collect::<Result<Vec<_>, _>>()
    }

    async fn save(&self, rule: ApprovalRule) -> Result<(), RepositoryError> {
        let (percentage_threshold, specific_approver_id) = match &rule.condition {
            RuleCondition::Percentage { threshold } => (Some(i64::from(*threshold)), None),
            RuleCondition::SpecificApprover { approver_id } => {
                (None, Some(approver_id.0.clone()))
            }
            RuleCondition::Hybrid { threshold, approver_id } => {
                (Some(i64::from(*threshold)), Some(approver_id.0.clone()))
            }
        };
        let categories_json = if rule.scope.categories.is_empty() {
            None
        } else {
            Some(
                serde_json::to_string(&rule.scope.categories)
                    .map_err(|e| RepositoryError::Decode(e.to_string()))?,
            )
        };

        sqlx::query(
            "INSERT INTO approval_rules (id, company_id, name, rule_type, percentage_threshold,
                                         specific_approver_id, is_active, categories,
                                         amount_threshold, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 rule_type = excluded.rule_type,
                 percentage_threshold = excluded.percentage_threshold,
                 specific_approver_id = excluded.specific_approver_id,
                 is_active = excluded.is_active,
                 categories = excluded.categories,
                 amount_threshold = excluded.amount_threshold",
        )
        .bind(&rule.id.0)
        .bind(&rule.company_id.0)
        .bind(&rule.name)
        .bind(rule_type_as_str(&rule.condition))
        .bind(percentage_threshold)
        .bind(specific_approver_id)
        .bind(i64::from(rule.is_active))
        .bind(categories_json)
        .bind(rule.scope.amount_threshold.map(|value| value.to_string()))
        .bind(rule.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &RuleId, company_id: &CompanyId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM approval_rules WHERE id = ? AND company_id = ?")
            .bind(&id.0)
            .bind(&company_id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
