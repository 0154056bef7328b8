use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::company::CompanyId;
use crate::domain::expense::{Expense, ExpenseId};
use crate::domain::user::UserId;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Approved,
    Rejected,
}

/// One approver's pending or settled obligation within an expense's chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStep {
    pub id: StepId,
    pub company_id: CompanyId,
    pub expense_id: ExpenseId,
    pub approver_id: UserId,
    pub order: u32,
    pub status: StepStatus,
    pub comment: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ApprovalStep {
    pub fn is_pending(&self) -> bool {
        self.status == StepStatus::Pending
    }

    pub fn approve(&mut self, comment: Option<String>, decided_at: DateTime<Utc>) {
        self.status = StepStatus::Approved;
        self.comment = comment;
        self.decided_at = Some(decided_at);
    }

    pub fn reject(&mut self, comment: Option<String>, decided_at: DateTime<Utc>) {
        self.status = StepStatus::Rejected;
        self.comment = comment;
        self.decided_at = Some(decided_at);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

/// How aggregate step outcomes translate into expense approval. Required
/// fields per variant are enforced by [`ApprovalRule::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCondition {
    Percentage { threshold: u8 },
    SpecificApprover { approver_id: UserId },
    Hybrid { threshold: u8, approver_id: UserId },
}

impl RuleCondition {
    fn validate(&self) -> Result<(), DomainError> {
        let threshold = match self {
            Self::Percentage { threshold } | Self::Hybrid { threshold, .. } => *threshold,
            Self::SpecificApprover { .. } => return Ok(()),
        };

        if threshold == 0 || threshold > 100 {
            return Err(DomainError::RuleValidation(format!(
                "percentage threshold must be in 1..=100, got {threshold}"
            )));
        }

        Ok(())
    }
}

/// Restricts a rule to a subset of expenses. An empty category list and an
/// absent amount threshold mean the rule applies to every expense.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleScope {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub amount_threshold: Option<Decimal>,
}

impl RuleScope {
    pub fn applies_to(&self, category: &str, amount_in_company_currency: Decimal) -> bool {
        if !self.categories.is_empty()
            && !self.categories.iter().any(|candidate| candidate.eq_ignore_ascii_case(category))
        {
            return false;
        }

        match self.amount_threshold {
            Some(threshold) => amount_in_company_currency >= threshold,
            None => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRule {
    pub id: RuleId,
    pub company_id: CompanyId,
    pub name: String,
    pub condition: RuleCondition,
    pub scope: RuleScope,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ApprovalRule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RuleId,
        company_id: CompanyId,
        name: impl Into<String>,
        condition: RuleCondition,
        scope: RuleScope,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        condition.validate()?;

        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::RuleValidation("rule name must not be empty".to_string()));
        }

        Ok(Self { id, company_id, name, condition, scope, is_active, created_at })
    }

    pub fn applies_to(&self, expense: &Expense) -> bool {
        self.scope.applies_to(&expense.category, expense.amount_in_company_currency)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::company::CompanyId;
    use crate::domain::user::UserId;
    use crate::errors::DomainError;

    use super::{ApprovalRule, RuleCondition, RuleId, RuleScope};

    fn rule(condition: RuleCondition, scope: RuleScope) -> Result<ApprovalRule, DomainError> {
        ApprovalRule::new(
            RuleId("R-1".to_string()),
            CompanyId("C-1".to_string()),
            "CFO fast path",
            condition,
            scope,
            true,
            Utc::now(),
        )
    }

    #[test]
    fn percentage_threshold_must_be_within_bounds() {
        assert!(rule(RuleCondition::Percentage { threshold: 60 }, RuleScope::default()).is_ok());

        let zero = rule(RuleCondition::Percentage { threshold: 0 }, RuleScope::default());
        assert!(matches!(zero, Err(DomainError::RuleValidation(_))));

        let over = rule(
            RuleCondition::Hybrid {
                threshold: 101,
                approver_id: UserId("u-cfo".to_string()),
            },
            RuleScope::default(),
        );
        assert!(matches!(over, Err(DomainError::RuleValidation(_))));
    }

    #[test]
    fn blank_rule_names_are_rejected() {
        let result = ApprovalRule::new(
            RuleId("R-2".to_string()),
            CompanyId("C-1".to_string()),
            "   ",
            RuleCondition::SpecificApprover { approver_id: UserId("u-cfo".to_string()) },
            RuleScope::default(),
            true,
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::RuleValidation(_))));
    }

    #[test]
    fn scope_matches_category_case_insensitively() {
        let scope = RuleScope {
            categories: vec!["Travel".to_string()],
            amount_threshold: None,
        };

        assert!(scope.applies_to("travel", Decimal::new(1_000, 2)));
        assert!(!scope.applies_to("meals", Decimal::new(1_000, 2)));
    }

    #[test]
    fn scope_amount_threshold_is_inclusive() {
        let scope = RuleScope {
            categories: Vec::new(),
            amount_threshold: Some(Decimal::new(50_000, 2)),
        };

        assert!(scope.applies_to("travel", Decimal::new(50_000, 2)));
        assert!(scope.applies_to("travel", Decimal::new(50_001, 2)));
        assert!(!scope.applies_to("travel", Decimal::new(49_999, 2)));
    }

    #[test]
    fn empty_scope_applies_to_everything() {
        let scope = RuleScope::default();
        assert!(scope.applies_to("anything", Decimal::ZERO));
    }
}
