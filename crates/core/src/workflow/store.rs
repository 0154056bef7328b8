use async_trait::async_trait;
use thiserror::Error;

use crate::domain::approval::{ApprovalRule, ApprovalStep};
use crate::domain::company::CompanyId;
use crate::domain::expense::{Expense, ExpenseId};

/// Opaque persistence failure carried back to the caller unchanged; the
/// engine performs no retries.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("workflow store failure: {0}")]
pub struct StoreError(pub String);

#[derive(Clone, Debug, PartialEq)]
pub struct DecisionOutcome {
    pub expense: Expense,
    pub steps: Vec<ApprovalStep>,
}

/// Durable read/write seam consumed by the workflow engine. No business
/// logic lives behind it.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    async fn expense(&self, id: &ExpenseId) -> Result<Option<Expense>, StoreError>;

    /// Steps of one expense ordered by `order` ascending.
    async fn steps(&self, expense_id: &ExpenseId) -> Result<Vec<ApprovalStep>, StoreError>;

    /// Active rules of the company in creation order — the tie-break order
    /// for first-match-wins evaluation. Must be a single consistent snapshot.
    async fn active_rules(&self, company_id: &CompanyId) -> Result<Vec<ApprovalRule>, StoreError>;

    /// Persists one decided step together with its expense's new status.
    /// Both writes commit atomically or not at all.
    async fn persist_decision(
        &self,
        expense: &Expense,
        step: &ApprovalStep,
    ) -> Result<(), StoreError>;
}
