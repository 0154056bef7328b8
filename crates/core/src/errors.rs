use thiserror::Error;

use crate::domain::expense::ExpenseStatus;
use crate::workflow::store::StoreError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid expense transition from {from:?} to {to:?}")]
    InvalidExpenseTransition { from: ExpenseStatus, to: ExpenseStatus },
    #[error("approval rule validation failed: {0}")]
    RuleValidation(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Failure taxonomy of the decision path. Kinds stay distinguishable so the
/// HTTP layer can map them to status codes without matching message text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("no pending approval step for approver `{approver_id}` on expense `{expense_id}`")]
    StepNotFound { expense_id: String, approver_id: String },
    #[error("invalid workflow state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl From<DomainError> for WorkflowError {
    fn from(value: DomainError) -> Self {
        Self::InvalidState(value.to_string())
    }
}
