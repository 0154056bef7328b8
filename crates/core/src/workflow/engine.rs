use chrono::Utc;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::approval::ApprovalStep;
use crate::domain::expense::{ExpenseId, ExpenseStatus};
use crate::domain::user::UserId;
use crate::errors::WorkflowError;
use crate::rules::{RuleEvaluator, RuleOutcome};
use crate::workflow::store::{DecisionOutcome, WorkflowStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// Orchestrates a single approver decision: mutates the matching step,
/// re-evaluates the company's rules and persists the resulting expense
/// status through the [`WorkflowStore`] seam in one atomic write.
pub struct WorkflowEngine<S> {
    store: S,
}

impl<S> WorkflowEngine<S>
where
    S: WorkflowStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn record_decision(
        &self,
        expense_id: &ExpenseId,
        approver_id: &UserId,
        decision: Decision,
        comment: Option<String>,
    ) -> Result<DecisionOutcome, WorkflowError> {
        let mut expense =
            self.store.expense(expense_id).await?.ok_or_else(|| WorkflowError::StepNotFound {
                expense_id: expense_id.0.clone(),
                approver_id: approver_id.0.clone(),
            })?;

        if expense.status.is_terminal() {
            return Err(WorkflowError::InvalidState(format!(
                "expense `{}` is already {:?} and accepts no further decisions",
                expense.id.0, expense.status
            )));
        }

        let mut steps = self.store.steps(expense_id).await?;
        let position = steps
            .iter()
            .position(|step| step.approver_id == *approver_id && step.is_pending())
            .ok_or_else(|| WorkflowError::StepNotFound {
                expense_id: expense_id.0.clone(),
                approver_id: approver_id.0.clone(),
            })?;

        let now = Utc::now();
        match decision {
            Decision::Reject => {
                // Rejection always wins; no rule evaluation needed.
                steps[position].reject(comment, now);
                expense.transition_to(ExpenseStatus::Rejected)?;
            }
            Decision::Approve => {
                steps[position].approve(comment, now);

                let rules = self.store.active_rules(&expense.company_id).await?;
                let applicable: Vec<_> =
                    rules.into_iter().filter(|rule| rule.applies_to(&expense)).collect();

                let outcome = RuleEvaluator::evaluate(&applicable, &steps)
                    .map_err(|error| WorkflowError::InvalidState(error.to_string()))?;

                match outcome {
                    RuleOutcome::Approved => expense.transition_to(ExpenseStatus::Approved)?,
                    RuleOutcome::Rejected => expense.transition_to(ExpenseStatus::Rejected)?,
                    RuleOutcome::Pending => {
                        expense.current_approver_step = next_actionable_order(&steps);
                    }
                }
            }
        }
        expense.updated_at = now;

        self.store.persist_decision(&expense, &steps[position]).await?;

        Ok(DecisionOutcome { expense, steps })
    }

    pub async fn record_decision_with_audit<A>(
        &self,
        expense_id: &ExpenseId,
        approver_id: &UserId,
        decision: Decision,
        comment: Option<String>,
        sink: &A,
        audit: &AuditContext,
    ) -> Result<DecisionOutcome, WorkflowError>
    where
        A: AuditSink,
    {
        let result = self.record_decision(expense_id, approver_id, decision, comment).await;
        match &result {
            Ok(outcome) => {
                sink.emit(
                    AuditEvent::new(
                        Some(expense_id.clone()),
                        audit.correlation_id.clone(),
                        "workflow.decision_recorded",
                        AuditCategory::Workflow,
                        audit.actor.clone(),
                        AuditOutcome::Success,
                    )
                    .with_metadata("decision", format!("{decision:?}"))
                    .with_metadata("approver_id", approver_id.0.clone())
                    .with_metadata("expense_status", format!("{:?}", outcome.expense.status)),
                );
            }
            Err(error) => {
                sink.emit(
                    AuditEvent::new(
                        Some(expense_id.clone()),
                        audit.correlation_id.clone(),
                        "workflow.decision_rejected",
                        AuditCategory::Workflow,
                        audit.actor.clone(),
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("decision", format!("{decision:?}"))
                    .with_metadata("approver_id", approver_id.0.clone())
                    .with_metadata("error", error.to_string()),
                );
            }
        }
        result
    }
}

/// Lowest-order pending step, or one past the last order when every step is
/// settled.
fn next_actionable_order(steps: &[ApprovalStep]) -> u32 {
    steps
        .iter()
        .filter(|step| step.is_pending())
        .map(|step| step.order)
        .min()
        .unwrap_or_else(|| steps.iter().map(|step| step.order).max().unwrap_or(0) + 1)
}
