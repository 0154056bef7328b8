use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::approval::{ApprovalStep, StepId, StepStatus};
use crate::domain::expense::{ExpenseId, ExpenseStatus};
use crate::domain::user::User;

/// Result of constructing an approval chain at expense creation time.
/// `initial_status` is `Approved` when nobody is required to approve —
/// an expense without approvers must not sit pending forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowPlan {
    pub steps: Vec<ApprovalStep>,
    pub initial_status: ExpenseStatus,
}

/// Builds the ordered approval chain for a freshly submitted expense.
///
/// The direct manager (when the employee opts into manager approval) takes
/// step 1; every other manager in the roster follows, sorted by user id so
/// the chain is deterministic regardless of roster iteration order. The
/// submitting employee never approves their own expense.
pub fn build_workflow(
    expense_id: &ExpenseId,
    employee: &User,
    direct_manager: Option<&User>,
    managers: &[User],
    now: DateTime<Utc>,
) -> WorkflowPlan {
    let mut steps = Vec::new();
    let mut order: u32 = 1;

    let direct_manager = match (&employee.manager_id, direct_manager) {
        (Some(manager_id), Some(manager)) if employee.is_manager_approver => {
            debug_assert_eq!(manager.id, *manager_id);
            Some(manager)
        }
        _ => None,
    };

    if let Some(manager) = direct_manager {
        steps.push(step(expense_id, employee, manager, order, now));
        order += 1;
    }

    let mut remaining: Vec<&User> = managers
        .iter()
        .filter(|candidate| candidate.is_manager())
        .filter(|candidate| candidate.id != employee.id)
        .filter(|candidate| direct_manager.map(|m| m.id != candidate.id).unwrap_or(true))
        .collect();
    remaining.sort_by(|left, right| left.id.cmp(&right.id));

    for manager in remaining {
        steps.push(step(expense_id, employee, manager, order, now));
        order += 1;
    }

    let initial_status =
        if steps.is_empty() { ExpenseStatus::Approved } else { ExpenseStatus::Pending };

    WorkflowPlan { steps, initial_status }
}

fn step(
    expense_id: &ExpenseId,
    employee: &User,
    approver: &User,
    order: u32,
    now: DateTime<Utc>,
) -> ApprovalStep {
    ApprovalStep {
        id: StepId(Uuid::new_v4().to_string()),
        company_id: employee.company_id.clone(),
        expense_id: expense_id.clone(),
        approver_id: approver.id.clone(),
        order,
        status: StepStatus::Pending,
        comment: None,
        decided_at: None,
        created_at: now,
    }
}
