use thiserror::Error;

use crate::domain::approval::{ApprovalRule, ApprovalStep, RuleCondition, StepStatus};
use crate::domain::user::UserId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleOutcome {
    Approved,
    Rejected,
    Pending,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("cannot evaluate approval rules over an empty step list")]
    NoSteps,
}

/// Shared rule evaluation over one expense's steps. Callers pass the
/// company's rules in creation order, already filtered to the expense's
/// scope; inactive rules are skipped here as well so a stale list cannot
/// resurrect a disabled rule.
pub struct RuleEvaluator;

impl RuleEvaluator {
    pub fn evaluate(
        rules: &[ApprovalRule],
        steps: &[ApprovalStep],
    ) -> Result<RuleOutcome, EvaluationError> {
        if steps.is_empty() {
            return Err(EvaluationError::NoSteps);
        }

        // A single rejection is terminal regardless of any configured rule.
        if steps.iter().any(|step| step.status == StepStatus::Rejected) {
            return Ok(RuleOutcome::Rejected);
        }

        let active: Vec<&ApprovalRule> = rules.iter().filter(|rule| rule.is_active).collect();

        if active.is_empty() {
            // Unanimous fallback: everyone assigned must approve.
            let all_approved = steps.iter().all(|step| step.status == StepStatus::Approved);
            return Ok(if all_approved { RuleOutcome::Approved } else { RuleOutcome::Pending });
        }

        // First satisfied rule in configured order wins.
        for rule in active {
            let satisfied = match &rule.condition {
                RuleCondition::Percentage { threshold } => percentage_met(*threshold, steps),
                RuleCondition::SpecificApprover { approver_id } => {
                    specific_approver_met(approver_id, steps)
                }
                RuleCondition::Hybrid { threshold, approver_id } => {
                    specific_approver_met(approver_id, steps) || percentage_met(*threshold, steps)
                }
            };

            if satisfied {
                return Ok(RuleOutcome::Approved);
            }
        }

        Ok(RuleOutcome::Pending)
    }
}

/// Inclusive threshold, in integer arithmetic so no float division is
/// involved: `approved/total*100 >= t`.
fn percentage_met(threshold: u8, steps: &[ApprovalStep]) -> bool {
    let approved = steps.iter().filter(|step| step.status == StepStatus::Approved).count();
    approved * 100 >= usize::from(threshold) * steps.len()
}

fn specific_approver_met(approver_id: &UserId, steps: &[ApprovalStep]) -> bool {
    steps
        .iter()
        .any(|step| step.approver_id == *approver_id && step.status == StepStatus::Approved)
}
