use std::collections::HashMap;

use tokio::sync::RwLock;

use expenso_core::domain::approval::{ApprovalRule, ApprovalStep, RuleId};
use expenso_core::domain::company::CompanyId;
use expenso_core::domain::expense::{Expense, ExpenseId, ExpenseStatus};
use expenso_core::domain::user::{User, UserId};
use expenso_core::workflow::store::{StoreError, WorkflowStore};

use super::{
    ApprovalRuleRepository, ApprovalStepRepository, ExpenseRepository, RepositoryError,
    UserRepository,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(&id.0).cloned())
    }

    async fn list_managers(&self, company_id: &CompanyId) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.read().await;
        let mut managers: Vec<User> = users
            .values()
            .filter(|user| user.company_id == *company_id && user.is_manager())
            .cloned()
            .collect();
        managers.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(managers)
    }

    async fn save(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        users.insert(user.id.0.clone(), user);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryExpenseRepository {
    expenses: RwLock<HashMap<String, Expense>>,
}

#[async_trait::async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn find_by_id(&self, id: &ExpenseId) -> Result<Option<Expense>, RepositoryError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.get(&id.0).cloned())
    }

    async fn save(&self, expense: Expense) -> Result<(), RepositoryError> {
        let mut expenses = self.expenses.write().await;
        expenses.insert(expense.id.0.clone(), expense);
        Ok(())
    }

    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|expense| expense.company_id == *company_id)
            .cloned()
            .collect();
        matching.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(matching)
    }

    async fn list_for_employee(
        &self,
        employee_id: &UserId,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|expense| expense.employee_id == *employee_id)
            .cloned()
            .collect();
        matching.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(matching)
    }

    async fn delete_pending(
        &self,
        id: &ExpenseId,
        employee_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let mut expenses = self.expenses.write().await;
        let removable = expenses
            .get(&id.0)
            .map(|expense| {
                expense.employee_id == *employee_id && expense.status == ExpenseStatus::Pending
            })
            .unwrap_or(false);
        if removable {
            expenses.remove(&id.0);
        }
        Ok(removable)
    }
}

#[derive(Default)]
pub struct InMemoryApprovalStepRepository {
    steps: RwLock<Vec<ApprovalStep>>,
}

#[async_trait::async_trait]
impl ApprovalStepRepository for InMemoryApprovalStepRepository {
    async fn list_for_expense(
        &self,
        expense_id: &ExpenseId,
    ) -> Result<Vec<ApprovalStep>, RepositoryError> {
        let steps = self.steps.read().await;
        let mut matching: Vec<ApprovalStep> =
            steps.iter().filter(|step| step.expense_id == *expense_id).cloned().collect();
        matching.sort_by_key(|step| step.order);
        Ok(matching)
    }

    async fn list_for_approver(
        &self,
        approver_id: &UserId,
    ) -> Result<Vec<ApprovalStep>, RepositoryError> {
        let steps = self.steps.read().await;
        let mut matching: Vec<ApprovalStep> =
            steps.iter().filter(|step| step.approver_id == *approver_id).cloned().collect();
        matching.sort_by(|left, right| {
            left.expense_id.0.cmp(&right.expense_id.0).then(left.order.cmp(&right.order))
        });
        Ok(matching)
    }

    async fn insert_all(&self, new_steps: &[ApprovalStep]) -> Result<(), RepositoryError> {
        let mut steps = self.steps.write().await;
        for step in new_steps {
            let duplicate = steps.iter().any(|existing| {
                existing.expense_id == step.expense_id && existing.approver_id == step.approver_id
            });
            if duplicate {
                return Err(RepositoryError::Decode(format!(
                    "duplicate step for approver `{}` on expense `{}`",
                    step.approver_id.0, step.expense_id.0
                )));
            }
            steps.push(step.clone());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryApprovalRuleRepository {
    rules: RwLock<HashMap<String, ApprovalRule>>,
}

#[async_trait::async_trait]
impl ApprovalRuleRepository for InMemoryApprovalRuleRepository {
    async fn find_by_id(&self, id: &RuleId) -> Result<Option<ApprovalRule>, RepositoryError> {
        let rules = self.rules.read().await;
        Ok(rules.get(&id.0).cloned())
    }

    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<ApprovalRule>, RepositoryError> {
        let rules = self.rules.read().await;
        let mut matching: Vec<ApprovalRule> =
            rules.values().filter(|rule| rule.company_id == *company_id).cloned().collect();
        matching.sort_by(|left, right| {
            left.created_at.cmp(&right.created_at).then_with(|| left.id.0.cmp(&right.id.0))
        });
        Ok(matching)
    }

    async fn save(&self, rule: ApprovalRule) -> Result<(), RepositoryError> {
        let mut rules = self.rules.write().await;
        rules.insert(rule.id.0.clone(), rule);
        Ok(())
    }

    async fn delete(&self, id: &RuleId, company_id: &CompanyId) -> Result<bool, RepositoryError> {
        let mut rules = self.rules.write().await;
        let matches = rules
            .get(&id.0)
            .map(|rule| rule.company_id == *company_id)
            .unwrap_or(false);
        if matches {
            rules.remove(&id.0);
        }
        Ok(matches)
    }
}

/// Database-free [`WorkflowStore`] with the same pending-only write guard as
/// the SQL implementation.
#[derive(Default)]
pub struct InMemoryWorkflowStore {
    state: RwLock<WorkflowState>,
}

#[derive(Default)]
struct WorkflowState {
    expenses: HashMap<String, Expense>,
    steps: Vec<ApprovalStep>,
    rules: Vec<ApprovalRule>,
}

impl InMemoryWorkflowStore {
    pub async fn put_expense(&self, expense: Expense) {
        let mut state = self.state.write().await;
        state.expenses.insert(expense.id.0.clone(), expense);
    }

    pub async fn put_steps(&self, steps: Vec<ApprovalStep>) {
        let mut state = self.state.write().await;
        state.steps.extend(steps);
    }

    pub async fn put_rule(&self, rule: ApprovalRule) {
        let mut state = self.state.write().await;
        state.rules.push(rule);
    }
}

#[async_trait::async_trait]
impl WorkflowStore for InMemoryWorkflowStore {
    async fn expense(&self, id: &ExpenseId) -> Result<Option<Expense>, StoreError> {
        let state = self.state.read().await;
        Ok(state.expenses.get(&id.0).cloned())
    }

    async fn steps(&self, expense_id: &ExpenseId) -> Result<Vec<ApprovalStep>, StoreError> {
        let state = self.state.read().await;
        let mut matching: Vec<ApprovalStep> = state
            .steps
            .iter()
            .filter(|step| step.expense_id == *expense_id)
            .cloned()
            .collect();
        matching.sort_by_key(|step| step.order);
        Ok(matching)
    }

    async fn active_rules(&self, company_id: &CompanyId) -> Result<Vec<ApprovalRule>, StoreError> {
        let state = self.state.read().await;
        let mut matching: Vec<ApprovalRule> = state
            .rules
            .iter()
            .filter(|rule| rule.company_id == *company_id && rule.is_active)
            .cloned()
            .collect();
        matching.sort_by(|left, right| {
            left.created_at.cmp(&right.created_at).then_with(|| left.id.0.cmp(&right.id.0))
        });
        Ok(matching)
    }

    async fn persist_decision(
        &self,
        expense: &Expense,
        step: &ApprovalStep,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        let slot = state
            .steps
            .iter_mut()
            .find(|existing| existing.id == step.id && existing.is_pending())
            .ok_or_else(|| {
                StoreError(format!(
                    "approval step `{}` was concurrently decided or removed",
                    step.id.0
                ))
            })?;
        *slot = step.clone();

        state.expenses.insert(expense.id.0.clone(), expense.clone());
        Ok(())
    }
}
