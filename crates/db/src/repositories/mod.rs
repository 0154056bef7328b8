use async_trait::async_trait;
use thiserror::Error;

use expenso_core::domain::approval::{ApprovalRule, ApprovalStep, RuleId};
use expenso_core::domain::company::{Company, CompanyId};
use expenso_core::domain::expense::{Expense, ExpenseId};
use expenso_core::domain::user::{User, UserId};

pub mod company;
pub mod expense;
pub mod memory;
pub mod rule;
pub mod step;
pub mod user;

pub use company::SqlCompanyRepository;
pub use expense::SqlExpenseRepository;
pub use memory::{
    InMemoryApprovalRuleRepository, InMemoryApprovalStepRepository, InMemoryExpenseRepository,
    InMemoryUserRepository, InMemoryWorkflowStore,
};
pub use rule::SqlApprovalRuleRepository;
pub use step::SqlApprovalStepRepository;
pub use user::SqlUserRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError>;
    async fn save(&self, company: Company) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    async fn list_managers(&self, company_id: &CompanyId) -> Result<Vec<User>, RepositoryError>;
    async fn save(&self, user: User) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn find_by_id(&self, id: &ExpenseId) -> Result<Option<Expense>, RepositoryError>;
    async fn save(&self, expense: Expense) -> Result<(), RepositoryError>;
    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<Expense>, RepositoryError>;
    async fn list_for_employee(
        &self,
        employee_id: &UserId,
    ) -> Result<Vec<Expense>, RepositoryError>;

    /// Deletes an expense only while it is still pending and owned by the
    /// given employee. Returns whether a row was removed.
    async fn delete_pending(
        &self,
        id: &ExpenseId,
        employee_id: &UserId,
    ) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait ApprovalStepRepository: Send + Sync {
    async fn list_for_expense(
        &self,
        expense_id: &ExpenseId,
    ) -> Result<Vec<ApprovalStep>, RepositoryError>;
    async fn list_for_approver(
        &self,
        approver_id: &UserId,
    ) -> Result<Vec<ApprovalStep>, RepositoryError>;
    async fn insert_all(&self, steps: &[ApprovalStep]) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ApprovalRuleRepository: Send + Sync {
    async fn find_by_id(&self, id: &RuleId) -> Result<Option<ApprovalRule>, RepositoryError>;
    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<ApprovalRule>, RepositoryError>;
    async fn save(&self, rule: ApprovalRule) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &RuleId, company_id: &CompanyId) -> Result<bool, RepositoryError>;
}
