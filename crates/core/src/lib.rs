pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rules;
pub mod workflow;

pub use audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
pub use domain::approval::{
    ApprovalRule, ApprovalStep, RuleCondition, RuleId, RuleScope, StepId, StepStatus,
};
pub use domain::company::{Company, CompanyId};
pub use domain::expense::{Expense, ExpenseId, ExpenseStatus};
pub use domain::user::{User, UserId, UserRole};
pub use errors::{DomainError, WorkflowError};
pub use rules::{EvaluationError, RuleEvaluator, RuleOutcome};
pub use workflow::{
    build_workflow, Decision, DecisionOutcome, StoreError, WorkflowEngine, WorkflowPlan,
    WorkflowStore,
};
