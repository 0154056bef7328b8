pub mod builder;
pub mod engine;
pub mod store;

pub use builder::{build_workflow, WorkflowPlan};
pub use engine::{Decision, WorkflowEngine};
pub use store::{DecisionOutcome, StoreError, WorkflowStore};
