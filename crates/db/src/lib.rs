pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;
pub mod workflow_store;

pub use connection::{connect, connect_with_settings, DbPool};
pub use fixtures::{seed_demo_company, SeedSummary, DEMO_COMPANY_ID};
pub use workflow_store::SqlWorkflowStore;
