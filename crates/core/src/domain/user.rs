use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::company::CompanyId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub company_id: CompanyId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub manager_id: Option<UserId>,
    /// When false the direct manager is skipped and only the company-wide
    /// manager roster approves.
    pub is_manager_approver: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_manager(&self) -> bool {
        self.role == UserRole::Manager
    }
}
