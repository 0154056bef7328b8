use chrono::Utc;
use rust_decimal::Decimal;

use expenso_core::domain::approval::{ApprovalRule, RuleCondition, RuleId, RuleScope};
use expenso_core::domain::company::{Company, CompanyId};
use expenso_core::domain::expense::{Expense, ExpenseId, ExpenseStatus};
use expenso_core::domain::user::{User, UserId, UserRole};
use expenso_core::workflow::build_workflow;

use crate::repositories::{
    ApprovalRuleRepository, ApprovalStepRepository, CompanyRepository, ExpenseRepository,
    RepositoryError, SqlApprovalRuleRepository, SqlApprovalStepRepository, SqlCompanyRepository,
    SqlExpenseRepository, SqlUserRepository, UserRepository,
};
use crate::DbPool;

pub const DEMO_COMPANY_ID: &str = "demo-company";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedSummary {
    pub company_id: String,
    pub user_count: usize,
    pub rule_count: usize,
    pub expense_count: usize,
    pub already_seeded: bool,
}

/// Loads a deterministic demo dataset: one company, an admin, two managers,
/// one employee reporting to the first manager, a 60% percentage rule and a
/// pending expense with its constructed approval chain. Re-running against
/// an already seeded database is a no-op.
pub async fn seed_demo_company(pool: &DbPool) -> Result<SeedSummary, RepositoryError> {
    let companies = SqlCompanyRepository::new(pool.clone());
    let company_id = CompanyId(DEMO_COMPANY_ID.to_string());

    if companies.find_by_id(&company_id).await?.is_some() {
        return Ok(SeedSummary {
            company_id: DEMO_COMPANY_ID.to_string(),
            user_count: 0,
            rule_count: 0,
            expense_count: 0,
            already_seeded: true,
        });
    }

    let now = Utc::now();
    companies
        .save(Company {
            id: company_id.clone(),
            name: "Demo Corp".to_string(),
            currency: "USD".to_string(),
            country: "US".to_string(),
            created_at: now,
        })
        .await?;

    let users = SqlUserRepository::new(pool.clone());
    let admin = User {
        id: UserId("demo-admin".to_string()),
        company_id: company_id.clone(),
        email: "admin@demo.test".to_string(),
        full_name: "Dana Admin".to_string(),
        role: UserRole::Admin,
        manager_id: None,
        is_manager_approver: false,
        created_at: now,
    };
    let manager_one = User {
        id: UserId("demo-manager-1".to_string()),
        company_id: company_id.clone(),
        email: "manager1@demo.test".to_string(),
        full_name: "Morgan One".to_string(),
        role: UserRole::Manager,
        manager_id: None,
        is_manager_approver: false,
        created_at: now,
    };
    let manager_two = User {
        id: UserId("demo-manager-2".to_string()),
        company_id: company_id.clone(),
        email: "manager2@demo.test".to_string(),
        full_name: "Morgan Two".to_string(),
        role: UserRole::Manager,
        manager_id: None,
        is_manager_approver: false,
        created_at: now,
    };
    let employee = User {
        id: UserId("demo-employee".to_string()),
        company_id: company_id.clone(),
        email: "employee@demo.test".to_string(),
        full_name: "Evan Employee".to_string(),
        role: UserRole::Employee,
        manager_id: Some(manager_one.id.clone()),
        is_manager_approver: true,
        created_at: now,
    };
    for user in [&admin, &manager_one, &manager_two, &employee] {
        users.save(user.clone()).await?;
    }

    let rule = ApprovalRule::new(
        RuleId("demo-rule-majority".to_string()),
        company_id.clone(),
        "Majority approval",
        RuleCondition::Percentage { threshold: 60 },
        RuleScope::default(),
        true,
        now,
    )
    .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    SqlApprovalRuleRepository::new(pool.clone()).save(rule).await?;

    let expense = Expense {
        id: ExpenseId("demo-expense-1".to_string()),
        company_id: company_id.clone(),
        employee_id: employee.id.clone(),
        amount: Decimal::new(18_750, 2),
        currency: "USD".to_string(),
        amount_in_company_currency: Decimal::new(18_750, 2),
        category: "travel".to_string(),
        description: "Customer onboarding visit".to_string(),
        expense_date: now.date_naive(),
        receipt_url: None,
        status: ExpenseStatus::Pending,
        current_approver_step: 1,
        created_at: now,
        updated_at: now,
    };

    let plan = build_workflow(
        &expense.id,
        &employee,
        Some(&manager_one),
        &[manager_one.clone(), manager_two.clone()],
        now,
    );
    let mut expense = expense;
    expense.status = plan.initial_status;

    SqlExpenseRepository::new(pool.clone()).save(expense).await?;
    SqlApprovalStepRepository::new(pool.clone()).insert_all(&plan.steps).await?;

    Ok(SeedSummary {
        company_id: DEMO_COMPANY_ID.to_string(),
        user_count: 4,
        rule_count: 1,
        expense_count: 1,
        already_seeded: false,
    })
}

#[cfg(test)]
mod tests {
    use expenso_core::domain::expense::ExpenseId;

    use crate::repositories::{ApprovalStepRepository, SqlApprovalStepRepository};
    use crate::{connect_with_settings, migrations};

    use super::seed_demo_company;

    #[tokio::test]
    async fn seeding_builds_the_demo_workflow() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        let summary = seed_demo_company(&pool).await.expect("seed");
        assert!(!summary.already_seeded);
        assert_eq!(summary.user_count, 4);

        let steps = SqlApprovalStepRepository::new(pool.clone())
            .list_for_expense(&ExpenseId("demo-expense-1".to_string()))
            .await
            .expect("list steps");
        // Direct manager first, the other manager second.
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].approver_id.0, "demo-manager-1");
        assert_eq!(steps[1].approver_id.0, "demo-manager-2");
    }

    #[tokio::test]
    async fn reseeding_is_a_no_op() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        seed_demo_company(&pool).await.expect("first seed");
        let second = seed_demo_company(&pool).await.expect("second seed");
        assert!(second.already_seeded);
    }
}
