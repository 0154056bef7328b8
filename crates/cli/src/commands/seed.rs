use crate::commands::CommandResult;
use expenso_core::config::{AppConfig, LoadOptions};
use expenso_db::{connect_with_settings, migrations, seed_demo_company};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;
        let summary = seed_demo_company(&pool)
            .await
            .map_err(|error| ("fixture", error.to_string(), 6u8))?;
        pool.close().await;
        Ok::<_, (&'static str, String, u8)>(summary)
    });

    match result {
        Ok(summary) if summary.already_seeded => CommandResult::success(
            "seed",
            format!("demo company `{}` already present, nothing to do", summary.company_id),
        ),
        Ok(summary) => CommandResult::success(
            "seed",
            format!(
                "seeded demo company `{}` with {} users, {} rules, {} expenses",
                summary.company_id, summary.user_count, summary.rule_count, summary.expense_count
            ),
        ),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}
