use anyhow::{Context, Result};

use expenso_core::config::AppConfig;
use expenso_db::{connect_with_settings, migrations, DbPool};

pub struct App {
    pub config: AppConfig,
    pub db_pool: DbPool,
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<App> {
    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .with_context(|| format!("failed to connect to database at `{}`", config.database.url))?;

    migrations::run_pending(&db_pool).await.context("failed to apply pending migrations")?;

    tracing::info!(
        event_name = "system.db.ready",
        correlation_id = "bootstrap",
        database_url = %config.database.url,
        "database connected and migrated"
    );

    Ok(App { config, db_pool })
}
