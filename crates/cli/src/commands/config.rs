use expenso_core::config::{AppConfig, LoadOptions, LogFormat};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct EffectiveConfig {
    database: DatabaseSection,
    server: ServerSection,
    logging: LoggingSection,
}

#[derive(Debug, Serialize)]
struct DatabaseSection {
    url: String,
    max_connections: u32,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct ServerSection {
    bind_address: String,
    port: u16,
    graceful_shutdown_secs: u64,
}

#[derive(Debug, Serialize)]
struct LoggingSection {
    level: String,
    format: &'static str,
}

/// Renders the effective configuration after defaults, file, and
/// environment overrides have been applied, in config-file TOML shape.
pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("configuration failed to load: {error}"),
    };

    let effective = EffectiveConfig {
        database: DatabaseSection {
            url: config.database.url,
            max_connections: config.database.max_connections,
            timeout_secs: config.database.timeout_secs,
        },
        server: ServerSection {
            bind_address: config.server.bind_address,
            port: config.server.port,
            graceful_shutdown_secs: config.server.graceful_shutdown_secs,
        },
        logging: LoggingSection {
            level: config.logging.level,
            format: match config.logging.format {
                LogFormat::Compact => "compact",
                LogFormat::Pretty => "pretty",
                LogFormat::Json => "json",
            },
        },
    };

    toml::to_string_pretty(&effective)
        .unwrap_or_else(|error| format!("failed to render configuration: {error}"))
}
