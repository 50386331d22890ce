//! Load `AppConfig` from environment variables (after `.env`, when present).

use super::types::*;
use crate::error::ConfigError;
use std::path::PathBuf;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = parse_or(get("APP_PORT"), "APP_PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(
            get("DATABASE_MAX_CONNECTIONS"),
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(AppConfig {
            server: ServerConfig {
                host: get("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
                port,
            },
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                max_connections,
                schema: get("DATABASE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into()),
            },
            report: ReportSettings {
                template_path: get("REPORT_TEMPLATE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH)),
                output_dir: get("REPORT_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            },
            alert_prefix: get("APP_ALERT_PREFIX").unwrap_or_else(|| DEFAULT_ALERT_PREFIX.into()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue { key, value: v }),
    }
}
