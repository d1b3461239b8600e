use std::env;
use std::fmt;

use crate::workflows::appraisal::CatalogConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the appraisal core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let recompute_points_on_delete = match env::var("APPRAISAL_RECOMPUTE_ON_DELETE") {
            Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidRecomputeFlag { value })?,
            Err(_) => false,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            catalog: CatalogConfig {
                recompute_points_on_delete,
            },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRecomputeFlag { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRecomputeFlag { value } => {
                write!(
                    f,
                    "APPRAISAL_RECOMPUTE_ON_DELETE must be a boolean flag, got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(Mutex::default)
            .lock()
            .expect("env lock not poisoned")
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let _guard = env_lock();
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APPRAISAL_RECOMPUTE_ON_DELETE");

        let config = AppConfig::load().expect("defaults load");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.catalog.recompute_points_on_delete);
    }

    #[test]
    fn recompute_flag_parses_common_booleans() {
        let _guard = env_lock();
        env::set_var("APPRAISAL_RECOMPUTE_ON_DELETE", "true");
        let config = AppConfig::load().expect("flag loads");
        assert!(config.catalog.recompute_points_on_delete);

        env::set_var("APPRAISAL_RECOMPUTE_ON_DELETE", "definitely");
        let error = AppConfig::load().expect_err("junk flag rejected");
        assert!(matches!(error, ConfigError::InvalidRecomputeFlag { .. }));
        env::remove_var("APPRAISAL_RECOMPUTE_ON_DELETE");
    }

    #[test]
    fn environment_labels_map_to_stages() {
        assert_eq!(AppEnvironment::from_str("PROD"), AppEnvironment::Production);
        assert_eq!(AppEnvironment::from_str("ci"), AppEnvironment::Test);
        assert_eq!(
            AppEnvironment::from_str("anything else"),
            AppEnvironment::Development
        );
    }
}
