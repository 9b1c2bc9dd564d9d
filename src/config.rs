use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{DashboardError, Result};
use crate::utils::{get_env_with_prefix, parse_bool};

/// Main configuration for a dashboard session
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json")]
    pub json: bool,
}

/// Settings for the placeholder credential check.
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Artificial delay before a login attempt resolves, in milliseconds.
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
}

/// Settings for the initial plan catalog.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Start with the built-in three-tier catalog instead of an empty registry.
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            login_delay_ms: default_login_delay_ms(),
        }
    }
}

impl AuthConfig {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[redacted]")
            .field("login_delay_ms", &self.login_delay_ms)
            .finish()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    false
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_login_delay_ms() -> u64 {
    1000
}

fn default_seed() -> bool {
    true
}

/// Builder for Config with environment variable support
#[must_use = "builder does nothing until you call build()"]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.config.logging.json = enabled;
        self
    }

    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.auth.admin_email = email.into();
        self.config.auth.admin_password = password.into();
        self
    }

    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.config.auth.login_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_seed_catalog(mut self, seed: bool) -> Self {
        self.config.catalog.seed = seed;
        self
    }

    /// Load configuration from environment variables with PLANDESK_ prefix
    pub fn from_env(mut self) -> Self {
        if let Some(level) = get_env_with_prefix("LOG_LEVEL") {
            self.config.logging.level = level;
        }
        if let Some(json) = get_env_with_prefix("LOG_JSON") {
            self.config.logging.json = parse_bool(&json).unwrap_or(false);
        }
        if let Some(email) = get_env_with_prefix("ADMIN_EMAIL") {
            self.config.auth.admin_email = email;
        }
        if let Some(password) = get_env_with_prefix("ADMIN_PASSWORD") {
            self.config.auth.admin_password = password;
        }
        if let Some(delay) = get_env_with_prefix("LOGIN_DELAY_MS") {
            match delay.parse() {
                Ok(ms) => self.config.auth.login_delay_ms = ms,
                Err(_) => tracing::warn!(value = %delay, "ignoring invalid LOGIN_DELAY_MS"),
            }
        }
        if let Some(seed) = get_env_with_prefix("SEED_CATALOG") {
            self.config.catalog.seed = parse_bool(&seed).unwrap_or(true);
        }
        self
    }

    /// Build the configuration, validating all settings
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration is invalid:
    /// - Invalid log level
    /// - Empty admin email or password
    pub fn build(self) -> Result<Config> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.config.logging.level.to_lowercase().as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.config.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        if self.config.auth.admin_email.trim().is_empty() {
            return Err(DashboardError::config("Admin email cannot be empty"));
        }

        if self.config.auth.admin_password.is_empty() {
            return Err(DashboardError::config("Admin password cannot be empty"));
        }

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
