//! Plandesk - the core of a subscription-plan admin dashboard
//!
//! Everything lives in memory for one session: a login gate, sidebar
//! navigation, overview statistics, and an editor for the list of
//! subscription plans.
//!
//! # Features
//!
//! - **Plans**: ordered plan registry with create, toggle, delete and a single edit session
//! - **Validation**: field-level errors that keep the edit form open
//! - **Overview**: subscriber and revenue statistics derived from the registry
//! - **Auth**: pluggable login provider with a placeholder credential check
//! - **Testing**: plan builders and fake data
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use plandesk::{ConfigBuilder, Dashboard};
//! use plandesk::plans::PlanId;
//!
//! #[tokio::main]
//! async fn main() -> plandesk::Result<()> {
//!     plandesk::init_tracing();
//!
//!     let config = ConfigBuilder::new().from_env().build()?;
//!     let mut dashboard = Dashboard::from_config(&config)?;
//!
//!     if dashboard.login("admin@example.com", "admin123").await? {
//!         let plans = dashboard.plans_mut()?;
//!         plans.toggle_active(PlanId(1))?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod auth;
mod config;
pub mod confirm;
mod dashboard;
mod error;
pub mod navigation;
pub mod plans;
pub mod testing;
pub mod utils;

// Re-exports for public API
pub use config::{AuthConfig, CatalogConfig, Config, ConfigBuilder, LoggingConfig};
pub use dashboard::{Dashboard, DashboardBuilder};
pub use error::{DashboardError, Result};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging with sensible defaults
///
/// This should be called early in your application, typically in main()
/// before creating the Dashboard.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "plandesk=debug")
/// - `PLANDESK_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = utils::get_env_with_prefix("LOG_JSON")
        .and_then(|v| utils::parse_bool(&v))
        .unwrap_or(false);

    install(env_filter, json_logs);
}

/// Initialize tracing with a custom configuration
///
/// `RUST_LOG` still wins over the configured level when it is set.
pub fn init_tracing_with_config(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    install(env_filter, config.logging.json);
}

fn install(env_filter: EnvFilter, json: bool) {
    // try_init: a second call (or a test harness subscriber) is not an error
    let result = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
