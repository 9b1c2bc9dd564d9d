use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::admin::OverviewStats;
use crate::auth::{AuthProvider, Session, StaticAuthProvider};
use crate::config::{AuthConfig, Config};
use crate::error::{DashboardError, Result};
use crate::navigation::{Navigator, Section};
use crate::plans::{PlanRegistry, default_catalog};

/// One admin's dashboard session
///
/// Owns the login state, the selected section and the plan registry. Plan
/// and stats access is refused until someone has logged in.
pub struct Dashboard {
    auth: Arc<dyn AuthProvider>,
    session: Session,
    navigator: Navigator,
    registry: PlanRegistry,
}

impl Dashboard {
    /// Builder pattern for constructing a Dashboard
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// Build a dashboard from configuration: the placeholder credential
    /// check, and either the built-in catalog or an empty registry.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = if config.catalog.seed {
            default_catalog()?
        } else {
            PlanRegistry::new()
        };

        Ok(Self::builder()
            .with_auth_provider(StaticAuthProvider::from_config(&config.auth))
            .with_registry(registry)
            .build())
    }

    /// Attempt a login. Returns whether it succeeded.
    ///
    /// If this ends the previous user's session (a failed attempt, or a
    /// different user), their open edit is discarded as on logout.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        let previous = self.session.user_email().map(str::to_owned);
        let ok = self.session.login(self.auth.as_ref(), email, password).await?;

        if previous.is_some() && previous.as_deref() != self.session.user_email() {
            self.reset_view();
        }
        Ok(ok)
    }

    /// Log out, discarding any open edit and returning to the overview.
    pub fn logout(&mut self) -> bool {
        self.reset_view();
        self.session.logout()
    }

    fn reset_view(&mut self) {
        if self.registry.cancel_edit() {
            debug!("discarded open edit session");
        }
        self.navigator.reset();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The selected section.
    pub fn section(&self) -> Section {
        self.navigator.current()
    }

    /// Switch sections. Returns the previous one.
    pub fn navigate(&mut self, section: Section) -> Result<Section> {
        self.require_auth()?;
        Ok(self.navigator.select(section))
    }

    /// The plan registry, if logged in.
    pub fn plans(&self) -> Result<&PlanRegistry> {
        self.require_auth()?;
        Ok(&self.registry)
    }

    /// Mutable access to the plan registry, if logged in.
    pub fn plans_mut(&mut self) -> Result<&mut PlanRegistry> {
        self.require_auth()?;
        Ok(&mut self.registry)
    }

    /// Overview statistics, if logged in.
    pub fn stats(&self) -> Result<OverviewStats> {
        self.require_auth()?;
        Ok(OverviewStats::from_registry(&self.registry))
    }

    fn require_auth(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(DashboardError::unauthorized("login required"))
        }
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("session", &self.session)
            .field("navigator", &self.navigator)
            .field("plans", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Builder for Dashboard
#[must_use = "builder does nothing until you call build()"]
pub struct DashboardBuilder {
    auth: Option<Arc<dyn AuthProvider>>,
    registry: PlanRegistry,
    section: Section,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self {
            auth: None,
            registry: PlanRegistry::new(),
            section: Section::default(),
        }
    }

    pub fn with_auth_provider<P>(mut self, provider: P) -> Self
    where
        P: AuthProvider + 'static,
    {
        self.auth = Some(Arc::new(provider));
        self
    }

    pub fn with_shared_auth_provider(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(provider);
        self
    }

    pub fn with_registry(mut self, registry: PlanRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Section shown right after login.
    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    /// Build the dashboard. Without an auth provider, the default
    /// credentials from [`AuthConfig`] are checked with no delay.
    pub fn build(self) -> Dashboard {
        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(auth) => auth,
            None => Arc::new(
                StaticAuthProvider::from_config(&AuthConfig::default()).with_delay(Duration::ZERO),
            ),
        };
        let mut navigator = Navigator::new();
        navigator.select(self.section);

        Dashboard {
            auth,
            session: Session::new(),
            navigator,
            registry: self.registry,
        }
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
