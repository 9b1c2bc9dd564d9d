use crate::config::AuthConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Trait for authentication providers
///
/// The dashboard only needs a yes/no answer for an email and password.
/// Implement this trait to delegate to a real identity service.
///
/// # Example
///
/// ```rust,ignore
/// use plandesk::auth::AuthProvider;
///
/// struct RemoteAuth { client: MyIdentityClient }
///
/// #[async_trait]
/// impl AuthProvider for RemoteAuth {
///     async fn attempt_login(&self, email: &str, password: &str) -> Result<bool> {
///         Ok(self.client.verify(email, password).await?)
///     }
/// }
/// ```
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Check a login attempt. `Ok(false)` means the credentials were rejected.
    async fn attempt_login(&self, email: &str, password: &str) -> Result<bool>;
}

/// Placeholder provider that compares against one configured credential pair.
///
/// The comparison runs after an artificial delay. There is no lockout, retry
/// or backoff; swap in a real [`AuthProvider`] for anything beyond local use.
#[derive(Clone)]
pub struct StaticAuthProvider {
    email: String,
    password: String,
    delay: Duration,
}

impl StaticAuthProvider {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: normalize_email(&email.into()),
            password: password.into(),
            delay: Duration::ZERO,
        }
    }

    /// Build a provider from the auth section of the config.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.admin_email, &config.admin_password).with_delay(config.login_delay())
    }

    /// Set the artificial delay before an attempt resolves.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn attempt_login(&self, email: &str, password: &str) -> Result<bool> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(normalize_email(email) == self.email && password == self.password)
    }
}

impl std::fmt::Debug for StaticAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAuthProvider")
            .field("email", &self.email)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// Trim and lowercase an email address for comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
