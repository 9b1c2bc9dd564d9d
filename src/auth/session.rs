//! Login state for one dashboard session.

use tracing::{info, warn};

use super::provider::{AuthProvider, normalize_email};
use crate::error::Result;

/// Whether the current user is logged in, and as whom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_email: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_email.is_some()
    }

    /// The logged-in user's normalized email.
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    /// Attempt a login through `provider`.
    ///
    /// Returns whether the attempt succeeded. A failed attempt logs out any
    /// previous user.
    pub async fn login<P>(&mut self, provider: &P, email: &str, password: &str) -> Result<bool>
    where
        P: AuthProvider + ?Sized,
    {
        let email = normalize_email(email);
        if provider.attempt_login(&email, password).await? {
            info!(email = %email, "login succeeded");
            self.user_email = Some(email);
            Ok(true)
        } else {
            warn!(email = %email, "login rejected");
            self.user_email = None;
            Ok(false)
        }
    }

    /// Log out. Returns `true` if someone was logged in.
    pub fn logout(&mut self) -> bool {
        match self.user_email.take() {
            Some(email) => {
                info!(email = %email, "logged out");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticAuthProvider;

    #[tokio::test]
    async fn test_login_logout() {
        let provider = StaticAuthProvider::new("admin@example.com", "admin123");
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        assert!(session.login(&provider, "ADMIN@example.com", "admin123").await.unwrap());
        assert!(session.is_authenticated());
        assert_eq!(session.user_email(), Some("admin@example.com"));

        assert!(session.logout());
        assert!(!session.is_authenticated());
        assert!(!session.logout());
    }

    #[tokio::test]
    async fn test_failed_login_clears_session() {
        let provider = StaticAuthProvider::new("admin@example.com", "admin123");
        let mut session = Session::new();
        session.login(&provider, "admin@example.com", "admin123").await.unwrap();

        assert!(!session.login(&provider, "admin@example.com", "nope").await.unwrap());
        assert!(!session.is_authenticated());
    }
}
