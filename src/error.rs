use crate::plans::PlanError;

/// The main error type for the dashboard
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl DashboardError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The underlying plan error, if this came from the registry.
    pub fn as_plan_error(&self) -> Option<&PlanError> {
        match self {
            Self::Plan(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this error should block the current view.
    ///
    /// Plan errors are handled inline (the edit form stays open), so only
    /// authorization failures count.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::PlanId;

    #[test]
    fn test_plan_error_conversion() {
        let err: DashboardError = PlanError::NotFound { plan_id: PlanId(3) }.into();
        assert_eq!(err.to_string(), "plan not found: 3");
        assert!(err.as_plan_error().unwrap().is_not_found());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized() {
        let err = DashboardError::unauthorized("login required");
        assert_eq!(err.to_string(), "Unauthorized: login required");
        assert!(err.is_unauthorized());
        assert!(err.as_plan_error().is_none());
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: DashboardError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
