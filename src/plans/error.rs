//! Plan registry errors.

use super::types::PlanId;

/// Errors raised by plan registry operations.
///
/// None of these are fatal. Validation failures keep an open edit session
/// alive so the offending field can be corrected; not-found and index errors
/// leave the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A field value was rejected on create or commit.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The operation targeted a plan id that is not in the registry.
    #[error("plan not found: {plan_id}")]
    NotFound { plan_id: PlanId },

    /// Feature removal index outside the working copy's feature list.
    #[error("feature index {index} out of bounds (plan has {len} features)")]
    FeatureIndex { index: usize, len: usize },
}

impl PlanError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this is a field validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error targets an unknown plan.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The offending field name, for validation errors.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
