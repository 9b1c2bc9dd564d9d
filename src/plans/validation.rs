//! Field validation for plan drafts.
//!
//! The same rules apply when a plan is created and when an edit session is
//! committed.

use super::error::PlanError;
use super::types::PlanDraft;

/// Maximum length for plan name.
pub const MAX_PLAN_NAME_LENGTH: usize = 128;

/// Maximum length for plan description.
pub const MAX_PLAN_DESCRIPTION_LENGTH: usize = 1024;

/// Maximum length for a single feature line.
pub const MAX_FEATURE_LENGTH: usize = 256;

/// Maximum number of features on one plan.
pub const MAX_FEATURES: usize = 50;

/// Validate a complete draft.
///
/// Checks, in order:
/// - name is not blank and fits [`MAX_PLAN_NAME_LENGTH`]
/// - description fits [`MAX_PLAN_DESCRIPTION_LENGTH`]
/// - monthly and yearly prices are non-negative
/// - features are non-blank, fit [`MAX_FEATURE_LENGTH`], and number at most [`MAX_FEATURES`]
///
/// # Errors
///
/// Returns `PlanError::Validation` naming the first offending field.
pub fn validate_draft(draft: &PlanDraft) -> Result<(), PlanError> {
    validate_name(&draft.name)?;

    if draft.description.chars().count() > MAX_PLAN_DESCRIPTION_LENGTH {
        return Err(PlanError::validation(
            "description",
            format!("exceeds maximum length of {}", MAX_PLAN_DESCRIPTION_LENGTH),
        ));
    }

    validate_price("monthly_price", draft.monthly_price_cents)?;
    validate_price("yearly_price", draft.yearly_price_cents)?;

    if draft.features.len() > MAX_FEATURES {
        return Err(PlanError::validation(
            "features",
            format!("at most {} features are allowed", MAX_FEATURES),
        ));
    }
    for feature in &draft.features {
        validate_feature(feature)?;
    }

    Ok(())
}

/// Validate a plan name.
pub fn validate_name(name: &str) -> Result<(), PlanError> {
    if name.trim().is_empty() {
        return Err(PlanError::validation("name", "cannot be empty"));
    }
    if name.chars().count() > MAX_PLAN_NAME_LENGTH {
        return Err(PlanError::validation(
            "name",
            format!("exceeds maximum length of {}", MAX_PLAN_NAME_LENGTH),
        ));
    }
    Ok(())
}

/// Validate a single feature line.
pub fn validate_feature(feature: &str) -> Result<(), PlanError> {
    if feature.trim().is_empty() {
        return Err(PlanError::validation("features", "feature text cannot be empty"));
    }
    if feature.chars().count() > MAX_FEATURE_LENGTH {
        return Err(PlanError::validation(
            "features",
            format!("feature exceeds maximum length of {}", MAX_FEATURE_LENGTH),
        ));
    }
    Ok(())
}

fn validate_price(field: &'static str, cents: i64) -> Result<(), PlanError> {
    if cents < 0 {
        return Err(PlanError::validation(field, "cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> PlanDraft {
        PlanDraft::new("Starter")
            .monthly_price(999)
            .yearly_price(9990)
            .features(["Email support"])
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_draft(&valid_draft()).is_ok());
        // Free plans are fine
        assert!(validate_draft(&PlanDraft::new("Free")).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = validate_draft(&PlanDraft::new("")).unwrap_err();
        assert_eq!(err.field(), Some("name"));

        let err = validate_draft(&PlanDraft::new("   ")).unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_name_too_long() {
        let draft = PlanDraft::new("x".repeat(MAX_PLAN_NAME_LENGTH + 1));
        assert_eq!(validate_draft(&draft).unwrap_err().field(), Some("name"));

        let draft = PlanDraft::new("x".repeat(MAX_PLAN_NAME_LENGTH));
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_negative_prices_rejected() {
        let draft = valid_draft().monthly_price(-500);
        assert_eq!(
            validate_draft(&draft).unwrap_err().field(),
            Some("monthly_price")
        );

        let draft = valid_draft().yearly_price(-1);
        assert_eq!(
            validate_draft(&draft).unwrap_err().field(),
            Some("yearly_price")
        );
    }

    #[test]
    fn test_name_checked_before_price() {
        let draft = PlanDraft::new("").monthly_price(-500);
        assert_eq!(validate_draft(&draft).unwrap_err().field(), Some("name"));
    }

    #[test]
    fn test_description_too_long() {
        let draft = valid_draft().description("d".repeat(MAX_PLAN_DESCRIPTION_LENGTH + 1));
        assert_eq!(
            validate_draft(&draft).unwrap_err().field(),
            Some("description")
        );
    }

    #[test]
    fn test_feature_rules() {
        let draft = valid_draft().features([" "]);
        assert_eq!(validate_draft(&draft).unwrap_err().field(), Some("features"));

        let draft = valid_draft().features((0..MAX_FEATURES).map(|i| format!("f{}", i)));
        assert_eq!(validate_draft(&draft).unwrap_err().field(), Some("features"));

        assert!(validate_feature(&"f".repeat(MAX_FEATURE_LENGTH)).is_ok());
        assert!(validate_feature(&"f".repeat(MAX_FEATURE_LENGTH + 1)).is_err());
    }
}
