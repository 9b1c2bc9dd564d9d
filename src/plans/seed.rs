//! Built-in plan catalog shown when the dashboard starts.

use super::error::PlanError;
use super::registry::PlanRegistry;
use super::types::{AppLimit, PlanDraft};

/// Build a registry holding the default three-tier catalog.
pub fn default_catalog() -> Result<PlanRegistry, PlanError> {
    let mut registry = PlanRegistry::new();

    registry.seed(
        PlanDraft::new("Starter")
            .description("Perfect for individuals and small projects")
            .monthly_price(999)
            .yearly_price(9_990)
            .features([
                "Up to 3 apps",
                "Basic analytics",
                "Email support",
                "1 GB storage",
            ])
            .max_apps(AppLimit::Limited(3)),
        1_234,
    )?;

    registry.seed(
        PlanDraft::new("Professional")
            .description("For growing teams that need more power")
            .monthly_price(2_999)
            .yearly_price(29_990)
            .features([
                "Up to 10 apps",
                "Advanced analytics",
                "Priority support",
                "10 GB storage",
                "Custom domains",
            ])
            .max_apps(AppLimit::Limited(10)),
        856,
    )?;

    registry.seed(
        PlanDraft::new("Enterprise")
            .description("Unlimited scale with dedicated support")
            .monthly_price(9_999)
            .yearly_price(99_990)
            .features([
                "Unlimited apps",
                "Real-time analytics",
                "24/7 dedicated support",
                "Unlimited storage",
                "SSO & SAML",
                "SLA guarantee",
            ])
            .max_apps(AppLimit::Unlimited),
        142,
    )?;

    Ok(registry)
}
