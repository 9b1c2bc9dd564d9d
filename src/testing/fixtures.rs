//! Test fixtures and factory pattern for generating plan data
//!
//! This module provides helpers for creating test plans in a consistent way.

use crate::plans::{AppLimit, PlanDraft, PlanRegistry};

/// Helper functions for generating fake test data
pub mod fake {
    /// Generate a fake plan name
    pub fn plan_name() -> String {
        format!("Plan {}", string(6))
    }

    /// Generate a fake feature line
    pub fn feature() -> String {
        format!("Feature {}", string(8))
    }

    /// Generate a random price in cents between min and max
    pub fn price_cents(min: i64, max: i64) -> i64 {
        fastrand::i64(min..=max)
    }

    /// Generate a random subscriber count
    pub fn subscribers() -> u64 {
        fastrand::u64(0..10_000)
    }

    /// Generate a random string of the given length
    pub fn string(length: usize) -> String {
        (0..length).map(|_| fastrand::alphabetic()).collect()
    }
}

/// Builder for creating valid test plan drafts
#[derive(Debug, Clone)]
pub struct TestPlan {
    name: Option<String>,
    monthly_price_cents: Option<i64>,
    yearly_price_cents: Option<i64>,
    features: Option<Vec<String>>,
    max_apps: AppLimit,
    is_active: bool,
}

impl Default for TestPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPlan {
    /// Create a new TestPlan builder
    pub fn new() -> Self {
        Self {
            name: None,
            monthly_price_cents: None,
            yearly_price_cents: None,
            features: None,
            max_apps: AppLimit::Limited(5),
            is_active: true,
        }
    }

    /// Create a draft with generated values
    pub fn generate() -> PlanDraft {
        Self::new().build()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_monthly_price(mut self, cents: i64) -> Self {
        self.monthly_price_cents = Some(cents);
        self
    }

    pub fn with_yearly_price(mut self, cents: i64) -> Self {
        self.yearly_price_cents = Some(cents);
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_apps(mut self, limit: AppLimit) -> Self {
        self.max_apps = limit;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Build the draft. Unset prices are random; unset yearly price is ten
    /// times the monthly price.
    pub fn build(self) -> PlanDraft {
        let monthly = self
            .monthly_price_cents
            .unwrap_or_else(|| fake::price_cents(0, 20_000));
        PlanDraft {
            name: self.name.unwrap_or_else(fake::plan_name),
            description: format!("Test plan {}", fake::string(4)),
            monthly_price_cents: monthly,
            yearly_price_cents: self.yearly_price_cents.unwrap_or(monthly * 10),
            features: self
                .features
                .unwrap_or_else(|| (0..3).map(|_| fake::feature()).collect()),
            max_apps: self.max_apps,
            is_active: self.is_active,
        }
    }
}

/// Build a registry holding `count` generated plans with ids `1..=count`.
pub fn registry_with(count: usize) -> PlanRegistry {
    let mut registry = PlanRegistry::new();
    for _ in 0..count {
        // Generated drafts always pass validation.
        if let Err(err) = registry.seed(TestPlan::generate(), fake::subscribers()) {
            panic!("generated plan failed validation: {}", err);
        }
    }
    registry
}
