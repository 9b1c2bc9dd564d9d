//! Testing utilities for dashboard code
//!
//! Builders and fake data for plans, so tests can set up a registry in one
//! line.
//!
//! # Example
//!
//! ```rust
//! use plandesk::testing::{TestPlan, registry_with};
//!
//! let mut registry = registry_with(2);
//! let id = registry
//!     .create(TestPlan::new().with_name("Gold").with_monthly_price(1999).build())
//!     .unwrap();
//! assert_eq!(registry.get(id).unwrap().name, "Gold");
//! ```

mod fixtures;

pub use fixtures::{TestPlan, fake, registry_with};
