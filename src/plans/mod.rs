//! Subscription plan registry.
//!
//! Holds the ordered list of plans for one dashboard session and the single
//! "currently editing" working copy.
//!
//! # Example
//!
//! ```rust
//! use plandesk::confirm::AutoConfirm;
//! use plandesk::plans::{PlanDraft, PlanRegistry};
//!
//! let mut registry = PlanRegistry::new();
//! let id = registry
//!     .create(PlanDraft::new("Starter").monthly_price(999).features(["Email support"]))
//!     .unwrap();
//!
//! registry.begin_edit(id).unwrap();
//! registry.add_feature("Custom domains");
//! registry.draft_mut().unwrap().yearly_price_cents = 9_990;
//! registry.commit_edit().unwrap();
//!
//! assert_eq!(registry.get(id).unwrap().features.len(), 2);
//! assert!(registry.delete(id, &AutoConfirm::YES).unwrap());
//! ```

mod error;
mod registry;
mod seed;
mod types;
pub mod validation;

pub use error::PlanError;
pub use registry::{EditSession, PlanRegistry};
pub use seed::default_catalog;
pub use types::{AppLimit, Plan, PlanDraft, PlanId, UNLIMITED_SENTINEL, format_price, parse_price};
pub use validation::validate_draft;
