//! Admin dashboard overview.
//!
//! Statistics shown on the dashboard's overview section, derived from the
//! plan registry on demand.
//!
//! # Example
//!
//! ```rust
//! use plandesk::admin::OverviewStats;
//! use plandesk::plans::default_catalog;
//!
//! let registry = default_catalog().unwrap();
//! let stats = OverviewStats::from_registry(&registry);
//! assert_eq!(stats.total_plans, 3);
//! println!("MRR: {}", stats.formatted_mrr());
//! ```

mod types;

pub use types::{OverviewStats, PopularPlan};
