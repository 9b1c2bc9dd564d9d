//! Login gate for the dashboard.
//!
//! A pluggable [`AuthProvider`] answers login attempts; [`Session`] records
//! whether someone is logged in. [`StaticAuthProvider`] is a placeholder that
//! checks one configured credential pair.

pub mod provider;
pub mod session;

pub use provider::{AuthProvider, StaticAuthProvider, normalize_email};
pub use session::Session;
