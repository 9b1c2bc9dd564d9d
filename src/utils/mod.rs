//! Utility functions and helpers.
//!
//! Environment variable handling used by the config loader.

pub mod env;

pub use env::{get_env_with_prefix, parse_bool};
