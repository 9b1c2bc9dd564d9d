//! Sidebar navigation between dashboard sections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// A top-level dashboard section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Statistics overview.
    #[default]
    Overview,
    /// Subscription plan editor.
    Plans,
    Users,
    Settings,
}

impl Section {
    /// Every section, in sidebar order.
    pub const ALL: [Section; 4] = [Self::Overview, Self::Plans, Self::Users, Self::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Plans => "plans",
            Self::Users => "users",
            Self::Settings => "settings",
        }
    }

    /// Human-readable sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Plans => "Subscription Plans",
            Self::Users => "Users",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Section {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overview" | "dashboard" | "home" => Ok(Self::Overview),
            "plans" | "plan" | "subscriptions" => Ok(Self::Plans),
            "users" => Ok(Self::Users),
            "settings" => Ok(Self::Settings),
            _ => Err(DashboardError::UnknownSection(s.to_string())),
        }
    }
}

/// Holds the selected section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Section,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    /// Switch sections. Returns the previous one.
    pub fn select(&mut self, section: Section) -> Section {
        let previous = std::mem::replace(&mut self.current, section);
        if previous != section {
            tracing::debug!(from = %previous, to = %section, "section changed");
        }
        previous
    }

    /// Back to the default section.
    pub fn reset(&mut self) {
        self.current = Section::default();
    }
}
