//! Plan record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PlanError;

/// Raw `max_apps` form value meaning "no limit".
pub const UNLIMITED_SENTINEL: i64 = -1;

/// Registry-assigned plan identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub u64);

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PlanId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// How many apps a plan allows.
///
/// Serialized as the raw form value: a non-negative count, or `-1` for
/// unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum AppLimit {
    /// At most this many apps.
    Limited(u32),
    /// No limit.
    Unlimited,
}

impl AppLimit {
    /// Interpret a raw form value.
    ///
    /// `-1` means unlimited. Any other negative value, or a value that does
    /// not fit in `u32`, is rejected.
    pub fn from_raw(raw: i64) -> Result<Self, PlanError> {
        match raw {
            UNLIMITED_SENTINEL => Ok(Self::Unlimited),
            n if n < 0 => Err(PlanError::validation(
                "max_apps",
                format!("{} is not allowed (use {} for unlimited)", n, UNLIMITED_SENTINEL),
            )),
            n => u32::try_from(n)
                .map(Self::Limited)
                .map_err(|_| PlanError::validation("max_apps", format!("{} is too large", n))),
        }
    }

    /// The raw form value for this limit.
    #[must_use]
    pub fn as_raw(&self) -> i64 {
        match self {
            Self::Limited(n) => i64::from(*n),
            Self::Unlimited => UNLIMITED_SENTINEL,
        }
    }

    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Check whether `current` apps fit within this limit.
    #[must_use]
    pub fn allows(&self, current: u32) -> bool {
        match self {
            Self::Limited(max) => current <= *max,
            Self::Unlimited => true,
        }
    }
}

impl Default for AppLimit {
    fn default() -> Self {
        Self::Limited(1)
    }
}

impl From<AppLimit> for i64 {
    fn from(limit: AppLimit) -> Self {
        limit.as_raw()
    }
}

impl TryFrom<i64> for AppLimit {
    type Error = PlanError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl fmt::Display for AppLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{}", n),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// The editable fields of a plan.
///
/// Used as the input to [`PlanRegistry::create`](super::PlanRegistry::create)
/// and as the working copy of an edit session. The id and subscriber count
/// are deliberately absent: they cannot be changed through an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub name: String,
    pub description: String,
    /// Monthly price in cents.
    pub monthly_price_cents: i64,
    /// Yearly price in cents.
    pub yearly_price_cents: i64,
    pub features: Vec<String>,
    pub max_apps: AppLimit,
    pub is_active: bool,
}

impl Default for PlanDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            monthly_price_cents: 0,
            yearly_price_cents: 0,
            features: Vec::new(),
            max_apps: AppLimit::default(),
            is_active: true,
        }
    }
}

impl PlanDraft {
    /// Start a draft with the given name and default values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the monthly price in cents.
    #[must_use]
    pub fn monthly_price(mut self, cents: i64) -> Self {
        self.monthly_price_cents = cents;
        self
    }

    /// Set the yearly price in cents.
    #[must_use]
    pub fn yearly_price(mut self, cents: i64) -> Self {
        self.yearly_price_cents = cents;
        self
    }

    /// Append features in order.
    #[must_use]
    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn max_apps(mut self, limit: AppLimit) -> Self {
        self.max_apps = limit;
        self
    }

    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// One subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub description: String,
    /// Monthly price in cents.
    pub monthly_price_cents: i64,
    /// Yearly price in cents.
    pub yearly_price_cents: i64,
    pub features: Vec<String>,
    pub max_apps: AppLimit,
    pub is_active: bool,
    /// Display statistic; not editable.
    pub subscriber_count: u64,
}

impl Plan {
    pub(crate) fn from_draft(id: PlanId, draft: PlanDraft, subscriber_count: u64) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            monthly_price_cents: draft.monthly_price_cents,
            yearly_price_cents: draft.yearly_price_cents,
            features: draft.features,
            max_apps: draft.max_apps,
            is_active: draft.is_active,
            subscriber_count,
        }
    }

    /// Clone the editable fields into a fresh working copy.
    #[must_use]
    pub fn to_draft(&self) -> PlanDraft {
        PlanDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            monthly_price_cents: self.monthly_price_cents,
            yearly_price_cents: self.yearly_price_cents,
            features: self.features.clone(),
            max_apps: self.max_apps,
            is_active: self.is_active,
        }
    }

    /// Overwrite the editable fields, keeping id and subscriber count.
    pub(crate) fn apply_draft(&mut self, draft: PlanDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.monthly_price_cents = draft.monthly_price_cents;
        self.yearly_price_cents = draft.yearly_price_cents;
        self.features = draft.features;
        self.max_apps = draft.max_apps;
        self.is_active = draft.is_active;
    }

    /// Check if this plan lists a feature.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Monthly price formatted for display (e.g., "$19.99").
    #[must_use]
    pub fn formatted_monthly_price(&self) -> String {
        format_price(self.monthly_price_cents)
    }

    /// Yearly price formatted for display.
    #[must_use]
    pub fn formatted_yearly_price(&self) -> String {
        format_price(self.yearly_price_cents)
    }

    /// Yearly discount compared to twelve monthly payments, in whole percent.
    ///
    /// Returns `None` for free plans or when the yearly price is not cheaper.
    #[must_use]
    pub fn yearly_savings_percent(&self) -> Option<u8> {
        let twelve_months = self.monthly_price_cents.checked_mul(12)?;
        if twelve_months <= 0 || self.yearly_price_cents >= twelve_months {
            return None;
        }
        let saved = i128::from(twelve_months - self.yearly_price_cents);
        u8::try_from(saved * 100 / i128::from(twelve_months)).ok()
    }
}

/// Format cents as a dollar amount (e.g., 1999 => "$19.99").
#[must_use]
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a decimal amount such as "19.99", "$5" or "-5" into cents.
///
/// Negative amounts parse successfully so that validation can report them
/// against the right field. At most two decimal places are accepted.
pub fn parse_price(field: &'static str, input: &str) -> Result<i64, PlanError> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);

    let invalid = || PlanError::validation(field, format!("'{}' is not a valid amount", input));

    let (whole, frac) = match rest.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (rest, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if frac.len() > 2 || !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(invalid)?;
    Ok(if negative { -cents } else { cents })
}
