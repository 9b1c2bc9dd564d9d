//! Admin dashboard types.

use serde::{Deserialize, Serialize};

use crate::plans::{PlanId, PlanRegistry, format_price};

/// Overview statistics for the dashboard's stat cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    /// Number of plans in the registry.
    pub total_plans: u64,
    /// Number of plans currently active.
    pub active_plans: u64,
    /// Subscribers across every plan.
    pub total_subscribers: u64,
    /// Subscribers on active plans only.
    pub active_subscribers: u64,
    /// Monthly recurring revenue in cents, from active plans.
    pub mrr_cents: i64,
    /// Plan with the most subscribers, if any plan has subscribers.
    pub most_popular: Option<PopularPlan>,
}

/// The plan with the most subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularPlan {
    pub id: PlanId,
    pub name: String,
    pub subscriber_count: u64,
}

impl OverviewStats {
    /// Compute statistics from the current registry contents.
    ///
    /// Uncommitted edits are not reflected.
    #[must_use]
    pub fn from_registry(registry: &PlanRegistry) -> Self {
        let mut stats = Self::default();

        for plan in registry.list() {
            stats.total_plans += 1;
            stats.total_subscribers = stats.total_subscribers.saturating_add(plan.subscriber_count);

            if plan.is_active {
                stats.active_plans += 1;
                stats.active_subscribers =
                    stats.active_subscribers.saturating_add(plan.subscriber_count);
                let revenue = plan
                    .monthly_price_cents
                    .saturating_mul(i64::try_from(plan.subscriber_count).unwrap_or(i64::MAX));
                stats.mrr_cents = stats.mrr_cents.saturating_add(revenue);
            }
        }

        // First plan wins ties, matching display order.
        stats.most_popular = registry
            .list()
            .iter()
            .filter(|p| p.subscriber_count > 0)
            .fold(None::<&crate::plans::Plan>, |best, p| match best {
                Some(b) if b.subscriber_count >= p.subscriber_count => Some(b),
                _ => Some(p),
            })
            .map(|p| PopularPlan {
                id: p.id,
                name: p.name.clone(),
                subscriber_count: p.subscriber_count,
            });

        stats
    }

    /// Monthly recurring revenue formatted for display.
    #[must_use]
    pub fn formatted_mrr(&self) -> String {
        format_price(self.mrr_cents)
    }

    /// Share of plans that are active, in whole percent.
    #[must_use]
    pub fn active_ratio_percent(&self) -> u8 {
        if self.total_plans == 0 {
            return 0;
        }
        ((self.active_plans * 100) / self.total_plans) as u8
    }

    /// Share of subscribers on active plans, in whole percent.
    #[must_use]
    pub fn active_subscriber_percent(&self) -> u8 {
        if self.total_subscribers == 0 {
            return 0;
        }
        let percent = u128::from(self.active_subscribers) * 100 / u128::from(self.total_subscribers);
        percent as u8
    }
}
