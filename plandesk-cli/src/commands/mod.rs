//! Subcommand implementations and the formatting they share.

pub mod console;
pub mod plans;
pub mod stats;

use colored::Colorize;
use plandesk::Config;
use plandesk::admin::OverviewStats;
use plandesk::plans::{Plan, PlanRegistry, default_catalog};

/// The registry a fresh dashboard would start with.
pub fn load_catalog(config: &Config) -> anyhow::Result<PlanRegistry> {
    if config.catalog.seed {
        Ok(default_catalog()?)
    } else {
        Ok(PlanRegistry::new())
    }
}

/// One line of the plan table.
pub fn plan_row(plan: &Plan, editing: bool) -> String {
    let status = if plan.is_active {
        "active".green()
    } else {
        "inactive".dimmed()
    };
    let mut row = format!(
        "{:>3}  {:<16} {:>10}/mo {:>11}/yr  {:>9} apps  {:>6} subs  {}",
        plan.id.to_string(),
        plan.name,
        plan.formatted_monthly_price(),
        plan.formatted_yearly_price(),
        plan.max_apps.to_string(),
        plan.subscriber_count,
        status
    );
    if editing {
        row.push_str(&format!("  {}", "(editing)".yellow()));
    }
    row
}

/// Stat card lines for the overview.
pub fn stats_lines(stats: &OverviewStats) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Plans:        {} ({} active)",
            stats.total_plans, stats.active_plans
        ),
        format!(
            "Subscribers:  {} ({}% on active plans)",
            stats.total_subscribers,
            stats.active_subscriber_percent()
        ),
        format!("MRR:          {}", stats.formatted_mrr()),
    ];
    if let Some(popular) = &stats.most_popular {
        lines.push(format!(
            "Most popular: {} ({} subscribers)",
            popular.name, popular.subscriber_count
        ));
    }
    lines
}
