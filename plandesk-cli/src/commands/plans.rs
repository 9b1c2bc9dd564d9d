//! Plans command - print the plan catalog.

use anyhow::{Context, Result};
use colored::Colorize;
use plandesk::Config;

use super::{load_catalog, plan_row};
use crate::cli::PlansArgs;
use crate::print_info;

pub fn run(config: &Config, args: PlansArgs) -> Result<()> {
    let registry = load_catalog(config)?;

    if args.json {
        let json = serde_json::to_string_pretty(registry.list())
            .context("failed to serialize plans")?;
        println!("{}", json);
        return Ok(());
    }

    if registry.is_empty() {
        print_info("No plans in the catalog");
        return Ok(());
    }

    println!("\n{}\n", "Subscription Plans".cyan().bold());
    for plan in registry.list() {
        println!("{}", plan_row(plan, false));
        for feature in &plan.features {
            println!("       {} {}", "-".dimmed(), feature);
        }
    }
    println!();

    Ok(())
}
