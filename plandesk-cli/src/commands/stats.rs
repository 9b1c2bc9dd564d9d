//! Stats command - print overview statistics for the catalog.

use anyhow::Result;
use colored::Colorize;
use plandesk::Config;
use plandesk::admin::OverviewStats;

use super::{load_catalog, stats_lines};

pub fn run(config: &Config) -> Result<()> {
    let registry = load_catalog(config)?;
    let stats = OverviewStats::from_registry(&registry);

    println!("\n{}\n", "Overview".cyan().bold());
    for line in stats_lines(&stats) {
        println!("  {}", line);
    }
    println!();

    Ok(())
}
