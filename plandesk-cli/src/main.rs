//! Plandesk CLI - drive the admin dashboard core from a terminal.
//!
//! Usage:
//!   plandesk plans
//!   plandesk plans --json
//!   plandesk stats
//!   plandesk console

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use plandesk::ConfigBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default so log lines don't interleave with console output.
    let config = ConfigBuilder::new().with_log_level("warn").from_env().build()?;
    plandesk::init_tracing_with_config(&config);

    match cli.command {
        Commands::Plans(args) => commands::plans::run(&config, args)?,
        Commands::Stats => commands::stats::run(&config)?,
        Commands::Console(args) => commands::console::run(&config, args).await?,
    }

    Ok(())
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "→".blue(), message);
}
