//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plandesk")]
#[command(version)]
#[command(about = "Manage subscription plans from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the plan catalog
    Plans(PlansArgs),

    /// Print overview statistics for the catalog
    Stats,

    /// Start an interactive dashboard console
    Console(ConsoleArgs),
}

#[derive(Args, Debug)]
pub struct PlansArgs {
    /// Print the catalog as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConsoleArgs {
    /// Start with an empty registry instead of the built-in catalog
    #[arg(long, default_value = "false")]
    pub empty: bool,
}
