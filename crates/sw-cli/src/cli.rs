//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use sw_core::ScriptOrder;

/// Stepwise - bring a database up to its latest schema version
#[derive(Parser, Debug)]
#[command(name = "sw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "SW_CONFIG",
        default_value = "server.config"
    )]
    pub config: PathBuf,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bootstrap the database if needed and apply pending update scripts
    Update(UpdateArgs),

    /// Show the recorded version and pending update scripts
    Status(StatusArgs),
}

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Override how update scripts are ordered
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Override how update scripts are ordered
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Update-script ordering
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    /// By parsed version (1.2.0 before 1.10.0)
    Semantic,
    /// By filename string (1.10.0 before 1.2.0)
    Lexicographic,
}

impl From<OrderArg> for ScriptOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Semantic => ScriptOrder::Semantic,
            OrderArg::Lexicographic => ScriptOrder::Lexicographic,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
