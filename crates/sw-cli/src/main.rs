//! Stepwise CLI - bootstrap and update a versioned database

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{status, update};

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::common::init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Update(args) => update::execute(args, &cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
    }
}
