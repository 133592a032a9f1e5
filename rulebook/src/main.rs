// rulebook/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug rulebook render ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // An Err here is printed as a miette diagnostic and exits with status 1.
    match cli.command {
        Commands::Render { log, report } => commands::render::execute(log, report),
        Commands::Resolve { log, report } => commands::resolve::execute(log, report),
    }
}
