// brandledger/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: RUN PIPELINE ---
        Commands::Run { db_path, config } => commands::run::execute(db_path, config).await,

        // --- USE CASE: INSPECT TABLE ---
        Commands::Inspect {
            db_path,
            table,
            limit,
        } => commands::inspect::execute(db_path, table, limit).await,

        // --- USE CASE: AD-HOC QUERY ---
        Commands::Query { query, db_path } => commands::query::execute(db_path, query).await,
    }
}
