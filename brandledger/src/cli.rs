// brandledger/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brandledger")]
#[command(about = "Vendor/Brand Sales & Purchasing Summary Pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the summary pipeline (Aggregate -> Derive -> Persist)
    Run {
        /// Path to the DuckDB store (overrides the config file)
        #[arg(long)]
        db_path: Option<String>,

        /// Optional YAML config file (default: ./brandledger.yaml if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// 🔍 Inspects a store table (schema + sample rows)
    Inspect {
        /// Path to the DuckDB store
        #[arg(long, default_value = "inventory.duckdb")]
        db_path: String,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// ⚡ Executes a raw SQL query (Ad-hoc)
    Query {
        query: String,
        #[arg(long, default_value = "inventory.duckdb")]
        db_path: String,
    },
}
