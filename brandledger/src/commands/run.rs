// brandledger/src/commands/run.rs
//
// USE CASE: Run the vendor summary pipeline.

use std::path::PathBuf;

use anyhow::Context;
use brandledger_core::application::run_summary;
use brandledger_core::infrastructure::adapters::duckdb::DuckDbConnector;
use brandledger_core::infrastructure::config::load_config;
use brandledger_core::infrastructure::logging::RunLog;

pub async fn execute(db_path: Option<String>, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let mut config = load_config(config_path.as_deref())
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    if let Some(db) = db_path {
        config.db_path = db;
    }
    println!("   Store: {} 🦆", config.db_path);
    println!("   Output relation: {}", config.output_table);

    // B. Observability context: built ONCE here, handed to each stage.
    let log = RunLog::to_file(&config.log_dir, config.preview_rows)
        .with_context(|| format!("Failed to open run log in {:?}", config.log_dir))?;

    // C. Instantiate the DB Adapter (DuckDB)
    let connector = DuckDbConnector::new(&config.db_path)
        .with_context(|| format!("Failed to open DuckDB store at {}", config.db_path))?;

    // D. Run the Pipeline (Application Layer)
    match run_summary(&connector, &config, &log).await {
        Ok(report) => {
            println!(
                "\n✨ SUCCESS! {} rows written to '{}' in {:.2?}",
                report.rows_written,
                report.output_table,
                start.elapsed()
            );
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
