// brandledger/src/commands/inspect.rs
//
// USE CASE: Inspect a store table (schema + sample rows).

use std::path::Path;

use brandledger_core::infrastructure::adapters::duckdb::DuckDbConnector;
use brandledger_core::ports::connector::StoreConnector;

pub async fn execute(db_path: String, table: String, limit: usize) -> anyhow::Result<()> {
    if !Path::new(&db_path).exists() {
        anyhow::bail!(
            "❌ Store not found at: {}\n👉 Have you run 'brandledger run'?",
            db_path
        );
    }

    let connector = DuckDbConnector::new(&db_path)?;

    println!("\n🔍 Inspecting Table: '{}'", table);

    let columns = connector.fetch_columns(&table).await?;
    if columns.is_empty() {
        anyhow::bail!("❌ Table '{}' not found in {}", table, db_path);
    }
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    println!("   Columns: [{}]", names.join(", "));
    println!("   --- Rows (Limit {}) ---", limit);

    let sample = connector
        .fetch(&format!("SELECT * FROM \"{}\" LIMIT {}", table, limit))
        .await?;
    for row in &sample.rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("   ➜ {}", cells.join(" | "));
    }

    Ok(())
}
