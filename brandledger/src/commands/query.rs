// brandledger/src/commands/query.rs
//
// USE CASE: Ad-hoc SQL against the store, through the instrumented wrapper.

use brandledger_core::application::execute_query;
use brandledger_core::infrastructure::adapters::duckdb::DuckDbConnector;

pub async fn execute(db_path: String, query: String) -> anyhow::Result<()> {
    let connector = DuckDbConnector::new(&db_path)?;

    match execute_query(&connector, &query).await {
        Ok(table) => {
            for line in table.preview(table.len()) {
                println!("{}", line);
            }
            println!("({} rows)", table.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Query failed: {}", e);
            std::process::exit(1);
        }
    }
}
