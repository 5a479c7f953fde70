// brandledger-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::ValueRef;
use duckdb::{Config, Connection, params_from_iter};
use std::sync::{Arc, Mutex, MutexGuard};

// Imports Hexagonaux
use crate::domain::table::{ColumnType, Table, Value};
use crate::error::SummaryError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{ColumnSchema, StoreConnector};

pub struct DuckDbConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SummaryError> {
        self.conn.lock().map_err(|_| {
            SummaryError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

#[async_trait]
impl StoreConnector for DuckDbConnector {
    async fn execute(&self, query: &str) -> Result<(), SummaryError> {
        let conn = self.lock()?;
        conn.execute(query, []).map(|_rows| ()).map_err(|e| {
            SummaryError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDb(e)))
        })
    }

    async fn fetch(&self, query: &str) -> Result<Table, SummaryError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query).map_err(InfrastructureError::from)?;

        // Noms de colonnes relevés avant l'itération (ordre du SELECT préservé)
        let column_count = stmt.column_count();
        let column_names: Vec<String> = (0..column_count)
            .map(|i| stmt.column_name(i).unwrap_or(&"unknown".to_string()).to_string())
            .collect();

        let mut rows = stmt.query([]).map_err(InfrastructureError::from)?;
        let mut data: Vec<Vec<Value>> = Vec::new();

        while let Some(row) = rows.next().map_err(InfrastructureError::from)? {
            let mut cells = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value_ref = row.get_ref(i).map_err(InfrastructureError::from)?;
                cells.push(from_value_ref(value_ref));
            }
            data.push(cells);
        }

        let types = infer_column_types(&data, column_count);
        let mut table = Table::new(column_names, types);
        table.rows = data;
        Ok(table)
    }

    async fn replace_table(&self, name: &str, data: &Table) -> Result<(), SummaryError> {
        let conn = self.lock()?;

        // Full replace, non atomique : drop + create + insert.
        conn.execute(&format!("DROP TABLE IF EXISTS \"{}\"", name), [])
            .map_err(InfrastructureError::from)?;

        let column_defs: Vec<String> = data
            .columns
            .iter()
            .zip(&data.types)
            .map(|(col, ty)| format!("\"{}\" {}", col, sql_type(*ty)))
            .collect();
        conn.execute(
            &format!("CREATE TABLE \"{}\" ({})", name, column_defs.join(", ")),
            [],
        )
        .map_err(InfrastructureError::from)?;

        if data.is_empty() {
            return Ok(());
        }

        let placeholders = vec!["?"; data.columns.len()].join(", ");
        let insert = format!("INSERT INTO \"{}\" VALUES ({})", name, placeholders);
        let mut stmt = conn.prepare(&insert).map_err(InfrastructureError::from)?;

        for row in &data.rows {
            let params: Vec<duckdb::types::Value> = row.iter().map(to_duck_value).collect();
            stmt.execute(params_from_iter(params))
                .map_err(InfrastructureError::from)?;
        }

        Ok(())
    }

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, SummaryError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info('{}')", table_name))
            .map_err(InfrastructureError::from)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ColumnSchema {
                    name: row.get("name")?,
                    data_type: row.get("type")?,
                    is_nullable: !row.get::<_, bool>("notnull")?,
                })
            })
            .map_err(InfrastructureError::from)?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row.map_err(InfrastructureError::from)?);
        }

        Ok(columns)
    }
}

// --- MAPPING DUCKDB <-> DOMAINE ---

fn from_value_ref(value_ref: ValueRef<'_>) -> Value {
    match value_ref {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Integer(b as i64),
        ValueRef::TinyInt(i) => Value::Integer(i as i64),
        ValueRef::SmallInt(i) => Value::Integer(i as i64),
        ValueRef::Int(i) => Value::Integer(i as i64),
        ValueRef::BigInt(i) => Value::Integer(i),
        ValueRef::HugeInt(i) => Value::Integer(i as i64),
        ValueRef::UTinyInt(i) => Value::Integer(i as i64),
        ValueRef::USmallInt(i) => Value::Integer(i as i64),
        ValueRef::UInt(i) => Value::Integer(i as i64),
        ValueRef::UBigInt(i) => Value::Integer(i as i64),
        ValueRef::Float(f) => Value::Real(f as f64),
        ValueRef::Double(f) => Value::Real(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).to_string()),
        _ => Value::Null,
    }
}

fn to_duck_value(value: &Value) -> duckdb::types::Value {
    match value {
        Value::Null => duckdb::types::Value::Null,
        Value::Integer(i) => duckdb::types::Value::BigInt(*i),
        Value::Real(r) => duckdb::types::Value::Double(*r),
        Value::Text(s) => duckdb::types::Value::Text(s.clone()),
    }
}

fn sql_type(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Integer => "BIGINT",
        ColumnType::Real => "DOUBLE",
        ColumnType::Text => "VARCHAR",
    }
}

/// Type logique par colonne : première valeur non nulle rencontrée, DOUBLE
/// par défaut (colonne entièrement nulle).
fn infer_column_types(rows: &[Vec<Value>], column_count: usize) -> Vec<ColumnType> {
    (0..column_count)
        .map(|i| {
            rows.iter()
                .find_map(|row| match &row[i] {
                    Value::Null => None,
                    Value::Integer(_) => Some(ColumnType::Integer),
                    Value::Real(_) => Some(ColumnType::Real),
                    Value::Text(_) => Some(ColumnType::Text),
                })
                .unwrap_or(ColumnType::Real)
        })
        .collect()
}
