// brandledger-core/src/ports/connector.rs

// This file defines what your application needs, without knowing how it's done.
// The pipeline only ever sees "a queryable store with a fixed schema" : it
// reads tabular result sets and replaces one named relation.

use crate::domain::table::Table;
use crate::error::SummaryError;
use async_trait::async_trait;

// Struct simple pour décrire une colonne (indépendant de la DB)
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// DDL / ad-hoc statement, no result set expected.
    async fn execute(&self, query: &str) -> Result<(), SummaryError>;

    /// Read query; column names and order are preserved from the store.
    async fn fetch(&self, query: &str) -> Result<Table, SummaryError>;

    /// Replaces the entire contents of `name` with `data`, creating the
    /// relation if absent. NOT atomic: a crash mid-write can leave the
    /// relation dropped or partially filled (drop + create + insert).
    async fn replace_table(&self, name: &str, data: &Table) -> Result<(), SummaryError>;

    /// Schema of an existing relation (utilisé par `inspect`).
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, SummaryError>;
}
