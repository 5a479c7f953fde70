// brandledger-core/src/domain/table.rs
//
// Modèle tabulaire minimal, indépendant du moteur de stockage.
// Un `Table` est ce que le port StoreConnector lit et écrit : des noms de
// colonnes (ordre préservé), un type logique par colonne, et des lignes de
// `Value`.

use crate::domain::error::DomainError;

/// A single cell value, as read from (or written to) the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Logical column type, used by the adapter to emit typed DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

/// An in-memory tabular result set. Column order is significant: it is the
/// order the store returned (reads) or the order the relation is created
/// with (writes).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub types: Vec<ColumnType>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, types: Vec<ColumnType>) -> Self {
        Self {
            columns,
            types,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name, or a domain error naming the culprit.
    pub fn column_index(&self, name: &str) -> Result<usize, DomainError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DomainError::MissingColumn(name.to_string()))
    }

    /// Rejects ragged rows early so downstream indexing cannot panic.
    pub fn check_shape(&self) -> Result<(), DomainError> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(DomainError::RaggedRow {
                    row: i,
                    expected: self.columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(())
    }

    /// First `limit` rows rendered for the progress log (équivalent df.head()).
    pub fn preview(&self, limit: usize) -> Vec<String> {
        let mut lines = vec![self.columns.join(" | ")];
        for row in self.rows.iter().take(limit) {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            lines.push(cells.join(" | "));
        }
        lines
    }
}
