// brandledger-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Cannot coerce value '{value}' in column '{column}' to a number")]
    #[diagnostic(
        code(brandledger::domain::coercion),
        help("The source relation carries non-numeric data where a number is required (e.g. Volume).")
    )]
    Coercion { column: String, value: String },

    #[error("Column '{0}' missing from the joined row set")]
    #[diagnostic(
        code(brandledger::domain::missing_column),
        help("The aggregation query and the summary schema are out of sync.")
    )]
    MissingColumn(String),

    #[error("Row {row} is ragged: expected {expected} cells, found {found}")]
    #[diagnostic(code(brandledger::domain::ragged_row))]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
