// brandledger-core/src/domain/mod.rs

pub mod deriver;
pub mod error;
pub mod summary;
pub mod table;

pub use deriver::derive_summary;
pub use error::DomainError;
pub use summary::{SUMMARY_COLUMNS, VendorBrandSummary, summary_to_table};
pub use table::{ColumnType, Table, Value};
