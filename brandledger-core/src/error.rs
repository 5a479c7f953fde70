// brandledger-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    // --- ERREURS DU DOMAINE (Coercition, colonnes manquantes) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, DB, Config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS GÉNÉRIQUES / APPLICATIVES ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for SummaryError {
    fn from(err: std::io::Error) -> Self {
        SummaryError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for SummaryError {
    fn from(err: duckdb::Error) -> Self {
        SummaryError::Infrastructure(InfrastructureError::from(err))
    }
}
