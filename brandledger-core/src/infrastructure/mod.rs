// brandledger-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod logging;

pub use config::{SummaryConfig, load_config};
pub use error::InfrastructureError;
pub use logging::RunLog;
