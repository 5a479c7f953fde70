// brandledger-core/src/application/mod.rs

pub mod aggregation;
pub mod engine;
pub mod pipeline;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use brandledger_core::application::{run_summary, execute_query};`
// sans avoir à connaître la structure interne des fichiers.

pub use aggregation::Aggregator;
pub use engine::execute_query;
pub use pipeline::{RunReport, run_summary};
