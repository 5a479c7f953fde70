// brandledger-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

// Imports Hexagonaux corrects
use crate::domain::table::Table;
use crate::error::SummaryError;
use crate::ports::connector::StoreConnector;

/// Exécute une requête SQL brute avec instrumentation (Logs + Timing).
/// Ce wrapper permet de surveiller la performance des requêtes ad-hoc.
#[instrument(skip(connector), fields(query.len = query.len()))]
pub async fn execute_query(
    connector: &dyn StoreConnector,
    query: &str,
) -> Result<Table, SummaryError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    // Exécution déléguée au Port
    let result = connector.fetch(query).await;

    let duration = start.elapsed();

    match result {
        Ok(table) => {
            debug!(rows = table.len(), "✅ Query finished in {:.2?}", duration);
            Ok(table)
        }
        Err(e) => {
            // On log l'erreur ici pour avoir le contexte de temps,
            // même si elle sera remontée plus haut.
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
