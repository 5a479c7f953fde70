// brandledger-core/src/infrastructure/logging.rs
//
// Contexte d'observabilité du run. Construit UNE fois au démarrage du
// process, puis passé explicitement à chaque étape du pipeline (pas de
// config de stage implicite et globale). Le log de progression est un
// fichier append-only, informel : il ne fait pas partie du contrat
// fonctionnel.

use std::fs;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::domain::table::Table;
use crate::infrastructure::error::InfrastructureError;

pub const LOG_FILE: &str = "vendor_summary.log";

pub struct RunLog {
    preview_rows: usize,
    _guard: Option<WorkerGuard>,
}

impl RunLog {
    /// File-backed run log (logs/vendor_summary.log). Installs the tracing
    /// subscriber; keeps the writer guard alive for the life of the run.
    pub fn to_file(log_dir: &Path, preview_rows: usize) -> Result<Self, InfrastructureError> {
        fs::create_dir_all(log_dir)?;
        let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .finish();

        // Un subscriber déjà installé (tests, double init) reste en place.
        let _ = tracing::subscriber::set_global_default(subscriber);

        Ok(Self {
            preview_rows,
            _guard: Some(guard),
        })
    }

    /// Context without its own writer: events go to whatever subscriber the
    /// process already has (used by tests).
    pub fn detached(preview_rows: usize) -> Self {
        Self {
            preview_rows,
            _guard: None,
        }
    }

    pub fn stage_started(&self, stage: &str) {
        info!(stage, "stage started");
    }

    /// Équivalent du logging.info(df.head()) d'un notebook : les premières
    /// lignes du row set, en clair dans le log.
    pub fn preview(&self, stage: &str, table: &Table) {
        for line in table.preview(self.preview_rows) {
            info!(stage, "{}", line);
        }
    }

    pub fn stage_completed(&self, stage: &str, rows: usize) {
        info!(stage, rows, "stage completed");
    }
}
