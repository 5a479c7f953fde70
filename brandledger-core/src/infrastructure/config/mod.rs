// brandledger-core/src/infrastructure/config/mod.rs
//
// Configuration projet (fichier YAML optionnel `brandledger.yaml`).
// Tout a une valeur par défaut : une invocation sans argument et sans
// fichier exécute le pipeline complet.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_CONFIG_FILE: &str = "brandledger.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    /// Chemin du store DuckDB.
    pub db_path: String,
    /// Relation de sortie, intégralement remplacée à chaque run.
    pub output_table: String,
    /// Répertoire du log de progression (append-only).
    pub log_dir: PathBuf,
    /// Nombre de lignes loggées en aperçu à chaque étape.
    pub preview_rows: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            db_path: "inventory.duckdb".to_string(),
            output_table: "vendor_sales_summary".to_string(),
            log_dir: PathBuf::from("logs"),
            preview_rows: 5,
        }
    }
}

/// Charge la config depuis `path`, ou depuis `brandledger.yaml` dans le
/// répertoire courant, ou les défauts si aucun fichier n'existe.
/// Un fichier explicitement demandé mais absent est une erreur.
pub fn load_config(path: Option<&Path>) -> Result<SummaryConfig, InfrastructureError> {
    let candidate = match path {
        Some(p) => {
            if !p.exists() {
                return Err(InfrastructureError::ConfigError(format!(
                    "Config file not found: {:?}",
                    p
                )));
            }
            p.to_path_buf()
        }
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(SummaryConfig::default());
            }
            p
        }
    };

    info!(path = ?candidate, "Loading project config");
    let content = fs::read_to_string(&candidate)?;
    let config: SummaryConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SummaryConfig::default();
        assert_eq!(config.db_path, "inventory.duckdb");
        assert_eq!(config.output_table, "vendor_sales_summary");
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn test_load_partial_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brandledger.yaml");
        std::fs::write(&path, "db_path: /data/store.duckdb\npreview_rows: 3\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.db_path, "/data/store.duckdb");
        assert_eq!(config.preview_rows, 3);
        // Champ absent => défaut
        assert_eq!(config.output_table, "vendor_sales_summary");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("/nope/brandledger.yaml"))).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigError(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brandledger.yaml");
        std::fs::write(&path, "no_such_key: 1\n").unwrap();
        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(InfrastructureError::YamlError(_))
        ));
    }
}
