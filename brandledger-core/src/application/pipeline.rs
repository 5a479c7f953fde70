// brandledger-core/src/application/pipeline.rs
//
// Pipeline Driver : Agrégation -> Dérivation -> Persistance (full replace).
// Pas de rollback ni de checkpoint : un échec de persistance après calcul
// perd le résultat, recalculé au run suivant. La relation précédente n'est
// touchée qu'à la toute dernière étape.

use std::time::Instant;
use tracing::info;

use crate::application::aggregation::Aggregator;
use crate::domain::deriver::derive_summary;
use crate::domain::summary::summary_to_table;
use crate::error::SummaryError;
use crate::infrastructure::config::SummaryConfig;
use crate::infrastructure::logging::RunLog;
use crate::ports::connector::StoreConnector;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_table: String,
    pub rows_written: usize,
}

/// Runs the whole batch, start to finish, on one connection. Sequential,
/// no partial-result visibility: the output relation changes only once the
/// final replace completes.
pub async fn run_summary(
    connector: &dyn StoreConnector,
    config: &SummaryConfig,
    log: &RunLog,
) -> Result<RunReport, SummaryError> {
    let start = Instant::now();

    // 1. AGRÉGATION (trois group-by + outer joins, côté store)
    log.stage_started("aggregation");
    let raw = Aggregator::aggregate(connector).await?;
    log.preview("aggregation", &raw);
    log.stage_completed("aggregation", raw.len());

    // 2. DÉRIVATION (coercition, fillna, trim, ratios)
    log.stage_started("derivation");
    let summary = derive_summary(&raw)?;
    let table = summary_to_table(&summary);
    log.preview("derivation", &table);
    log.stage_completed("derivation", table.len());

    // 3. PERSISTANCE (replace intégral de la relation de sortie)
    log.stage_started("persistence");
    connector.replace_table(&config.output_table, &table).await?;
    log.stage_completed("persistence", table.len());

    info!(elapsed = ?start.elapsed(), rows = table.len(), "run finished");

    Ok(RunReport {
        output_table: config.output_table.clone(),
        rows_written: table.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::Value;
    use crate::infrastructure::adapters::duckdb::DuckDbConnector;
    use anyhow::Result;

    async fn seed_store(connector: &DuckDbConnector) -> Result<()> {
        let ddl = [
            "CREATE TABLE purchases (VendorNumber BIGINT, VendorName VARCHAR, Brand BIGINT, \
             Description VARCHAR, PurchasePrice DOUBLE, Quantity BIGINT, Dollars DOUBLE)",
            "CREATE TABLE purchase_prices (Brand BIGINT, Price DOUBLE, Volume VARCHAR)",
            "CREATE TABLE sales (VendorNo BIGINT, Brand BIGINT, Sales_Quantity DOUBLE, \
             Sales_Dollars DOUBLE, Sales_Price DOUBLE, Excise_Tax DOUBLE)",
            "CREATE TABLE vendor_invoice (VendorNumber BIGINT, Freight DOUBLE)",
        ];
        for stmt in ddl {
            connector.execute(stmt).await?;
        }

        // Vendeur 100 / marque 1 : l'exemple travaillé (10 unités, 50$ d'achats)
        connector
            .execute(
                "INSERT INTO purchases VALUES \
                 (100, ' Acme Spirits ', 1, 'A1 Bourbon', 5.0, 4, 20.0), \
                 (100, ' Acme Spirits ', 1, 'A1 Bourbon', 5.0, 6, 30.0), \
                 (100, ' Acme Spirits ', 9, 'Promo Credit', 0.0, 1, 0.0), \
                 (200, 'Brimborion', 2, 'B2 Gin', 10.0, 3, 30.0), \
                 (200, 'Brimborion', 77, 'Unpriced Brand', 4.0, 2, 8.0)",
            )
            .await?;
        // Marque 77 absente du référentiel => ligne écartée (inner join)
        connector
            .execute(
                "INSERT INTO purchase_prices VALUES \
                 (1, 8.0, '750'), (2, 14.0, '1000'), (9, 1.0, '50')",
            )
            .await?;
        // Vendeur 300 : ventes sans achats => écarté du résultat
        connector
            .execute(
                "INSERT INTO sales VALUES \
                 (100, 1, 4.0, 36.0, 9.0, 0.8), \
                 (100, 1, 2.0, 18.0, 9.0, 0.4), \
                 (300, 5, 7.0, 70.0, 10.0, 1.0)",
            )
            .await?;
        connector
            .execute("INSERT INTO vendor_invoice VALUES (100, 2.0), (100, 3.0), (300, 9.0)")
            .await?;
        Ok(())
    }

    fn real(v: &Value) -> f64 {
        match v {
            Value::Real(r) => *r,
            Value::Integer(i) => *i as f64,
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_full_run_worked_example() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;
        seed_store(&connector).await?;

        let config = SummaryConfig::default();
        let log = RunLog::detached(config.preview_rows);
        let report = run_summary(&connector, &config, &log).await?;

        assert_eq!(report.rows_written, 2);

        let out = connector.fetch("SELECT * FROM vendor_sales_summary").await?;
        assert_eq!(out.columns.len(), 18);
        assert_eq!(out.len(), 2);

        // Tri par TotalPurchaseDollars décroissant : vendeur 100 (50$) d'abord
        let dollars = out.column_index("TotalPurchaseDollars")?;
        assert_eq!(real(&out.rows[0][dollars]), 50.0);
        assert_eq!(real(&out.rows[1][dollars]), 30.0);

        let col = |name: &str| out.column_index(name).unwrap();
        let acme = &out.rows[0];
        assert_eq!(acme[col("VendorNumber")], Value::Integer(100));
        assert_eq!(acme[col("VendorName")], Value::Text("Acme Spirits".into()));
        assert_eq!(acme[col("Brand")], Value::Integer(1));
        assert_eq!(real(&acme[col("ActualPrice")]), 8.0);
        assert_eq!(real(&acme[col("Volume")]), 750.0);
        assert_eq!(real(&acme[col("TotalPurchaseQuantity")]), 10.0);
        assert_eq!(real(&acme[col("TotalSalesQuantity")]), 6.0);
        assert_eq!(real(&acme[col("TotalSalesDollars")]), 54.0);
        assert_eq!(real(&acme[col("TotalSalesPrice")]), 18.0);
        assert_eq!(real(&acme[col("FreightCost")]), 5.0);
        assert_eq!(real(&acme[col("GrossProfit")]), 4.0);
        assert!((real(&acme[col("ProfitMargin")]) - 7.407407407407407).abs() < 1e-9);
        assert!((real(&acme[col("StockTurnover")]) - 0.6).abs() < 1e-12);
        assert!((real(&acme[col("SalesToPurchaseRatio")]) - 1.08).abs() < 1e-12);
        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_without_sales_or_freight_zero_filled() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;
        seed_store(&connector).await?;

        let config = SummaryConfig::default();
        let log = RunLog::detached(config.preview_rows);
        run_summary(&connector, &config, &log).await?;

        let out = connector
            .fetch("SELECT * FROM vendor_sales_summary WHERE VendorNumber = 200")
            .await?;
        assert_eq!(out.len(), 1);
        let col = |name: &str| out.column_index(name).unwrap();
        let row = &out.rows[0];

        assert_eq!(real(&row[col("TotalSalesQuantity")]), 0.0);
        assert_eq!(real(&row[col("TotalSalesDollars")]), 0.0);
        assert_eq!(real(&row[col("TotalSalesPrice")]), 0.0);
        assert_eq!(real(&row[col("TotalExciseTax")]), 0.0);
        assert_eq!(real(&row[col("FreightCost")]), 0.0);
        // Dénominateur ventes nul => marge non finie, jamais clampée
        assert!(!real(&row[col("ProfitMargin")]).is_finite());
        assert_eq!(real(&row[col("SalesToPurchaseRatio")]), 0.0);
        assert_eq!(real(&row[col("GrossProfit")]), -30.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_scope_of_the_purchase_driven_join() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;
        seed_store(&connector).await?;

        let config = SummaryConfig::default();
        let log = RunLog::detached(config.preview_rows);
        run_summary(&connector, &config, &log).await?;

        // Vendeur 300 (ventes/freight seulement) écarté
        let out = connector
            .fetch("SELECT * FROM vendor_sales_summary WHERE VendorNumber = 300")
            .await?;
        assert!(out.is_empty());

        // Ligne d'achat à prix nul (marque 9) exclue
        let out = connector
            .fetch("SELECT * FROM vendor_sales_summary WHERE Brand = 9")
            .await?;
        assert!(out.is_empty());

        // Marque hors référentiel de prix (77) écartée par l'inner join
        let out = connector
            .fetch("SELECT * FROM vendor_sales_summary WHERE Brand = 77")
            .await?;
        assert!(out.is_empty());

        // Unicité de la clé de grain
        let out = connector
            .fetch(
                "SELECT VendorNumber, Brand, COUNT(*) AS n FROM vendor_sales_summary \
                 GROUP BY VendorNumber, Brand HAVING COUNT(*) > 1",
            )
            .await?;
        assert!(out.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_rerun_is_deterministic_and_replaces() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;
        seed_store(&connector).await?;

        let config = SummaryConfig::default();
        let log = RunLog::detached(config.preview_rows);

        run_summary(&connector, &config, &log).await?;
        let first = connector
            .fetch("SELECT * FROM vendor_sales_summary ORDER BY VendorNumber, Brand")
            .await?;

        run_summary(&connector, &config, &log).await?;
        let second = connector
            .fetch("SELECT * FROM vendor_sales_summary ORDER BY VendorNumber, Brand")
            .await?;

        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_source_relation_is_fatal() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;
        // Store vide : aucune des relations sources n'existe
        let config = SummaryConfig::default();
        let log = RunLog::detached(config.preview_rows);

        let result = run_summary(&connector, &config, &log).await;
        assert!(result.is_err());
        Ok(())
    }
}
