// brandledger-core/src/application/aggregation.rs
//
// Aggregation Engine : trois agrégations indépendantes (freight par vendeur,
// achats par vendeur/marque, ventes par vendeur/marque) combinées par
// left outer join, côté achats conducteur. Exécutée en une seule requête
// CTE à travers le port.

use crate::domain::table::Table;
use crate::error::SummaryError;
use crate::ports::connector::StoreConnector;

pub struct Aggregator;

impl Aggregator {
    /// Le grain de sortie est la clé de groupage achats : un vendeur/marque
    /// présent uniquement côté ventes ou freight est écarté (choix assumé).
    /// Une marque absente du référentiel de prix est silencieusement
    /// écartée (inner join). ORDER BY TotalPurchaseDollars DESC est un
    /// contrat de présentation à reproduire tel quel.
    ///
    /// SUM(Sales_Price) additionne un prix unitaire par transaction, pas une
    /// moyenne. Conservé tel quel pour parité de sortie du rapport.
    pub const SUMMARY_QUERY: &'static str = "\
WITH freight_summary AS (
    SELECT
        VendorNumber,
        SUM(Freight) AS FreightCost
    FROM vendor_invoice
    GROUP BY VendorNumber
),

purchase_summary AS (
    SELECT
        p.VendorNumber,
        p.VendorName,
        p.Brand,
        p.Description,
        p.PurchasePrice,
        pp.Price AS ActualPrice,
        pp.Volume,
        SUM(p.Quantity) AS TotalPurchaseQuantity,
        SUM(p.Dollars) AS TotalPurchaseDollars
    FROM purchases p
    JOIN purchase_prices pp
        ON p.Brand = pp.Brand
    WHERE p.PurchasePrice > 0
    GROUP BY p.VendorNumber, p.VendorName, p.Brand, p.Description, p.PurchasePrice, pp.Price, pp.Volume
),

sales_summary AS (
    SELECT
        VendorNo,
        Brand,
        SUM(Sales_Quantity) AS TotalSalesQuantity,
        SUM(Sales_Dollars) AS TotalSalesDollars,
        SUM(Sales_Price) AS TotalSalesPrice,
        SUM(Excise_Tax) AS TotalExciseTax
    FROM sales
    GROUP BY VendorNo, Brand
)

SELECT
    ps.VendorNumber,
    ps.VendorName,
    ps.Brand,
    ps.Description,
    ps.PurchasePrice,
    ps.ActualPrice,
    ps.Volume,
    ps.TotalPurchaseQuantity,
    ps.TotalPurchaseDollars,
    ss.TotalSalesQuantity,
    ss.TotalSalesDollars,
    ss.TotalSalesPrice,
    ss.TotalExciseTax,
    fs.FreightCost
FROM purchase_summary ps
LEFT JOIN sales_summary ss
    ON ps.VendorNumber = ss.VendorNo
    AND ps.Brand = ss.Brand
LEFT JOIN freight_summary fs
    ON ps.VendorNumber = fs.VendorNumber
ORDER BY ps.TotalPurchaseDollars DESC";

    /// Fetches the joined row set. Unmatched sales/freight measures arrive
    /// as NULL here; the deriver resolves them.
    pub async fn aggregate(connector: &dyn StoreConnector) -> Result<Table, SummaryError> {
        connector.fetch(Self::SUMMARY_QUERY).await
    }
}
