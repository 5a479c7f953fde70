// brandledger-core/src/domain/summary.rs
//
// Le grain de sortie : une ligne par clé d'agrégation achats
// (VendorNumber, VendorName, Brand, Description, PurchasePrice, ActualPrice, Volume).

use crate::domain::table::{ColumnType, Table, Value};

/// One denormalized output row of the `vendor_sales_summary` relation.
///
/// Measures are `f64` because unmatched joins are zero-filled and the derived
/// ratios are allowed to be non-finite (inf/NaN on zero denominators).
#[derive(Debug, Clone, PartialEq)]
pub struct VendorBrandSummary {
    pub vendor_number: i64,
    pub vendor_name: String,
    pub brand: i64,
    pub description: String,
    pub purchase_price: f64,
    pub actual_price: f64,
    pub volume: f64,
    pub total_purchase_quantity: f64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: f64,
    pub total_sales_dollars: f64,
    pub total_sales_price: f64,
    pub total_excise_tax: f64,
    pub freight_cost: f64,
    pub gross_profit: f64,
    pub profit_margin: f64,
    pub stock_turnover: f64,
    pub sales_to_purchase_ratio: f64,
}

/// Output schema, in persisted column order.
pub const SUMMARY_COLUMNS: [(&str, ColumnType); 18] = [
    ("VendorNumber", ColumnType::Integer),
    ("VendorName", ColumnType::Text),
    ("Brand", ColumnType::Integer),
    ("Description", ColumnType::Text),
    ("PurchasePrice", ColumnType::Real),
    ("ActualPrice", ColumnType::Real),
    ("Volume", ColumnType::Real),
    ("TotalPurchaseQuantity", ColumnType::Real),
    ("TotalPurchaseDollars", ColumnType::Real),
    ("TotalSalesQuantity", ColumnType::Real),
    ("TotalSalesDollars", ColumnType::Real),
    ("TotalSalesPrice", ColumnType::Real),
    ("TotalExciseTax", ColumnType::Real),
    ("FreightCost", ColumnType::Real),
    ("GrossProfit", ColumnType::Real),
    ("ProfitMargin", ColumnType::Real),
    ("StockTurnover", ColumnType::Real),
    ("SalesToPurchaseRatio", ColumnType::Real),
];

impl VendorBrandSummary {
    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.vendor_number),
            Value::Text(self.vendor_name.clone()),
            Value::Integer(self.brand),
            Value::Text(self.description.clone()),
            Value::Real(self.purchase_price),
            Value::Real(self.actual_price),
            Value::Real(self.volume),
            Value::Real(self.total_purchase_quantity),
            Value::Real(self.total_purchase_dollars),
            Value::Real(self.total_sales_quantity),
            Value::Real(self.total_sales_dollars),
            Value::Real(self.total_sales_price),
            Value::Real(self.total_excise_tax),
            Value::Real(self.freight_cost),
            Value::Real(self.gross_profit),
            Value::Real(self.profit_margin),
            Value::Real(self.stock_turnover),
            Value::Real(self.sales_to_purchase_ratio),
        ]
    }
}

/// Converts the derived rows into the tabular shape the store port ingests.
/// Row order is preserved (presentation contract: TotalPurchaseDollars desc).
pub fn summary_to_table(rows: &[VendorBrandSummary]) -> Table {
    let mut table = Table::new(
        SUMMARY_COLUMNS.iter().map(|(n, _)| (*n).to_string()).collect(),
        SUMMARY_COLUMNS.iter().map(|(_, t)| *t).collect(),
    );
    table.rows = rows.iter().map(VendorBrandSummary::to_row).collect();
    table
}
