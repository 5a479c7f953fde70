// brandledger-core/src/domain/deriver.rs
//
// Metric Deriver : post-traitement du row set joint produit par l'agrégation.
// L'ordre des étapes compte : coercition -> remplissage des nulls ->
// trim des libellés -> calcul des ratios (qui lisent des colonnes
// potentiellement remplies à 0).

use crate::domain::error::DomainError;
use crate::domain::summary::VendorBrandSummary;
use crate::domain::table::{Table, Value};

/// Raw (pre-derivation) columns expected from the aggregation query.
const RAW_COLUMNS: [&str; 14] = [
    "VendorNumber",
    "VendorName",
    "Brand",
    "Description",
    "PurchasePrice",
    "ActualPrice",
    "Volume",
    "TotalPurchaseQuantity",
    "TotalPurchaseDollars",
    "TotalSalesQuantity",
    "TotalSalesDollars",
    "TotalSalesPrice",
    "TotalExciseTax",
    "FreightCost",
];

/// Turns the joined row set into the final summary rows.
///
/// Null measures from the left joins become 0. Volume may arrive as text
/// from the price reference and is coerced to a real; a non-numeric value is
/// a fatal conversion error, no partial-row recovery. Zero denominators in
/// the ratios are NOT guarded: the resulting inf/NaN is part of the output
/// contract.
pub fn derive_summary(raw: &Table) -> Result<Vec<VendorBrandSummary>, DomainError> {
    raw.check_shape()?;

    // Résolution des index une seule fois (erreur claire si le schéma dérive)
    let mut idx = [0usize; RAW_COLUMNS.len()];
    for (slot, name) in idx.iter_mut().zip(RAW_COLUMNS) {
        *slot = raw.column_index(name)?;
    }

    let mut out = Vec::with_capacity(raw.len());
    for row in &raw.rows {
        let vendor_number = integer_cell(&row[idx[0]], RAW_COLUMNS[0])?;
        let vendor_name = text_cell(&row[idx[1]]);
        let brand = integer_cell(&row[idx[2]], RAW_COLUMNS[2])?;
        let description = text_cell(&row[idx[3]]);
        let purchase_price = real_cell(&row[idx[4]], RAW_COLUMNS[4])?;
        let actual_price = real_cell(&row[idx[5]], RAW_COLUMNS[5])?;
        let volume = real_cell(&row[idx[6]], RAW_COLUMNS[6])?;
        let total_purchase_quantity = real_cell(&row[idx[7]], RAW_COLUMNS[7])?;
        let total_purchase_dollars = real_cell(&row[idx[8]], RAW_COLUMNS[8])?;
        let total_sales_quantity = real_cell(&row[idx[9]], RAW_COLUMNS[9])?;
        let total_sales_dollars = real_cell(&row[idx[10]], RAW_COLUMNS[10])?;
        let total_sales_price = real_cell(&row[idx[11]], RAW_COLUMNS[11])?;
        let total_excise_tax = real_cell(&row[idx[12]], RAW_COLUMNS[12])?;
        let freight_cost = real_cell(&row[idx[13]], RAW_COLUMNS[13])?;

        // Ratios volontairement non gardés : dénominateur nul => inf/NaN
        let gross_profit = total_sales_dollars - total_purchase_dollars;
        let profit_margin = (gross_profit / total_sales_dollars) * 100.0;
        let stock_turnover = total_sales_quantity / total_purchase_quantity;
        let sales_to_purchase_ratio = total_sales_dollars / total_purchase_dollars;

        out.push(VendorBrandSummary {
            vendor_number,
            vendor_name: vendor_name.trim().to_string(),
            brand,
            description: description.trim().to_string(),
            purchase_price,
            actual_price,
            volume,
            total_purchase_quantity,
            total_purchase_dollars,
            total_sales_quantity,
            total_sales_dollars,
            total_sales_price,
            total_excise_tax,
            freight_cost,
            gross_profit,
            profit_margin,
            stock_turnover,
            sales_to_purchase_ratio,
        });
    }

    Ok(out)
}

// --- COERCITION DES CELLULES ---

/// Null -> 0.0 (politique fillna), texte numérique -> parse, sinon fatal.
fn real_cell(value: &Value, column: &str) -> Result<f64, DomainError> {
    match value {
        Value::Null => Ok(0.0),
        Value::Integer(i) => Ok(*i as f64),
        Value::Real(r) => Ok(*r),
        Value::Text(s) => s.trim().parse::<f64>().map_err(|_| DomainError::Coercion {
            column: column.to_string(),
            value: s.clone(),
        }),
    }
}

fn integer_cell(value: &Value, column: &str) -> Result<i64, DomainError> {
    match value {
        Value::Null => Ok(0),
        Value::Integer(i) => Ok(*i),
        Value::Real(r) => Ok(*r as i64),
        Value::Text(s) => s.trim().parse::<i64>().map_err(|_| DomainError::Coercion {
            column: column.to_string(),
            value: s.clone(),
        }),
    }
}

/// fillna(0) s'applique aussi aux colonnes texte : un libellé absent devient "0".
fn text_cell(value: &Value) -> String {
    match value {
        Value::Null => "0".to_string(),
        other => other.to_string(),
    }
}
