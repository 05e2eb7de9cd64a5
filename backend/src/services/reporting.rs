//! Reporting service for the daily summary and sales export

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::SaleRecord;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Reporting helpers over the sales log
pub struct ReportingService;

/// Flat sales log row for CSV export
#[derive(Debug, Serialize)]
pub struct SaleExportRow {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub product_name: String,
    pub quantity: u32,
    /// `key:amount` pairs separated by `;`
    pub recipe: String,
    pub cancelled: bool,
    pub cancel_reason: String,
}

impl From<&SaleRecord> for SaleExportRow {
    fn from(sale: &SaleRecord) -> Self {
        let recipe = sale
            .recipe_snapshot
            .iter()
            .map(|(key, amount)| format!("{}:{}", key, amount))
            .collect::<Vec<_>>()
            .join(";");

        Self {
            id: sale.id,
            timestamp: sale.timestamp,
            product_name: sale.product_name.clone(),
            quantity: sale.quantity,
            recipe,
            cancelled: sale.cancelled,
            cancel_reason: sale.cancel_reason.clone(),
        }
    }
}

impl ReportingService {
    /// Sales log rows in log order (newest first)
    pub fn sales_rows(sales: &[SaleRecord]) -> Vec<SaleExportRow> {
        sales.iter().map(SaleExportRow::from).collect()
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
