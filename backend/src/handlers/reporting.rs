//! Reporting handlers for the daily summary and data export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Get the daily report, or the sales log as CSV
pub async fn get_daily_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    if query.format.as_deref() == Some("csv") {
        let sales = state.inventory.sales_log().await;
        let csv = ReportingService::export_to_csv(&ReportingService::sales_rows(&sales))?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"today_sales.csv\""),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(state.inventory.daily_report().await).into_response())
    }
}
