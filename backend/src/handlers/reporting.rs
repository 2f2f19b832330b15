//! Reporting handlers for analytics and data export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::reporting::DashboardMetrics;
use crate::services::ReportingService;
use crate::AppState;
use shared::types::DateRange;

#[derive(Deserialize)]
pub struct ProfitLossQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub format: Option<String>, // "json" or "csv"
}

/// Get dashboard metrics
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardMetrics>> {
    let service = ReportingService::new(state.ledger);
    let metrics = service.dashboard().await?;
    Ok(Json(metrics))
}

/// Get the profit and loss report for a date range
pub async fn get_profit_loss_report(
    State(state): State<AppState>,
    Query(query): Query<ProfitLossQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.ledger);

    let range = DateRange {
        start: query.start_date,
        end: query.end_date,
    };

    let report = service.profit_loss(range).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&report.orders)?;
        Ok((
            [(header::CONTENT_TYPE, "text/csv"), (header::CONTENT_DISPOSITION, "attachment; filename=\"profit_loss.csv\"")],
            csv,
        ).into_response())
    } else {
        Ok(Json(report).into_response())
    }
}
