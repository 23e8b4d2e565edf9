use std::collections::BTreeMap;

use axum::{extract::State, response::Response, routing::get, Router};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use super::common::{map_service_error, success_response};
use super::products::ProductResponse;
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::reports::DailyInventoryReport,
};

// Response DTOs

#[derive(Debug, Serialize, ToSchema)]
pub struct CategorySummaryResponse {
    /// Distinct products in the category
    pub count: usize,
    /// Units on hand
    pub items: i64,
    /// Value of those units
    pub value: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyInventoryReportResponse {
    /// UTC calendar date, YYYY-MM-DD
    pub date: String,
    pub total_products: usize,
    pub total_items: i64,
    pub total_value: Decimal,
    pub low_stock_count: usize,
    pub category_summary: BTreeMap<String, CategorySummaryResponse>,
    pub products: Vec<ProductResponse>,
}

impl From<DailyInventoryReport> for DailyInventoryReportResponse {
    fn from(report: DailyInventoryReport) -> Self {
        Self {
            date: report.date,
            total_products: report.summary.total_products,
            total_items: report.summary.total_items,
            total_value: report.summary.total_value,
            low_stock_count: report.summary.low_stock_count,
            category_summary: report
                .summary
                .categories
                .into_iter()
                .map(|(category, rollup)| {
                    (
                        category,
                        CategorySummaryResponse {
                            count: rollup.count,
                            items: rollup.items,
                            value: rollup.value,
                        },
                    )
                })
                .collect(),
            products: report
                .products
                .into_iter()
                .map(ProductResponse::from)
                .collect(),
        }
    }
}

// Handler functions

/// Generate the daily inventory report
#[utoipa::path(
    get,
    path = "/api/reports/daily-inventory",
    tag = "Reports",
    responses(
        (status = 200, description = "Totals, per-category rollup, and the full product list", body = DailyInventoryReportResponse)
    )
)]
pub async fn daily_inventory_report(State(state): State<AppState>) -> Result<Response, ApiError> {
    let report = state
        .services
        .reports
        .daily_inventory()
        .await
        .map_err(map_service_error)?;

    info!(date = %report.date, "Generated daily inventory report");

    Ok(success_response(DailyInventoryReportResponse::from(report)))
}

/// Creates the router for report endpoints
pub fn report_routes() -> Router<AppState> {
    Router::new().route("/daily-inventory", get(daily_inventory_report))
}
