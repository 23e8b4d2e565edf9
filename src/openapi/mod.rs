use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::handlers::{products, reports};
use crate::stock::StockStatus;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stocktrack API",
        description = r#"
REST backend for a small inventory-management application.

Products are simple rows (name, category, quantity, price); the API covers
CRUD over them, a low-stock filter, and a daily inventory report with
per-category rollups. Errors come back as a JSON object whose `error`
field carries the message, plus a request id for log correlation.
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        crate::handlers::products::list_products,
        crate::handlers::products::low_stock_products,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::reports::daily_inventory_report,
        crate::handlers::health::liveness_check,
        crate::handlers::health::readiness_check,
    ),
    components(schemas(
        products::ProductPayload,
        products::ProductResponse,
        products::DeleteProductResponse,
        reports::DailyInventoryReportResponse,
        reports::CategorySummaryResponse,
        StockStatus,
        ErrorResponse,
    )),
    tags(
        (name = "Products", description = "Product CRUD endpoints"),
        (name = "Reports", description = "Inventory reporting endpoints"),
        (name = "Health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the generated document from
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
