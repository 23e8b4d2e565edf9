use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::common::{
    created_response, map_json_rejection, map_query_rejection, map_service_error, success_response,
    validate_input,
};
use crate::{
    entities::product,
    errors::{ApiError, ErrorResponse},
    handlers::AppState,
    services::products::ProductInput,
    stock::{StockStatus, LOW_STOCK_THRESHOLD},
};

// Request and response DTOs

/// Body of create and full-replace update calls.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: String,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,

    #[validate(custom = "validate_price")]
    pub price: Decimal,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price < &Decimal::ZERO {
        return Err(ValidationError::new("price_cannot_be_negative"));
    }
    Ok(())
}

impl From<ProductPayload> for ProductInput {
    fn from(payload: ProductPayload) -> Self {
        ProductInput {
            name: payload.name,
            category: payload.category,
            quantity: payload.quantity,
            price: payload.price,
        }
    }
}

/// Product row as returned to clients, with the derived stock band.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: Decimal,
    pub stock_status: StockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        let stock_status = model.stock_status();
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            quantity: model.quantity,
            price: model.price,
            stock_status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LowStockParams {
    /// Inclusive quantity threshold; defaults to 5
    pub threshold: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteProductResponse {
    pub message: String,
}

// Handler functions

/// List every product, newest first
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products, newest first", body = [ProductResponse])
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Response, ApiError> {
    let products = state
        .services
        .products
        .list_products()
        .await
        .map_err(map_service_error)?;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    Ok(success_response(response))
}

/// List products at or below a quantity threshold
#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Products",
    params(LowStockParams),
    responses(
        (status = 200, description = "Products at or below the threshold, emptiest first", body = [ProductResponse]),
        (status = 400, description = "Unparseable threshold", body = ErrorResponse)
    )
)]
pub async fn low_stock_products(
    State(state): State<AppState>,
    params: Result<Query<LowStockParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(map_query_rejection)?;
    let threshold = params.threshold.unwrap_or(LOW_STOCK_THRESHOLD);

    let products = state
        .services
        .products
        .low_stock_products(threshold)
        .await
        .map_err(map_service_error)?;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

    Ok(success_response(response))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Stored product with its assigned id", body = ProductResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(map_json_rejection)?;
    validate_input(&payload)?;

    let created = state
        .services
        .products
        .create_product(payload.into())
        .await
        .map_err(map_service_error)?;

    info!(product_id = created.id, "Created product");

    Ok(created_response(ProductResponse::from(created)))
}

/// Replace an existing product's fields
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "Unknown product id", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(map_json_rejection)?;
    validate_input(&payload)?;

    let updated = state
        .services
        .products
        .update_product(id, payload.into())
        .await
        .map_err(map_service_error)?;

    info!(product_id = id, "Updated product");

    Ok(success_response(ProductResponse::from(updated)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product removed", body = DeleteProductResponse),
        (status = 404, description = "Unknown product id", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state
        .services
        .products
        .delete_product(id)
        .await
        .map_err(map_service_error)?;

    info!(product_id = id, "Deleted product");

    Ok(success_response(DeleteProductResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// Creates the router for product endpoints
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/low-stock", get(low_stock_products))
        .route("/:id", axum::routing::put(update_product).delete(delete_product))
}
