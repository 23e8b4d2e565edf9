mod common;

use axum::http::Method;
use serde_json::{json, Value};

use common::{response_json, TestApp};

async fn add_product(app: &TestApp, name: &str, category: &str, quantity: i32, price: f64) -> Value {
    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": name,
                "category": category,
                "quantity": quantity,
                "price": price,
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    response_json(response).await
}

#[tokio::test]
async fn product_crud_lifecycle() {
    let app = TestApp::new().await;

    // Create assigns an id and echoes the submitted values
    let created = add_product(&app, "Laptop Computer", "Electronics", 15, 899.99).await;
    let id = created["id"].as_i64().expect("assigned id");
    assert!(id >= 1);
    assert_eq!(created["name"], "Laptop Computer");
    assert_eq!(created["category"], "Electronics");
    assert_eq!(created["quantity"], 15);
    assert_eq!(created["price"], "899.99");
    assert_eq!(created["stock_status"], "Medium Stock");
    assert!(created["created_at"].is_string());

    // The new product shows up in the list
    let response = app.request(Method::GET, "/api/products", None).await;
    assert_eq!(response.status(), 200);
    let listed = response_json(response).await;
    let listed = listed.as_array().expect("product array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id);

    // Full replace refreshes every mutable field and the update timestamp
    let response = app
        .request(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(json!({
                "name": "Laptop Computer (refurb)",
                "category": "Electronics",
                "quantity": 2,
                "price": 649.99,
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Laptop Computer (refurb)");
    assert_eq!(updated["quantity"], 2);
    assert_eq!(updated["price"], "649.99");
    assert_eq!(updated["stock_status"], "Low Stock");
    assert!(updated["updated_at"].is_string());

    // Delete removes the row from subsequent lists
    let response = app
        .request(Method::DELETE, &format!("/api/products/{id}"), None)
        .await;
    assert_eq!(response.status(), 200);
    let deleted = response_json(response).await;
    assert_eq!(deleted["message"], "Product deleted successfully");

    let response = app.request(Method::GET, "/api/products", None).await;
    let listed = response_json(response).await;
    assert!(listed.as_array().expect("product array").is_empty());
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = TestApp::new().await;

    let first = add_product(&app, "Desk Lamp", "Furniture", 8, 39.99).await;
    let second = add_product(&app, "Pen Set", "Stationery", 25, 8.99).await;

    let response = app.request(Method::GET, "/api/products", None).await;
    let listed = response_json(response).await;
    let listed = listed.as_array().expect("product array");

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], second["id"]);
    assert_eq!(listed[1]["id"], first["id"]);
}

#[tokio::test]
async fn low_stock_filters_and_sorts_by_quantity() {
    let app = TestApp::new().await;

    add_product(&app, "Office Chair", "Furniture", 3, 249.99).await;
    add_product(&app, "Keyboard", "Electronics", 10, 79.99).await;
    add_product(&app, "Pen Set", "Stationery", 20, 8.99).await;

    // Default threshold is 5
    let response = app
        .request(Method::GET, "/api/products/low-stock", None)
        .await;
    assert_eq!(response.status(), 200);
    let low = response_json(response).await;
    let low = low.as_array().expect("product array");
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["name"], "Office Chair");
    assert_eq!(low[0]["stock_status"], "Low Stock");

    // Explicit threshold widens the net; emptiest products come first
    let response = app
        .request(Method::GET, "/api/products/low-stock?threshold=12", None)
        .await;
    assert_eq!(response.status(), 200);
    let low = response_json(response).await;
    let low = low.as_array().expect("product array");
    assert_eq!(low.len(), 2);
    assert_eq!(low[0]["quantity"], 3);
    assert_eq!(low[1]["quantity"], 10);
}

#[tokio::test]
async fn low_stock_rejects_unparseable_threshold() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/products/low-stock?threshold=plenty", None)
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({"name": "Monitor 24\""})),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert_eq!(body["error"], "All fields are required");

    // Nothing was stored
    let response = app.request(Method::GET, "/api/products", None).await;
    let listed = response_json(response).await;
    assert!(listed.as_array().expect("product array").is_empty());
}

#[tokio::test]
async fn create_with_negative_quantity_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "Notebook Pack",
                "category": "Stationery",
                "quantity": -1,
                "price": 12.99,
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("Validation failed"));
}

#[tokio::test]
async fn update_unknown_id_returns_not_found_and_mutates_nothing() {
    let app = TestApp::new().await;

    let existing = add_product(&app, "Wireless Mouse", "Electronics", 5, 29.99).await;

    let response = app
        .request(
            Method::PUT,
            "/api/products/9999",
            Some(json!({
                "name": "Wireless Mouse",
                "category": "Electronics",
                "quantity": 50,
                "price": 29.99,
            })),
        )
        .await;
    assert_eq!(response.status(), 404);
    let body = response_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("not found"));

    // The existing row is untouched
    let response = app.request(Method::GET, "/api/products", None).await;
    let listed = response_json(response).await;
    let listed = listed.as_array().expect("product array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], existing["id"]);
    assert_eq!(listed[0]["quantity"], 5);
}

#[tokio::test]
async fn delete_unknown_id_returns_not_found() {
    let app = TestApp::new().await;

    let response = app.request(Method::DELETE, "/api/products/9999", None).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/products", None).await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("request id header");
    assert!(!request_id.to_str().unwrap().is_empty());
}
