//! Handler tests for the Products domain
//!
//! These exercise only the products router: request parsing, status codes
//! and payload shapes. Routing under `/api/products` belongs to the app.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app_with(products: Vec<Product>) -> Router {
    let repo = InMemoryProductRepository::with_products(products);
    handlers::router(ProductService::new(repo))
}

fn seeded_app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::seeded()))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_products_returns_seed() {
    let response = seeded_app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "Banana", "quantityInStock": 50},
            {"id": 2, "name": "Apple", "quantityInStock": 20},
            {"id": 3, "name": "Habanero Pepper", "quantityInStock": 10}
        ])
    );
}

#[tokio::test]
async fn test_get_product() {
    let app = seeded_app();

    let response = app
        .clone()
        .oneshot(Request::get("/2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let product: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(product.name, "Apple");

    let response = app
        .oneshot(Request::get("/77").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_stock_returns_new_level() {
    let app = app_with(vec![Product::new(4, "Kiwi", 10)]);

    let response = app
        .oneshot(post_json("/4/add-stocks", r#"{"amount": 10}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({"quantityInStock": 20}));
}

#[tokio::test]
async fn test_remove_all_stock_returns_zero() {
    let app = app_with(vec![Product::new(5, "Mango", 10)]);

    let response = app
        .oneshot(post_json("/5/remove-stocks", r#"{"amount": 10}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: StockLevelResponse = json_body(response.into_body()).await;
    assert_eq!(body.quantity_in_stock, 0);
}

#[tokio::test]
async fn test_remove_too_much_returns_409_and_keeps_stock() {
    let app = app_with(vec![Product::new(5, "Mango", 10)]);

    let response = app
        .clone()
        .oneshot(post_json("/5/remove-stocks", r#"{"amount": 11}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["amountToRemove"], 11);
    assert_eq!(body["quantityInStock"], 10);
    assert!(body["message"].is_string());

    let response = app
        .oneshot(Request::get("/5").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let product: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(product.quantity_in_stock, 10);
}

#[tokio::test]
async fn test_unknown_product_returns_404_payload() {
    for uri in ["/404/add-stocks", "/404/remove-stocks"] {
        let response = seeded_app()
            .oneshot(post_json(uri, r#"{"amount": 1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["productId"], 404);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_negative_amount_returns_400() {
    let response = seeded_app()
        .oneshot(post_json("/1/add-stocks", r#"{"amount": -5}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["amount"].is_array());
}

#[tokio::test]
async fn test_non_integer_id_returns_400() {
    let response = seeded_app()
        .oneshot(post_json("/banana/add-stocks", r#"{"amount": 1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_malformed_bodies() {
    let app = seeded_app();

    let response = app
        .clone()
        .oneshot(post_json("/1/add-stocks", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json("/1/add-stocks", r#"{"quantity": 3}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sql_backend_round_trip() {
    let db = TestDatabase::new().await;
    let app = handlers::router(ProductService::new(SeaOrmProductRepository::new(
        db.connection(),
    )));

    let response = app
        .clone()
        .oneshot(post_json("/3/remove-stocks", r#"{"amount": 4}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    assert_eq!(products[2].quantity_in_stock, 6);
    assert_eq!(db.stock_row(3).await, Some((6, 1)));
}
