//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, UnprocessableBodyResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{
    InsufficientStockResponse, ProductError, ProductNotFoundResponse, ProductResult,
};
use crate::models::{ProductResponse, StockAdjustment, StockLevelResponse};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, get_product, add_stock, remove_stock),
    components(
        schemas(
            ProductResponse,
            StockAdjustment,
            StockLevelResponse,
            ProductNotFoundResponse,
            InsufficientStockResponse
        ),
        responses(
            ProductNotFoundResponse,
            InsufficientStockResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            UnprocessableBodyResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product stock level endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router; the caller nests it (e.g. under `/products`).
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .route("/{id}/add-stocks", post(add_stock))
        .route("/{id}/remove-stocks", post(remove_stock))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products ordered by ID", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.list_products().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = ProductNotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Add stock to a product
#[utoipa::path(
    post,
    path = "/{id}/add-stocks",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = StockAdjustment,
    responses(
        (status = 200, description = "Stock added", body = StockLevelResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = ProductNotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = UnprocessableBodyResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<StockAdjustment>,
) -> ProductResult<Json<StockLevelResponse>> {
    let result = service.add_stock(id, input.amount).await;
    audit("stock.add", id, input.amount, &result, &headers);

    Ok(Json(StockLevelResponse {
        quantity_in_stock: result?,
    }))
}

/// Remove stock from a product
///
/// Fails with 409 when the product holds fewer units than requested; the
/// stock level is left unchanged.
#[utoipa::path(
    post,
    path = "/{id}/remove-stocks",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = StockAdjustment,
    responses(
        (status = 200, description = "Stock removed", body = StockLevelResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = ProductNotFoundResponse),
        (status = 409, response = InsufficientStockResponse),
        (status = 422, response = UnprocessableBodyResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<StockAdjustment>,
) -> ProductResult<Json<StockLevelResponse>> {
    let result = service.remove_stock(id, input.amount).await;
    audit("stock.remove", id, input.amount, &result, &headers);

    Ok(Json(StockLevelResponse {
        quantity_in_stock: result?,
    }))
}

fn audit(
    action: &str,
    product_id: i32,
    amount: i32,
    result: &ProductResult<i32>,
    headers: &HeaderMap,
) {
    let (outcome, details) = match result {
        Ok(quantity_in_stock) => (
            AuditOutcome::Success,
            json!({"amount": amount, "quantity_in_stock": quantity_in_stock}),
        ),
        Err(ProductError::InsufficientStock {
            quantity_in_stock, ..
        }) => (
            AuditOutcome::Denied,
            json!({"amount": amount, "quantity_in_stock": quantity_in_stock}),
        ),
        Err(e) => (
            AuditOutcome::Failure,
            json!({"amount": amount, "error": e.to_string()}),
        ),
    };

    AuditEvent::new(action, Some(format!("product:{}", product_id)), outcome)
        .with_client(headers)
        .with_details(details)
        .log();
}
