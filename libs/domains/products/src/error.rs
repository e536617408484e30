use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use serde::Serialize;
use thiserror::Error;
use utoipa::{ToResponse, ToSchema};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {product_id} not found")]
    NotFound { product_id: i32 },

    #[error(
        "Cannot remove {amount_requested} units from product {product_id}: only {quantity_in_stock} in stock"
    )]
    InsufficientStock {
        product_id: i32,
        amount_requested: i32,
        quantity_in_stock: i32,
    },

    #[error("Product {product_id} was modified concurrently, retry the request")]
    ConcurrentModification { product_id: i32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// 404 payload for an unknown product
#[derive(Debug, Serialize, ToSchema, ToResponse)]
#[serde(rename_all = "camelCase")]
#[response(description = "Product not found")]
pub struct ProductNotFoundResponse {
    #[schema(example = 42)]
    pub product_id: i32,
    #[schema(example = "Product 42 not found")]
    pub message: String,
}

/// 409 payload when a removal exceeds the stock level
#[derive(Debug, Serialize, ToSchema, ToResponse)]
#[serde(rename_all = "camelCase")]
#[response(description = "Not enough stock to remove the requested amount")]
pub struct InsufficientStockResponse {
    #[schema(example = 11)]
    pub amount_to_remove: i32,
    #[schema(example = 10)]
    pub quantity_in_stock: i32,
    #[schema(example = "Cannot remove 11 units from product 3: only 10 in stock")]
    pub message: String,
}

/// Errors without a domain payload use the shared `ErrorResponse` shape
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound { .. } => AppError::NotFound(err.to_string()),
            ProductError::InsufficientStock { .. } => AppError::Conflict(err.to_string()),
            ProductError::ConcurrentModification { .. } => AppError::Conflict(err.to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Internal(format!("Database error: {}", err))
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound { product_id } => {
                tracing::info!(product_id, "Product not found");
                let body = ProductNotFoundResponse {
                    product_id,
                    message: self.to_string(),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ProductError::InsufficientStock {
                amount_requested,
                quantity_in_stock,
                ..
            } => {
                tracing::info!(amount_requested, quantity_in_stock, "Insufficient stock");
                let body = InsufficientStockResponse {
                    amount_to_remove: amount_requested,
                    quantity_in_stock,
                    message: self.to_string(),
                };
                (StatusCode::CONFLICT, Json(body)).into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}
