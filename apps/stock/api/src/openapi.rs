//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Stock API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock API",
        version = "0.1.0",
        description = "Product stock levels: list products, add stock, remove stock"
    ),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product stock level endpoints")
    )
)]
pub struct ApiDoc;
