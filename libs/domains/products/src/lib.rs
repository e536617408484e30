//! Products Domain
//!
//! Stock levels for a small product catalog: list products, add stock and
//! remove stock without ever letting a quantity go negative.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Stock rules, metrics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and sea-orm implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! Every write goes through [`ProductRepository::save`], a compare-and-swap
//! on the product's `version`: two requests that read the same snapshot
//! cannot both commit.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let service = ProductService::new(InMemoryProductRepository::seeded());
//! let router = handlers::router(service);
//! ```
//!
//! With a SQL backend:
//!
//! ```rust,no_run
//! use domain_products::{handlers, ProductService, SeaOrmProductRepository};
//! use sea_orm::DatabaseConnection;
//!
//! # fn example(db: DatabaseConnection) {
//! let service = ProductService::new(SeaOrmProductRepository::new(db));
//! let router = handlers::router(service);
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{Product, ProductResponse, StockAdjustment, StockLevelResponse};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use sql::SeaOrmProductRepository;
