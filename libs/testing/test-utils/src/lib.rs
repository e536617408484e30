//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: migrated in-memory SQLite database (feature: "sql")
//! - `TestDataBuilder`: deterministic test data generation (always available)
//! - `assertions`: custom assertion helpers (always available)
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_repository_test() {
//!     let db = TestDatabase::empty().await;
//!     let builder = TestDataBuilder::from_test_name("my_repository_test");
//!
//!     db.insert_product(builder.product_id(), &builder.name("product", "main"), 10).await;
//! }
//! ```

#[cfg(feature = "sql")]
mod sql;

#[cfg(feature = "sql")]
pub use sql::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Same test name, same data; different tests get different ids.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_remove_stock");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Positive product id above the seeded range (1..=3).
    pub fn product_id(&self) -> i32 {
        1_000 + (self.seed % 1_000_000) as i32
    }

    /// Distinct id derived from the same seed, for multi-product tests.
    pub fn product_id_n(&self, n: u32) -> i32 {
        self.product_id() + n as i32
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("product", "main"), "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert a stock level with the context in the failure message.
    pub fn assert_quantity(actual: i32, expected: i32, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected quantity {}, got {}",
            context, expected, actual
        );
    }
}
