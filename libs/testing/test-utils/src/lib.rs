//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the schema applied and automatic cleanup
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let title = builder.title("main");
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// The same test name always yields the same values, so failures reproduce.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_task");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("task", "main"), "test-task-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A task title unique to this builder
    pub fn title(&self, suffix: &str) -> String {
        self.name("task", suffix)
    }

    /// A description that mentions the title it belongs to
    pub fn description(&self, suffix: &str) -> String {
        format!("Description of {}", self.title(suffix))
    }

    /// An id no test row will ever get from the sequence
    pub fn missing_id(&self) -> i64 {
        i64::MAX - (self.seed % 1_000) as i64
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert `earlier <= later`, e.g. creation before last update
    pub fn assert_not_after<T: PartialOrd + Debug>(earlier: T, later: T, context: &str) {
        assert!(
            earlier <= later,
            "{}: expected {:?} <= {:?}",
            context,
            earlier,
            later
        );
    }
}
