//! Shared test utilities for domain testing
//!
//! - `TestDataDir`: temporary data directory with automatic cleanup
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust
//! use test_utils::{TestDataBuilder, TestDataDir};
//!
//! let dir = TestDataDir::new();
//! let builder = TestDataBuilder::from_test_name("my_test");
//!
//! let sku = builder.sku("lamp");
//! let name = builder.name("product", "main");
//! assert!(dir.path().is_dir());
//! # let _ = (sku, name);
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory for file-backed stores, removed on drop
pub struct TestDataDir {
    dir: TempDir,
}

impl TestDataDir {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("catalog-test-")
            .tempdir()
            .expect("Failed to create temporary data directory");
        tracing::debug!(path = %dir.path().display(), "Created test data directory");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving every value from a seed.
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
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_add_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique, human-readable name
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("product", "main"), "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Generate an uppercase SKU unique to this builder and tag
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(255);
    /// assert_eq!(builder.sku("lamp"), "LAMP-00000000000000FF");
    /// ```
    pub fn sku(&self, tag: &str) -> String {
        format!("{}-{:016X}", tag.to_uppercase(), self.seed)
    }

    /// Deterministic stock count in `0..upper`
    pub fn stock(&self, upper: i64) -> i64 {
        if upper <= 0 {
            return 0;
        }
        (self.seed % upper as u64) as i64
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a result is Err and return the error
    pub fn assert_err<T: std::fmt::Debug, E>(result: Result<T, E>, context: &str) -> E {
        match result {
            Ok(value) => panic!("{}: expected Err, got Ok({:?})", context, value),
            Err(err) => err,
        }
    }

    /// Assert two id lists are equal, ignoring order
    pub fn assert_same_ids(mut actual: Vec<String>, mut expected: Vec<String>, context: &str) {
        actual.sort();
        expected.sort();
        assert_eq!(actual, expected, "{}: id sets differ", context);
    }
}
