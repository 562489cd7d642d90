//! Cache construction with validated configuration.
//!
//! Thin configuration layer over the cache constructors. Useful when the
//! capacity comes from user configuration and should be validated, or when
//! the same settings build both a plain and a shared cache.
//!
//! ## Example
//!
//! ```
//! use memokit::builder::CacheBuilder;
//! use memokit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

#[cfg(feature = "concurrency")]
use crate::cache::SharedLruCache;
use crate::cache::{BoundedLruCache, DEFAULT_CAPACITY};
use crate::error::ConfigError;

/// Builder for cache instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Creates a builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Creates a builder with [`DEFAULT_CAPACITY`] (5).
    pub fn with_default_capacity() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Builds a cache, honoring whatever capacity was configured
    /// (including 0, which stores nothing).
    pub fn build<K, V>(self) -> BoundedLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        BoundedLruCache::new(self.capacity)
    }

    /// Builds a cache, rejecting a zero capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::builder::CacheBuilder;
    ///
    /// assert!(CacheBuilder::new(0).try_build::<u64, u64>().is_err());
    /// assert!(CacheBuilder::new(8).try_build::<u64, u64>().is_ok());
    /// ```
    pub fn try_build<K, V>(self) -> Result<BoundedLruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        BoundedLruCache::try_new(self.capacity)
    }

    /// Builds a thread-safe shared cache with the configured capacity.
    #[cfg(feature = "concurrency")]
    pub fn build_shared<K, V>(self) -> SharedLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        SharedLruCache::new(self.capacity)
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
