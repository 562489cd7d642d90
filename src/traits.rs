//! Cache trait hierarchy.
//!
//! Two traits split the surface of [`BoundedLruCache`](crate::cache::BoundedLruCache)
//! into the operations any bounded cache supports and the ones that only
//! make sense with recency tracking:
//!
//! ```text
//!   ┌──────────────────────────────────────────┐
//!   │            CoreCache<K, V>               │
//!   │                                          │
//!   │  insert(&mut, K, V) → Option<&V>        │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                  │
//!   │  len(&) → usize                          │
//!   │  is_empty(&) → bool                      │
//!   │  capacity(&) → usize                     │
//!   │  clear(&mut)                             │
//!   └────────────────────┬─────────────────────┘
//!                        │
//!                        ▼
//!   ┌──────────────────────────────────────────┐
//!   │            LruCache<K, V>                │
//!   │                                          │
//!   │  touch(&mut, &K) → bool                  │
//!   │  remove(&mut, &K) → Option<V>            │
//!   │  pop_lru(&mut) → Option<(K, V)>          │
//!   │  peek_lru(&) → Option<(&K, &V)>          │
//!   │  recency_rank(&, &K) → Option<usize>     │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! `get` takes `&mut self`: a recency-tracked read reorders the chain, so
//! even lookups are mutations. Two departures from common map APIs:
//! `insert` returns the value as stored (useful when a write mode
//! transforms it), not the previous one, and `get` may return `None` for a
//! key the cache is tracking (touched but never stored).
//!
//! ## Example Usage
//!
//! ```
//! use memokit::cache::BoundedLruCache;
//! use memokit::traits::{CoreCache, LruCache};
//!
//! // Functions can stay generic over the trait surface.
//! fn warm<C: CoreCache<u64, String>>(cache: &mut C, entries: Vec<(u64, String)>) {
//!     for (key, value) in entries {
//!         cache.insert(key, value);
//!     }
//! }
//!
//! fn refresh_hot_keys<C: LruCache<u64, String>>(cache: &mut C, keys: &[u64]) {
//!     for key in keys {
//!         cache.touch(key);
//!     }
//! }
//!
//! let mut cache: BoundedLruCache<u64, String> = BoundedLruCache::new(8);
//! warm(&mut cache, vec![(1, "one".to_string()), (2, "two".to_string())]);
//! refresh_hot_keys(&mut cache, &[1]);
//! assert_eq!(cache.recency_rank(&1), Some(0));
//! ```

/// Operations every bounded cache supports, regardless of eviction policy.
pub trait CoreCache<K, V> {
    /// Inserts `key` → `value`, evicting if the capacity is exceeded.
    ///
    /// Returns a reference to the value as stored, or `None` when nothing
    /// was stored (capacity 0).
    fn insert(&mut self, key: K, value: V) -> Option<&V>;

    /// Looks up `key`, refreshing its recency. Returns `None` for unknown
    /// keys without recording anything.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if a value is currently stored for `key`. Does not
    /// affect recency.
    fn contains(&self, key: &K) -> bool;

    /// Number of stored values.
    fn len(&self) -> usize;

    /// Returns `true` if no values are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of stored values.
    fn capacity(&self) -> usize;

    /// Drops every stored value and all recency bookkeeping. Capacity is
    /// unaffected.
    fn clear(&mut self);
}

/// Recency-specific operations on top of [`CoreCache`].
pub trait LruCache<K, V>: CoreCache<K, V> {
    /// Promotes `key` to the fresh end without reading or storing a value,
    /// creating its recency node if absent.
    ///
    /// Returns `true` when this call created the node.
    fn touch(&mut self, key: &K) -> bool;

    /// Removes `key`, returning its stored value if one was present.
    /// Unknown keys are a no-op.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes and returns the least recently used stored entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used stored entry without removing it or
    /// refreshing its recency.
    ///
    /// O(n) in the worst case: touched-only keys parked at the stale end
    /// are skipped without being removed.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Returns the position of `key` in the recency chain, 0 being the
    /// fresh end. Counts every tracked key, including touched-only ones.
    ///
    /// O(n): walks the chain from the fresh end.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
