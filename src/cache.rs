//! # Bounded LRU memoization cache
//!
//! Fixed-capacity key-value cache that evicts the least recently used
//! stored entry once the configured item count is exceeded. Designed as an
//! in-process memoization layer: no expiry, no byte accounting, no
//! persistence.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                     BoundedLruCache<K, V>                      │
//!   │                                                                │
//!   │   ┌──────────────────────────────────────────────────────────┐ │
//!   │   │  values: FxHashMap<K, V>       (stored entries)          │ │
//!   │   └──────────────────────────────────────────────────────────┘ │
//!   │                                                                │
//!   │   ┌──────────────────────────────────────────────────────────┐ │
//!   │   │  recency: RecencyList<K>       (usage order)             │ │
//!   │   │                                                          │ │
//!   │   │  stale ─► [k3] ◄──► [k1] ◄──► [k2] ◄── fresh             │ │
//!   │   │          (LRU)                (MRU)                      │ │
//!   │   └──────────────────────────────────────────────────────────┘ │
//!   │                                                                │
//!   │   capacity: usize                                              │
//!   └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two maps are decoupled: a key can be *tracked* (have a recency
//! node) without holding a stored value. `touch` and the compatibility
//! write path create such nodes; `get` on a touched-only key refreshes its
//! recency and returns `None`. The stored-entry count is always
//! `values.len()`; recency bookkeeping never feeds the size.
//!
//! ## Control Flow
//!
//! ```text
//!   insert(k, v):  touch recency ─► store value ─► evict while over capacity
//!   get(&k):       known key? ─► touch recency ─► return stored value
//!   remove(&k):    detach recency node ─► drop stored value
//! ```
//!
//! Eviction pops keys from the stale end until the stored-entry count is
//! back within capacity. Touched-only keys encountered at the stale end are
//! discarded in passing; since a single insert adds at most one stored
//! value, at most one stored entry is ever evicted per call.
//!
//! ## Write Modes
//!
//! | Method               | Behavior                                        |
//! |----------------------|-------------------------------------------------|
//! | `insert`             | store, replacing any previous value             |
//! | `merge_insert`       | shallow-merge the patch into the existing value |
//! | `insert_if_nonempty` | store only non-empty values (legacy semantics)  |
//! | `touch`              | refresh recency, store nothing                  |
//!
//! ## Thread Safety
//!
//! - `BoundedLruCache`: **NOT thread-safe**. Single-threaded, fully
//!   synchronous, no operation blocks or yields.
//! - `SharedLruCache` (feature `concurrency`): cloneable handle serializing
//!   every operation through one `parking_lot::Mutex`.

use std::collections::hash_map;
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::RecencyList;
use crate::error::ConfigError;
use crate::traits::{CoreCache, LruCache};
use crate::value::{EmptyValue, ShallowMerge};

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 5;

/// Read-only snapshot of a cache's configuration and occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheInfo {
    /// Maximum number of stored values.
    pub capacity: usize,
    /// Number of currently stored values.
    pub len: usize,
}

/// Fixed-capacity LRU cache over owned keys and values.
///
/// All operations are O(1) plus hashing, except the documented O(n) chain
/// walks ([`peek_lru`](LruCache::peek_lru),
/// [`recency_rank`](LruCache::recency_rank)).
///
/// # Example
///
/// ```
/// use memokit::cache::BoundedLruCache;
/// use memokit::traits::CoreCache;
///
/// let mut cache: BoundedLruCache<&str, u32> = BoundedLruCache::new(2);
///
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// cache.insert("c", 3); // evicts "a"
///
/// assert_eq!(cache.get(&"a"), None);
/// assert_eq!(cache.get(&"b"), Some(&2));
/// assert_eq!(cache.get(&"c"), Some(&3));
/// ```
#[derive(Clone)]
pub struct BoundedLruCache<K, V> {
    values: FxHashMap<K, V>,
    recency: RecencyList<K>,
    capacity: usize,
}

impl<K, V> BoundedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with the given capacity.
    ///
    /// A capacity of 0 is honored, not coerced: such a cache tracks recency
    /// but never stores a value. Use [`try_new`](Self::try_new) to reject
    /// it instead.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            recency: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates a cache with the given capacity, rejecting `capacity == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::cache::BoundedLruCache;
    ///
    /// assert!(BoundedLruCache::<u64, u64>::try_new(16).is_ok());
    /// assert!(BoundedLruCache::<u64, u64>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self::new(capacity))
    }

    /// Shallow-merges `patch` into the value stored for `key` and stores
    /// the result, refreshing the key's recency.
    ///
    /// A missing existing value is treated as `V::default()`, so merging
    /// into an unknown key behaves like inserting the patch. Returns the
    /// merged value as stored, or `None` when nothing was stored
    /// (capacity 0).
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use memokit::cache::BoundedLruCache;
    /// use memokit::traits::CoreCache;
    ///
    /// let mut cache: BoundedLruCache<&str, BTreeMap<&str, i32>> = BoundedLruCache::new(4);
    ///
    /// cache.insert("k", BTreeMap::from([("x", 1)]));
    /// cache.merge_insert("k", BTreeMap::from([("y", 2)]));
    ///
    /// assert_eq!(
    ///     cache.get(&"k"),
    ///     Some(&BTreeMap::from([("x", 1), ("y", 2)])),
    /// );
    /// ```
    pub fn merge_insert(&mut self, key: K, patch: V) -> Option<&V>
    where
        V: ShallowMerge + Default,
    {
        self.recency.touch(&key);
        if self.capacity == 0 {
            return None;
        }

        let mut base = self.values.remove(&key).unwrap_or_default();
        base.shallow_merge(patch);
        self.values.insert(key.clone(), base);

        self.evict_over_capacity();
        self.recency.debug_validate_invariants();
        self.values.get(&key)
    }

    /// Stores `value` only if it is non-empty per [`EmptyValue`];
    /// the key's recency is refreshed either way.
    ///
    /// This is the compatibility form of the legacy write path, which
    /// conflated "no value" with zero, `false`, and the empty string.
    /// Skipped writes store nothing, change no sizes, run no eviction, and
    /// return `None`. Prefer [`insert`](CoreCache::insert) plus
    /// [`touch`](LruCache::touch), which keep the two meanings apart.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::cache::BoundedLruCache;
    /// use memokit::traits::CoreCache;
    ///
    /// let mut cache: BoundedLruCache<&str, u32> = BoundedLruCache::new(4);
    ///
    /// assert_eq!(cache.insert_if_nonempty("k", 0), None);
    /// assert_eq!(cache.get(&"k"), None); // tracked, but nothing stored
    /// assert_eq!(cache.len(), 0);
    ///
    /// assert_eq!(cache.insert_if_nonempty("k", 7), Some(&7));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn insert_if_nonempty(&mut self, key: K, value: V) -> Option<&V>
    where
        V: EmptyValue,
    {
        self.recency.touch(&key);
        if value.is_empty_value() || self.capacity == 0 {
            return None;
        }

        self.values.insert(key.clone(), value);
        self.evict_over_capacity();
        self.recency.debug_validate_invariants();
        self.values.get(&key)
    }

    /// Returns the stored value for `key` without refreshing its recency.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    /// Returns a snapshot of capacity and stored-entry count.
    #[inline]
    pub fn info(&self) -> CacheInfo {
        CacheInfo {
            capacity: self.capacity,
            len: self.values.len(),
        }
    }

    /// Iterates over all stored entries in no particular order.
    ///
    /// The borrowing iterator keeps callers from mutating entries behind
    /// the cache's bookkeeping.
    #[inline]
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.values.iter()
    }

    /// Number of tracked keys, including touched-only ones with no stored
    /// value. Always `>= len()`.
    #[inline]
    pub fn tracked_keys(&self) -> usize {
        self.recency.len()
    }

    /// Pops stale-end keys until the stored-entry count fits the capacity.
    ///
    /// Touched-only keys at the stale end are dropped in passing, so the
    /// loop always terminates: either the count reaches the capacity or the
    /// chain runs out.
    fn evict_over_capacity(&mut self) {
        while self.values.len() > self.capacity {
            match self.recency.pop_stale() {
                Some(stale_key) => {
                    self.values.remove(&stale_key);
                },
                None => break,
            }
        }
    }
}

impl<K, V> CoreCache<K, V> for BoundedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Stores `key` → `value`, replacing any previous value, then evicts
    /// the stale end if the capacity is exceeded.
    ///
    /// Returns the value as stored. With `capacity == 0`, recency is still
    /// refreshed but nothing is stored and `None` is returned.
    fn insert(&mut self, key: K, value: V) -> Option<&V> {
        self.recency.touch(&key);
        if self.capacity == 0 {
            return None;
        }

        self.values.insert(key.clone(), value);
        self.evict_over_capacity();
        self.recency.debug_validate_invariants();
        self.values.get(&key)
    }

    /// Looks up `key`, promoting it to the fresh end on a hit.
    ///
    /// Unknown keys return `None` without creating any bookkeeping. A
    /// tracked key with no stored value (touched-only) also returns `None`,
    /// but its recency is refreshed.
    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.recency.contains(key) {
            return None;
        }
        self.recency.touch(key);
        self.recency.debug_validate_invariants();
        self.values.get(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.values.clear();
        self.recency.clear();
    }
}

impl<K, V> LruCache<K, V> for BoundedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn touch(&mut self, key: &K) -> bool {
        let created = self.recency.touch(key);
        self.recency.debug_validate_invariants();
        created
    }

    /// Removes `key`: detaches its recency node and drops any stored
    /// value. The stored-entry count only decreases when a value was
    /// actually present, so removing a touched-only key cannot desync it.
    fn remove(&mut self, key: &K) -> Option<V> {
        if !self.recency.detach(key) {
            return None;
        }
        self.recency.debug_validate_invariants();
        self.values.remove(key)
    }

    /// Removes and returns the least recently used stored entry, dropping
    /// any touched-only keys that sit staler than it.
    fn pop_lru(&mut self) -> Option<(K, V)> {
        while let Some(stale_key) = self.recency.pop_stale() {
            if let Some(value) = self.values.remove(&stale_key) {
                return Some((stale_key, value));
            }
        }
        None
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.recency
            .iter_stale_first()
            .find_map(|key| self.values.get_key_value(key))
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        self.recency.iter().position(|k| k == key)
    }
}

impl<K, V> Default for BoundedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with [`DEFAULT_CAPACITY`] (5).
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> fmt::Debug for BoundedLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedLruCache")
            .field("len", &self.values.len())
            .field("capacity", &self.capacity)
            .field("tracked_keys", &self.recency.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for BoundedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe shared handle around a [`BoundedLruCache`].
///
/// All mutation is serialized through a single `parking_lot::Mutex`; every
/// clone of the handle refers to the same cache. Value-returning operations
/// clone out of the lock (`V: Clone`), so no borrow ever outlives the
/// critical section.
///
/// # Example
///
/// ```
/// use memokit::cache::SharedLruCache;
///
/// let cache: SharedLruCache<u64, String> = SharedLruCache::new(64);
///
/// let writer = cache.clone();
/// std::thread::spawn(move || {
///     writer.insert(1, "memoized".to_string());
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(cache.get(&1), Some("memoized".to_string()));
/// ```
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct SharedLruCache<K, V> {
    inner: Arc<Mutex<BoundedLruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> SharedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared cache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BoundedLruCache::new(capacity))),
        }
    }

    /// Creates a shared cache, rejecting `capacity == 0`.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(Mutex::new(BoundedLruCache::try_new(capacity)?)),
        })
    }

    /// Stores `key` → `value`. Returns `false` when nothing was stored
    /// (capacity 0).
    pub fn insert(&self, key: K, value: V) -> bool {
        self.inner.lock().insert(key, value).is_some()
    }

    /// Stores `value` only if non-empty per [`EmptyValue`]; recency is
    /// refreshed either way. Returns whether a value was stored.
    pub fn insert_if_nonempty(&self, key: K, value: V) -> bool
    where
        V: EmptyValue,
    {
        self.inner.lock().insert_if_nonempty(key, value).is_some()
    }

    /// Shallow-merges `patch` into the stored value and returns the merged
    /// result.
    pub fn merge_insert(&self, key: K, patch: V) -> Option<V>
    where
        V: ShallowMerge + Default + Clone,
    {
        self.inner.lock().merge_insert(key, patch).cloned()
    }

    /// Looks up `key`, promoting it to the fresh end on a hit.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns the stored value without refreshing recency.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Promotes `key` to the fresh end without storing anything. Returns
    /// `true` when this call created the recency node.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    /// Removes `key`, returning its stored value if one was present.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Removes and returns the least recently used stored entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    /// Returns `true` if a value is stored for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum number of stored values.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns a snapshot of capacity and stored-entry count.
    pub fn info(&self) -> CacheInfo {
        self.inner.lock().info()
    }

    /// Drops every stored value and all recency bookkeeping.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Returns a point-in-time copy of all stored entries, in no
    /// particular order.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .lock()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Default for SharedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared cache with [`DEFAULT_CAPACITY`] (5).
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for SharedLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("SharedLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
