//! Intrusive doubly linked recency chain keyed by cache key.
//!
//! Tracks usage order for a set of keys, from the stale (least recently
//! used) end to the fresh (most recently used) end. The key→node map acts
//! as the arena: nodes link to their neighbors by `Option<K>` key
//! references, never by owning pointers, so the chain carries no reference
//! cycles and no unsafe code.
//!
//! ## Architecture
//!
//! ```text
//!   nodes (FxHashMap<K, RecencyNode<K>>)
//!   ┌───────┬──────────────────────────────────────────────┐
//!   │  Key  │ RecencyNode { prev, next }                   │
//!   ├───────┼──────────────────────────────────────────────┤
//!   │  "a"  │ { prev: None,      next: Some("b") }         │
//!   │  "b"  │ { prev: Some("a"), next: Some("c") }         │
//!   │  "c"  │ { prev: Some("b"), next: None }              │
//!   └───────┴──────────────────────────────────────────────┘
//!
//!   stale ─► ["a"] ◄──► ["b"] ◄──► ["c"] ◄── fresh
//!           (LRU)                  (MRU)
//! ```
//!
//! ## Operations
//! - `touch(&key)`: promote to the fresh end, creating the node if absent
//! - `detach(&key)`: unlink and drop the node, fully relinking neighbors
//! - `pop_stale()`: detach the stale end and return its key
//!
//! All three are O(1) plus hashing. `check_invariants()` and
//! `debug_validate_invariants()` are available for tests and debug builds.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::InvariantError;

/// Per-key bookkeeping record: position in the usage-order chain.
///
/// `prev` points toward the staler neighbor, `next` toward the fresher one.
/// A node with `prev == None` is the stale end; `next == None` is the fresh
/// end.
#[derive(Debug, Clone)]
struct RecencyNode<K> {
    prev: Option<K>,
    next: Option<K>,
}

/// Usage-order chain over a set of keys, stale end to fresh end.
///
/// # Example
///
/// ```
/// use memokit::ds::RecencyList;
///
/// let mut list: RecencyList<&str> = RecencyList::new();
/// list.touch(&"a");
/// list.touch(&"b");
/// list.touch(&"a"); // promotes "a" past "b"
///
/// assert_eq!(list.fresh(), Some(&"a"));
/// assert_eq!(list.stale(), Some(&"b"));
/// ```
#[derive(Debug, Clone)]
pub struct RecencyList<K> {
    nodes: FxHashMap<K, RecencyNode<K>>,
    fresh: Option<K>,
    stale: Option<K>,
}

impl<K> RecencyList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
            fresh: None,
            stale: None,
        }
    }

    /// Creates an empty chain with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            fresh: None,
            stale: None,
        }
    }

    /// Returns the number of tracked keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no keys are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `key` has a node in the chain.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Returns the key at the fresh (MRU) end.
    #[inline]
    pub fn fresh(&self) -> Option<&K> {
        self.fresh.as_ref()
    }

    /// Returns the key at the stale (LRU) end.
    #[inline]
    pub fn stale(&self) -> Option<&K> {
        self.stale.as_ref()
    }

    /// Promotes `key` to the fresh end, creating its node if absent.
    ///
    /// No-op when `key` is already the fresh end. Returns `true` when this
    /// call created the node.
    pub fn touch(&mut self, key: &K) -> bool {
        if self.fresh.as_ref() == Some(key) {
            return false;
        }

        let created = if self.nodes.contains_key(key) {
            self.unlink(key);
            false
        } else {
            self.nodes.insert(
                key.clone(),
                RecencyNode {
                    prev: None,
                    next: None,
                },
            );
            true
        };

        match self.fresh.take() {
            Some(old_fresh) => {
                if let Some(node) = self.nodes.get_mut(&old_fresh) {
                    node.next = Some(key.clone());
                }
                if let Some(node) = self.nodes.get_mut(key) {
                    node.prev = Some(old_fresh);
                    node.next = None;
                }
                self.fresh = Some(key.clone());
            },
            None => {
                // Chain was empty (or became empty after unlinking the sole
                // node); the touched key is both ends.
                self.fresh = Some(key.clone());
                self.stale = Some(key.clone());
            },
        }

        created
    }

    /// Removes the node for `key`, relinking its neighbors directly to each
    /// other. Returns `false` if `key` is not tracked.
    ///
    /// Interior removals relink both neighbors; end removals advance the
    /// corresponding end reference.
    pub fn detach(&mut self, key: &K) -> bool {
        if !self.nodes.contains_key(key) {
            return false;
        }
        self.unlink(key);
        self.nodes.remove(key);
        true
    }

    /// Detaches the stale-end node and returns its key.
    pub fn pop_stale(&mut self) -> Option<K> {
        let key = self.stale.clone()?;
        self.unlink(&key);
        self.nodes.remove(&key);
        Some(key)
    }

    /// Drops every node and resets both ends.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.fresh = None;
        self.stale = None;
    }

    /// Returns an iterator over keys from the fresh end to the stale end.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            current: self.fresh.as_ref(),
        }
    }

    /// Returns an iterator over keys from the stale end to the fresh end.
    pub fn iter_stale_first(&self) -> StaleFirstIter<'_, K> {
        StaleFirstIter {
            list: self,
            current: self.stale.as_ref(),
        }
    }

    /// Unlinks `key` from the chain while keeping its node in the map.
    ///
    /// Both neighbors are relinked to each other; `fresh`/`stale` advance
    /// when the unlinked node was an end.
    fn unlink(&mut self, key: &K) {
        let (prev, next) = match self.nodes.get(key) {
            Some(node) => (node.prev.clone(), node.next.clone()),
            None => return,
        };

        match &prev {
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(p) {
                    node.next = next.clone();
                }
            },
            None => self.stale = next.clone(),
        }

        match &next {
            Some(n) => {
                if let Some(node) = self.nodes.get_mut(n) {
                    node.prev = prev.clone();
                }
            },
            None => self.fresh = prev.clone(),
        }

        if let Some(node) = self.nodes.get_mut(key) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Verifies chain integrity, returning a description of the first
    /// violated invariant.
    ///
    /// Checked invariants:
    /// - both ends are `None` iff the node map is empty
    /// - the stale end has no `prev`, the fresh end has no `next`
    /// - walking `next` from the stale end visits every node exactly once
    ///   and terminates at the fresh end
    /// - every `prev` reference mirrors the forward link
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.nodes.is_empty() {
            if self.fresh.is_some() || self.stale.is_some() {
                return Err(InvariantError::new("ends set on an empty chain"));
            }
            return Ok(());
        }

        let stale = self
            .stale
            .as_ref()
            .ok_or_else(|| InvariantError::new("stale end missing on a non-empty chain"))?;
        let fresh = self
            .fresh
            .as_ref()
            .ok_or_else(|| InvariantError::new("fresh end missing on a non-empty chain"))?;

        if self
            .nodes
            .get(stale)
            .is_some_and(|node| node.prev.is_some())
        {
            return Err(InvariantError::new("stale end has a staler neighbor"));
        }
        if self
            .nodes
            .get(fresh)
            .is_some_and(|node| node.next.is_some())
        {
            return Err(InvariantError::new("fresh end has a fresher neighbor"));
        }

        let mut visited = 0usize;
        let mut prev_key: Option<&K> = None;
        let mut current = Some(stale);
        while let Some(key) = current {
            let node = self
                .nodes
                .get(key)
                .ok_or_else(|| InvariantError::new("chain references an untracked key"))?;
            if node.prev.as_ref() != prev_key {
                return Err(InvariantError::new("backward link does not mirror forward link"));
            }
            visited += 1;
            if visited > self.nodes.len() {
                return Err(InvariantError::new("cycle detected in chain"));
            }
            prev_key = Some(key);
            current = node.next.as_ref();
        }

        if prev_key != Some(fresh) {
            return Err(InvariantError::new("walk from stale end does not reach fresh end"));
        }
        if visited != self.nodes.len() {
            return Err(InvariantError::new("chain does not visit every tracked key"));
        }

        Ok(())
    }

    /// Panics on invariant violation in debug builds; no-op in release.
    #[inline]
    pub fn debug_validate_invariants(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            panic!("recency chain invariant violated: {err}");
        }
    }
}

impl<K> Default for RecencyList<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over tracked keys, fresh end to stale end.
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    current: Option<&'a K>,
}

impl<'a, K> Iterator for Iter<'a, K>
where
    K: Eq + Hash + Clone,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let key = self.current?;
        self.current = self.list.nodes.get(key).and_then(|node| node.prev.as_ref());
        Some(key)
    }
}

/// Iterator over tracked keys, stale end to fresh end.
pub struct StaleFirstIter<'a, K> {
    list: &'a RecencyList<K>,
    current: Option<&'a K>,
}

impl<'a, K> Iterator for StaleFirstIter<'a, K>
where
    K: Eq + Hash + Clone,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let key = self.current?;
        self.current = self.list.nodes.get(key).and_then(|node| node.next.as_ref());
        Some(key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
