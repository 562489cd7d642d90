//! Value-level traits used by the cache write modes.
//!
//! Two concerns live here, both collaborators of
//! [`BoundedLruCache`](crate::cache::BoundedLruCache) rather than part of the
//! cache core itself:
//!
//! - [`ShallowMerge`]: the merge routine behind
//!   [`merge_insert`](crate::cache::BoundedLruCache::merge_insert). Merges the
//!   entries of a patch value into an existing value, patch entries winning
//!   on collision.
//! - [`EmptyValue`]: classifies values that the legacy write path
//!   ([`insert_if_nonempty`](crate::cache::BoundedLruCache::insert_if_nonempty))
//!   refuses to store: numeric zero, `false`, empty strings, `None`, and
//!   empty collections.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

// ---------------------------------------------------------------------------
// ShallowMerge
// ---------------------------------------------------------------------------

/// Shallow merge-on-write support.
///
/// `shallow_merge` folds the entries of `patch` into `self` one level deep:
/// top-level entries of `patch` replace same-keyed entries of `self`, and
/// nested values are moved wholesale, never merged recursively.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use memokit::value::ShallowMerge;
///
/// let mut base = BTreeMap::from([("x", 1), ("y", 2)]);
/// base.shallow_merge(BTreeMap::from([("y", 20), ("z", 3)]));
///
/// assert_eq!(base, BTreeMap::from([("x", 1), ("y", 20), ("z", 3)]));
/// ```
pub trait ShallowMerge {
    /// Merges the entries of `patch` into `self`; patch entries win.
    fn shallow_merge(&mut self, patch: Self);
}

impl<K, V, S> ShallowMerge for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn shallow_merge(&mut self, patch: Self) {
        self.extend(patch);
    }
}

impl<K, V> ShallowMerge for BTreeMap<K, V>
where
    K: Ord,
{
    fn shallow_merge(&mut self, patch: Self) {
        self.extend(patch);
    }
}

// ---------------------------------------------------------------------------
// EmptyValue
// ---------------------------------------------------------------------------

/// Classification of "empty-looking" values.
///
/// Mirrors the loose-typing convention the cache's write surface grew up
/// with, where zero, `false`, and the empty string all mean "nothing to
/// store". In a typed API these are perfectly cacheable values, so the
/// classification is opt-in: only
/// [`insert_if_nonempty`](crate::cache::BoundedLruCache::insert_if_nonempty)
/// consults it, and the default [`insert`](crate::traits::CoreCache::insert)
/// stores everything.
pub trait EmptyValue {
    /// Returns `true` if this value counts as empty and should be skipped
    /// by the compatibility write path.
    fn is_empty_value(&self) -> bool;
}

macro_rules! impl_empty_for_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EmptyValue for $ty {
                #[inline]
                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_empty_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl EmptyValue for f32 {
    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl EmptyValue for f64 {
    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl EmptyValue for bool {
    #[inline]
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl EmptyValue for String {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl EmptyValue for &str {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl EmptyValue for () {
    #[inline]
    fn is_empty_value(&self) -> bool {
        true
    }
}

/// `None` is empty; `Some` is non-empty regardless of its contents.
impl<T> EmptyValue for Option<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T> EmptyValue for Vec<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> EmptyValue for HashMap<K, V, S> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> EmptyValue for BTreeMap<K, V> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ShallowMerge ------------------------------------------------------

    #[test]
    fn merge_disjoint_keys_unions() {
        let mut base = HashMap::from([("x", 1)]);
        base.shallow_merge(HashMap::from([("y", 2)]));
        assert_eq!(base, HashMap::from([("x", 1), ("y", 2)]));
    }

    #[test]
    fn merge_collision_patch_wins() {
        let mut base = HashMap::from([("x", 1), ("y", 2)]);
        base.shallow_merge(HashMap::from([("y", 99)]));
        assert_eq!(base.get("y"), Some(&99));
        assert_eq!(base.get("x"), Some(&1));
    }

    #[test]
    fn merge_into_empty_base() {
        let mut base: BTreeMap<&str, i32> = BTreeMap::new();
        base.shallow_merge(BTreeMap::from([("a", 1)]));
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn merge_empty_patch_is_noop() {
        let mut base = BTreeMap::from([("a", 1)]);
        base.shallow_merge(BTreeMap::new());
        assert_eq!(base, BTreeMap::from([("a", 1)]));
    }

    #[test]
    fn merge_is_shallow_not_recursive() {
        // Nested maps are replaced wholesale, not merged field by field.
        let mut base = BTreeMap::from([("inner", BTreeMap::from([("a", 1), ("b", 2)]))]);
        base.shallow_merge(BTreeMap::from([("inner", BTreeMap::from([("a", 10)]))]));

        let inner = base.get("inner").unwrap();
        assert_eq!(inner.get("a"), Some(&10));
        assert_eq!(inner.get("b"), None);
    }

    // -- EmptyValue --------------------------------------------------------

    #[test]
    fn zero_integers_are_empty() {
        assert!(0u32.is_empty_value());
        assert!(0i64.is_empty_value());
        assert!(!1u32.is_empty_value());
        assert!(!(-1i64).is_empty_value());
    }

    #[test]
    fn zero_floats_are_empty() {
        assert!(0.0f64.is_empty_value());
        assert!(!0.5f64.is_empty_value());
    }

    #[test]
    fn false_is_empty() {
        assert!(false.is_empty_value());
        assert!(!true.is_empty_value());
    }

    #[test]
    fn empty_strings_are_empty() {
        assert!("".is_empty_value());
        assert!(String::new().is_empty_value());
        assert!(!"x".is_empty_value());
    }

    #[test]
    fn none_is_empty_some_is_not() {
        assert!(Option::<i32>::None.is_empty_value());
        // Some(0) is non-empty: the option is present even if the payload
        // would itself classify as empty.
        assert!(!Some(0i32).is_empty_value());
    }

    #[test]
    fn empty_collections_are_empty() {
        assert!(Vec::<i32>::new().is_empty_value());
        assert!(HashMap::<u32, u32>::new().is_empty_value());
        assert!(!vec![1].is_empty_value());
    }
}
