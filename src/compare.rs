//! Ordering predicates for [`LLRBTreeMap`](crate::LLRBTreeMap).
//!
//! A map orders its keys with a strict "less than" predicate bound at
//! construction. Two keys `a` and `b` are the same key when neither
//! `less(a, b)` nor `less(b, a)` holds.

/// A strict weak ordering on keys.
///
/// Any `Fn(&K, &K) -> bool` closure is a `Compare<K>`.
///
/// # Examples
///
/// ```
/// use llrb_tree::LLRBTreeMap;
///
/// // Order strings by length, then alphabetically.
/// let mut map = LLRBTreeMap::with_order(|a: &&str, b: &&str| (a.len(), *a) < (b.len(), *b));
/// map.put("ccc", 3);
/// map.put("a", 1);
/// map.put("bb", 2);
///
/// let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, ["a", "bb", "ccc"]);
/// ```
pub trait Compare<K: ?Sized> {
    /// Returns true if `a` orders strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;
}

/// Orders keys by their [`Ord`] implementation. This is the default predicate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

/// Orders keys by the reverse of their [`Ord`] implementation.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LLRBTreeMap, ReverseOrder};
///
/// let mut map = LLRBTreeMap::with_order(ReverseOrder);
/// for key in 1..=3 {
///     map.put(key, ());
/// }
/// let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ReverseOrder;

impl<K: ?Sized + Ord> Compare<K> for NaturalOrder {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K: ?Sized + Ord> Compare<K> for ReverseOrder {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        b < a
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}
