use super::LLRBTreeMap;
use crate::compare::NaturalOrder;
use crate::raw::RawLLRBTreeMap;

impl<K, V> LLRBTreeMap<K, V, NaturalOrder> {
    /// Creates an empty map with room for at least `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let map: LLRBTreeMap<i32, i32> = LLRBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        LLRBTreeMap {
            raw: RawLLRBTreeMap::with_capacity(capacity, NaturalOrder),
        }
    }
}

impl<K, V, P> LLRBTreeMap<K, V, P> {
    /// Creates an empty map ordered by `order` with room for at least `capacity` nodes.
    #[must_use]
    pub fn with_capacity_and_order(capacity: usize, order: P) -> Self {
        LLRBTreeMap {
            raw: RawLLRBTreeMap::with_capacity(capacity, order),
        }
    }

    /// Returns the number of nodes the map can hold without reallocating.
    ///
    /// Tombstones occupy capacity until the map is rehashed.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let map: LLRBTreeMap<i32, i32> = LLRBTreeMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
