use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::compare::{Compare, NaturalOrder};
use crate::raw::{Handle, Node, RawLLRBTreeMap, Seed, ValueSeed};
use crate::{Color, Error};

mod capacity;
mod dump;

/// An ordered associative array based on a [left-leaning red-black tree].
///
/// Keys are kept in the order given by a strict "less than" predicate bound at
/// construction, [`NaturalOrder`] by default. Every access goes through
/// [`get`](LLRBTreeMap::get), a get-or-insert: looking a key up makes sure it
/// is present. [`find`](LLRBTreeMap::find) is the read-only lookup.
///
/// Deletion is lazy. [`erase`](LLRBTreeMap::erase) marks an entry dead (a
/// *tombstone*) without touching the shape of the tree; the node keeps its
/// place, color and value until [`rehash`](LLRBTreeMap::rehash) rebuilds the
/// tree from the alive entries only. Getting or putting an erased key revives
/// its node in place.
///
/// # Examples
///
/// ```
/// use llrb_tree::LLRBTreeMap;
///
/// let mut frequency = LLRBTreeMap::new();
/// for word in "the cat saw the other cat".split_whitespace() {
///     *frequency.get(word) += 1;
/// }
///
/// assert_eq!(frequency.find(&"cat"), Some(&2));
/// assert_eq!(frequency.len(), 4);
///
/// // Erasing leaves a tombstone behind.
/// frequency.erase(&"saw");
/// assert_eq!(frequency.len(), 3);
/// assert_eq!(frequency.num_nodes(), 4);
///
/// // Rehashing reclaims it.
/// frequency.rehash();
/// assert_eq!(frequency.num_nodes(), 3);
///
/// let words: Vec<_> = frequency.iter().map(|(word, _)| *word).collect();
/// assert_eq!(words, ["cat", "other", "the"]);
/// ```
///
/// # Concurrency
///
/// The map is a single-owner structure. Every mutating call, `get` included,
/// takes `&mut self`; share it across threads only behind external
/// synchronization that excludes readers during a mutation.
///
/// [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
pub struct LLRBTreeMap<K, V, P = NaturalOrder> {
    raw: RawLLRBTreeMap<K, V, P>,
}

/// A read-only view of one node, handed to [`LLRBTreeMap::traverse`] visitors.
///
/// Unlike [`Iter`], traversal also visits erased nodes; the visitor decides
/// what to do with them.
pub struct NodeRef<'a, K, V> {
    node: &'a Node<K, V>,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    /// The node's key.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.node.key()
    }

    /// The node's value. Erased nodes keep the value they had when erased.
    #[must_use]
    pub fn value(&self) -> &'a V {
        self.node.value()
    }

    /// Returns false for a tombstone.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.node.is_alive()
    }

    /// The node's color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.node.color()
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("alive", &self.is_alive())
            .field("color", &self.color())
            .finish()
    }
}

/// An iterator over the alive entries of a `LLRBTreeMap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`LLRBTreeMap`].
///
/// # Examples
///
/// ```
/// use llrb_tree::LLRBTreeMap;
///
/// let mut map = LLRBTreeMap::new();
/// map.put(2, "b");
/// map.put(1, "a");
/// map.put(3, "c");
/// map.erase(&2);
///
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next(), Some((&3, &"c")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: LLRBTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, P> {
    tree: &'a RawLLRBTreeMap<K, V, P>,
    // Nodes whose left subtree has been pushed but which are not yet visited.
    stack: SmallVec<[Handle; 32]>,
}

impl<K, V> LLRBTreeMap<K, V, NaturalOrder> {
    /// Makes a new, empty `LLRBTreeMap` ordered by the keys' [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// map.put(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        LLRBTreeMap {
            raw: RawLLRBTreeMap::new(NaturalOrder),
        }
    }
}

impl<K, V, P> LLRBTreeMap<K, V, P> {
    /// Makes a new, empty `LLRBTreeMap` ordered by `order`.
    ///
    /// The predicate is fixed for the lifetime of the map and is carried over
    /// by [`Clone`].
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{LLRBTreeMap, ReverseOrder};
    ///
    /// let mut map = LLRBTreeMap::with_order(ReverseOrder);
    /// map.put("a", 1);
    /// map.put("b", 2);
    /// assert_eq!(map.iter().next(), Some((&"b", &2)));
    /// ```
    #[must_use]
    pub const fn with_order(order: P) -> Self {
        LLRBTreeMap {
            raw: RawLLRBTreeMap::new(order),
        }
    }

    /// Returns the ordering predicate.
    #[must_use]
    pub fn order(&self) -> &P {
        self.raw.order()
    }

    /// Returns true if the map holds no nodes at all.
    ///
    /// A map whose entries have all been erased still holds their tombstones
    /// and is not empty until it is rehashed or cleared.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// assert!(map.is_empty());
    /// map.put(1, ());
    /// map.erase(&1);
    /// assert!(!map.is_empty());
    /// map.rehash();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of alive entries.
    ///
    /// # Complexity
    ///
    /// O(n): the count is not cached, every node is visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of nodes, tombstones included.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// map.put(1, 'a');
    /// map.put(2, 'b');
    /// map.erase(&1);
    /// assert_eq!((map.len(), map.num_nodes()), (1, 2));
    /// ```
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.raw.num_nodes()
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single node.
    ///
    /// The balance invariants keep the height below `2 * log2(n + 1)` for `n` nodes.
    #[must_use]
    pub fn height(&self) -> isize {
        self.raw.height()
    }

    /// Removes every node, alive or erased.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// map.put(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.height(), -1);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Calls `visit` on every node in key order, tombstones included.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// for key in [3, 1, 2] {
    ///     map.put(key, key * 10);
    /// }
    /// map.erase(&2);
    ///
    /// let mut seen = Vec::new();
    /// map.traverse(|node| seen.push((*node.key(), node.is_alive())));
    /// assert_eq!(seen, [(1, true), (2, false), (3, true)]);
    /// ```
    pub fn traverse<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(NodeRef<'a, K, V>),
    {
        self.raw.traverse(|node| visit(NodeRef { node }));
    }

    /// Gets an iterator over the alive entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        let mut iter = Iter {
            tree: &self.raw,
            stack: SmallVec::new(),
        };
        iter.push_left_spine(self.raw.root());
        iter
    }
}

impl<K, V, P: Compare<K>> LLRBTreeMap<K, V, P> {
    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// An erased key is revived and keeps the value it had when erased.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map: LLRBTreeMap<&str, i32> = LLRBTreeMap::new();
    /// *map.get("a") += 1;
    /// *map.get("a") += 1;
    /// assert_eq!(*map.get("a"), 2);
    ///
    /// map.erase(&"a");
    /// assert_eq!(*map.get("a"), 2);
    /// ```
    pub fn get(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.raw.get_or_insert(key, Seed::Default(V::default))
    }

    /// Like [`get`](Self::get), but builds a missing value with `default`.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.raw.get_or_insert(key, Seed::Default(default))
    }

    /// Fallible [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] or [`Error::CapacityExceeded`] if
    /// room for a new node cannot be reserved. The map is then unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map: LLRBTreeMap<u8, u32> = LLRBTreeMap::new();
    /// *map.try_get(7)? += 1;
    /// assert_eq!(map.find(&7), Some(&1));
    /// # Ok::<(), llrb_tree::Error>(())
    /// ```
    pub fn try_get(&mut self, key: K) -> Result<&mut V, Error>
    where
        V: Default,
    {
        self.raw.try_get_or_insert(key, Seed::Default(V::default))
    }

    /// Sets the value for `key`, inserting or reviving the entry as needed.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// map.put(37, "a");
    /// map.put(37, "b");
    /// assert_eq!(map.find(&37), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) {
        self.raw.get_or_insert(key, ValueSeed::Value(value));
    }

    /// Fallible [`put`](Self::put).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] or [`Error::CapacityExceeded`] if
    /// room for a new node cannot be reserved. The map is then unchanged.
    pub fn try_put(&mut self, key: K, value: V) -> Result<(), Error> {
        self.raw.try_get_or_insert(key, ValueSeed::Value(value))?;
        Ok(())
    }

    /// Returns a reference to the value of an alive entry, without inserting.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find(&self, key: &K) -> Option<&V> {
        self.raw.find(key)
    }

    /// Returns a mutable reference to the value of an alive entry, without inserting.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        self.raw.find_mut(key)
    }

    /// Returns true if the map holds an alive entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Erases the entry for `key`, leaving a tombstone.
    ///
    /// The tree keeps its shape: no node is freed and nothing is rebalanced.
    /// Erasing an absent or already erased key does nothing. Returns true if
    /// an alive entry was erased.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// map.put(1, "a");
    /// assert!(map.erase(&1));
    /// assert!(!map.erase(&1));
    /// assert_eq!(map.find(&1), None);
    /// ```
    pub fn erase(&mut self, key: &K) -> bool {
        self.raw.erase(key)
    }

    /// Rebuilds the tree from its alive entries, freeing every tombstone.
    ///
    /// The alive entries are re-inserted in key order into a fresh tree, so
    /// the result is balanced but need not have the shape of the original.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map: LLRBTreeMap<i32, i32> = (0..100).map(|k| (k, k)).collect();
    /// for key in (0..100).filter(|k| k % 3 != 0) {
    ///     map.erase(&key);
    /// }
    /// assert_eq!(map.num_nodes(), 100);
    ///
    /// map.rehash();
    /// assert_eq!(map.num_nodes(), 34);
    /// assert_eq!(map.len(), 34);
    /// ```
    pub fn rehash(&mut self) {
        self.raw.rehash();
    }

    /// Checks the tree's structural invariants: a black root, red links
    /// leaning left only, no red node with a red child, equal black height
    /// on every path, and strictly increasing keys in order.
    ///
    /// Returns the black height.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let map: LLRBTreeMap<u32, ()> = (0..1000).map(|k| (k, ())).collect();
    /// assert!(map.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<usize, Error> {
        self.raw.validate()
    }
}

impl<K: Clone, V: Clone, P: Clone> Clone for LLRBTreeMap<K, V, P> {
    /// Deep-clones every node, colors and tombstones included.
    fn clone(&self) -> Self {
        LLRBTreeMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq, P> PartialEq for LLRBTreeMap<K, V, P> {
    /// Two maps are equal when their alive entries are, in order.
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, P> Eq for LLRBTreeMap<K, V, P> {}

impl<K: fmt::Debug, V: fmt::Debug, P> fmt::Debug for LLRBTreeMap<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P: Default> Default for LLRBTreeMap<K, V, P> {
    fn default() -> Self {
        LLRBTreeMap::with_order(P::default())
    }
}

impl<K, V, P: Compare<K> + Default> FromIterator<(K, V)> for LLRBTreeMap<K, V, P> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = LLRBTreeMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, P: Compare<K>> Extend<(K, V)> for LLRBTreeMap<K, V, P> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K, V, P> IntoIterator for &'a LLRBTreeMap<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Iter<'a, K, V, P> {
        self.iter()
    }
}

impl<'a, K, V, P> Iter<'a, K, V, P> {
    fn push_left_spine(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.tree.node(handle).left();
        }
    }
}

impl<'a, K, V, P> Iterator for Iter<'a, K, V, P> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(handle) = self.stack.pop() {
            let node = tree.node(handle);
            self.push_left_spine(node.right());
            if node.is_alive() {
                return Some((node.key(), node.value()));
            }
        }
        None
    }
}

impl<K, V, P> FusedIterator for Iter<'_, K, V, P> {}

impl<K, V, P> Clone for Iter<'_, K, V, P> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            stack: self.stack.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, P> fmt::Debug for Iter<'_, K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
