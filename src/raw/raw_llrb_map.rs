use alloc::vec::Vec;
use core::mem;

use tracing::{debug, error, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use crate::compare::Compare;
use crate::error::{Direction, Error};
use crate::Color;

/// The core left-leaning red-black tree backing `LLRBTreeMap`.
#[derive(Clone)]
pub(crate) struct RawLLRBTreeMap<K, V, P> {
    /// Arena storing every node, alive or erased.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree has any nodes.
    root: Option<Handle>,
    /// Strict ordering predicate, fixed for the tree's lifetime.
    order: P,
}

/// What get-or-insert does with the value slot once it reaches the key.
pub(crate) enum Seed<V, F> {
    /// Keep an existing value; build a missing one with the closure.
    Default(F),
    /// Overwrite an existing value, or create the node with this one.
    Value(V),
}

/// `Seed` for callers that always carry a value.
pub(crate) type ValueSeed<V> = Seed<V, fn() -> V>;

impl<V, F: FnOnce() -> V> Seed<V, F> {
    fn into_value(self) -> V {
        match self {
            Seed::Default(make) => make(),
            Seed::Value(value) => value,
        }
    }
}

/// Calls `visit` on every node of the subtree at `link`, in key order.
fn walk_in_order<'a, K, V, F>(nodes: &'a Arena<Node<K, V>>, link: Option<Handle>, visit: &mut F)
where
    F: FnMut(Handle, &'a Node<K, V>),
{
    if let Some(handle) = link {
        let node = nodes.get(handle);
        walk_in_order(nodes, node.left(), visit);
        visit(handle, node);
        walk_in_order(nodes, node.right(), visit);
    }
}

fn count_nodes<K, V>(nodes: &Arena<Node<K, V>>, link: Option<Handle>) -> usize {
    link.map_or(0, |handle| {
        let node = nodes.get(handle);
        1 + count_nodes(nodes, node.left()) + count_nodes(nodes, node.right())
    })
}

fn count_alive<K, V>(nodes: &Arena<Node<K, V>>, link: Option<Handle>) -> usize {
    link.map_or(0, |handle| {
        let node = nodes.get(handle);
        usize::from(node.is_alive()) + count_alive(nodes, node.left()) + count_alive(nodes, node.right())
    })
}

fn subtree_height<K, V>(nodes: &Arena<Node<K, V>>, link: Option<Handle>) -> isize {
    link.map_or(-1, |handle| {
        let node = nodes.get(handle);
        1 + subtree_height(nodes, node.left()).max(subtree_height(nodes, node.right()))
    })
}

impl<K, V, P> RawLLRBTreeMap<K, V, P> {
    /// Creates a new, empty tree ordered by `order`.
    pub(crate) const fn new(order: P) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            order,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, order: P) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            order,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn order(&self) -> &P {
        &self.order
    }

    /// Returns true if the tree has no nodes at all, alive or erased.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Counts the alive nodes. O(n).
    pub(crate) fn len(&self) -> usize {
        count_alive(&self.nodes, self.root)
    }

    /// Counts every node, erased ones included. O(n).
    pub(crate) fn num_nodes(&self) -> usize {
        let count = count_nodes(&self.nodes, self.root);
        debug_assert_eq!(count, self.nodes.len(), "every arena slot is linked into the tree");
        count
    }

    /// Height of the tree; -1 when empty.
    pub(crate) fn height(&self) -> isize {
        subtree_height(&self.nodes, self.root)
    }

    /// Visits every node, erased ones included, in key order.
    pub(crate) fn traverse<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node<K, V>),
    {
        walk_in_order(&self.nodes, self.root, &mut |_, node| visit(node));
    }

    /// Releases every node.
    pub(crate) fn clear(&mut self) {
        debug!(nodes = self.nodes.len(), "clearing tree");
        self.nodes.clear();
        self.root = None;
    }

    #[inline]
    fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|handle| self.nodes.get(handle).is_red())
    }

    #[inline]
    fn left_of(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).left()
    }

    #[inline]
    fn right_of(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).right()
    }

    /// Lifts the red right child of `handle` into its place.
    ///
    /// The lifted child takes the old root's color and the old root turns red.
    /// Returns the new subtree root, or `Error::InvalidRotation` if the right
    /// child is missing or black, in which case nothing changes.
    pub(crate) fn rotate_left(&mut self, handle: Handle) -> Result<Handle, Error> {
        let pivot = self
            .right_of(handle)
            .filter(|&right| self.nodes.get(right).is_red())
            .ok_or(Error::InvalidRotation {
                direction: Direction::Left,
            })?;
        let color = self.nodes.get(handle).color();
        let inner = self.left_of(pivot);

        let node = self.nodes.get_mut(handle);
        node.set_right(inner);
        node.set_color(Color::Red);

        let lifted = self.nodes.get_mut(pivot);
        lifted.set_left(Some(handle));
        lifted.set_color(color);
        Ok(pivot)
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    pub(crate) fn rotate_right(&mut self, handle: Handle) -> Result<Handle, Error> {
        let pivot = self
            .left_of(handle)
            .filter(|&left| self.nodes.get(left).is_red())
            .ok_or(Error::InvalidRotation {
                direction: Direction::Right,
            })?;
        let color = self.nodes.get(handle).color();
        let inner = self.right_of(pivot);

        let node = self.nodes.get_mut(handle);
        node.set_left(inner);
        node.set_color(Color::Red);

        let lifted = self.nodes.get_mut(pivot);
        lifted.set_right(Some(handle));
        lifted.set_color(color);
        Ok(pivot)
    }

    fn rotate_or_keep(&mut self, handle: Handle, direction: Direction) -> Handle {
        let rotated = match direction {
            Direction::Left => self.rotate_left(handle),
            Direction::Right => self.rotate_right(handle),
        };
        rotated.unwrap_or_else(|err| {
            error!(%err, "rebalancing requested an invalid rotation; subtree left unchanged");
            handle
        })
    }

    /// Both children turn black and `handle` turns red, passing the red link up.
    fn flip_colors(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let children = [node.left(), node.right()];
        for child in children.into_iter().flatten() {
            self.nodes.get_mut(child).set_color(Color::Black);
        }
        self.nodes.get_mut(handle).set_color(Color::Red);
    }

    /// Restores the left-leaning shape between `handle` and its children on
    /// the way back up from an insertion. Returns the new subtree root.
    fn fix_up(&mut self, mut handle: Handle) -> Handle {
        if self.is_red(self.right_of(handle)) && !self.is_red(self.left_of(handle)) {
            handle = self.rotate_or_keep(handle, Direction::Left);
        }
        if self.is_red(self.left_of(handle)) && self.is_red(self.left_of(handle).and_then(|left| self.left_of(left))) {
            handle = self.rotate_or_keep(handle, Direction::Right);
        }
        if self.is_red(self.left_of(handle)) && self.is_red(self.right_of(handle)) {
            self.flip_colors(handle);
        }
        handle
    }
}

impl<K, V, P: Compare<K>> RawLLRBTreeMap<K, V, P> {
    /// Finds the node holding `key`, alive or erased.
    pub(crate) fn search(&self, key: &K) -> Option<Handle> {
        let mut link = self.root;
        while let Some(handle) = link {
            let node = self.nodes.get(handle);
            link = if self.order.less(key, node.key()) {
                node.left()
            } else if self.order.less(node.key(), key) {
                node.right()
            } else {
                return Some(handle);
            };
        }
        None
    }

    /// Returns the value of an alive entry.
    pub(crate) fn find(&self, key: &K) -> Option<&V> {
        let handle = self.search(key)?;
        let node = self.nodes.get(handle);
        node.is_alive().then_some(node.value())
    }

    /// Returns the value of an alive entry mutably.
    pub(crate) fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.search(key).filter(|&handle| self.nodes.get(handle).is_alive())?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    /// Get-or-insert: finds or creates the node for `key`, reviving it if it
    /// was erased, and returns its value slot.
    pub(crate) fn get_or_insert<F>(&mut self, key: K, seed: Seed<V, F>) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (root, location) = self.insert_at(self.root, key, seed);
        self.nodes.get_mut(root).set_color(Color::Black);
        self.root = Some(root);
        self.nodes.get_mut(location).value_mut()
    }

    /// Like [`get_or_insert`](Self::get_or_insert), but reserves the node slot
    /// before touching the tree so that running out of memory leaves it intact.
    /// A key already in the tree, alive or erased, needs no slot.
    pub(crate) fn try_get_or_insert<F>(&mut self, key: K, seed: Seed<V, F>) -> Result<&mut V, Error>
    where
        F: FnOnce() -> V,
    {
        if self.search(&key).is_none() {
            self.nodes.try_reserve(1)?;
        }
        Ok(self.get_or_insert(key, seed))
    }

    /// Recursive descent of get-or-insert. Returns the (possibly rotated)
    /// subtree root and the handle of the node holding `key`.
    fn insert_at<F>(&mut self, link: Option<Handle>, key: K, seed: Seed<V, F>) -> (Handle, Handle)
    where
        F: FnOnce() -> V,
    {
        let Some(handle) = link else {
            let handle = self.nodes.alloc(Node::new(key, seed.into_value()));
            return (handle, handle);
        };

        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let goes_left = self.order.less(&key, node.key());
        let goes_right = !goes_left && self.order.less(node.key(), &key);

        let location = if goes_left {
            let (subtree, location) = self.insert_at(left, key, seed);
            self.nodes.get_mut(handle).set_left(Some(subtree));
            location
        } else if goes_right {
            let (subtree, location) = self.insert_at(right, key, seed);
            self.nodes.get_mut(handle).set_right(Some(subtree));
            location
        } else {
            let node = self.nodes.get_mut(handle);
            if !node.is_alive() {
                trace!("reviving erased entry");
                node.set_alive(true);
            }
            if let Seed::Value(value) = seed {
                *node.value_mut() = value;
            }
            handle
        };

        (self.fix_up(handle), location)
    }

    /// Marks the entry for `key` as erased. The node keeps its place, color
    /// and value until the next rehash. Returns false if there was no alive
    /// entry to erase.
    pub(crate) fn erase(&mut self, key: &K) -> bool {
        match self.search(key) {
            Some(handle) if self.nodes.get(handle).is_alive() => {
                self.nodes.get_mut(handle).set_alive(false);
                true
            }
            _ => {
                trace!("erase of an absent or already erased key");
                false
            }
        }
    }

    /// Rebuilds the tree from its alive entries, in key order, into a fresh
    /// arena. Every erased node is dropped.
    pub(crate) fn rehash(&mut self) {
        let mut survivors = Vec::new();
        walk_in_order(&self.nodes, self.root, &mut |handle, node| {
            if node.is_alive() {
                survivors.push(handle);
            }
        });

        let mut old = mem::replace(&mut self.nodes, Arena::with_capacity(survivors.len()));
        self.root = None;

        for handle in survivors {
            let (key, value) = old.take(handle).into_entry();
            self.get_or_insert(key, ValueSeed::Value(value));
        }

        debug!(
            reclaimed = old.len() - self.nodes.len(),
            nodes = self.nodes.len(),
            "rehashed tree"
        );
    }

    /// Checks every structural invariant. Returns the black height on success.
    pub(crate) fn validate(&self) -> Result<usize, Error> {
        let Some(root) = self.root else {
            return Ok(0);
        };
        if self.nodes.get(root).is_red() {
            return Err(Error::RedRoot);
        }
        let black_height = self.validate_links(Some(root))?;

        let mut keys = Vec::new();
        walk_in_order(&self.nodes, self.root, &mut |_, node| keys.push(node.key()));
        if let Some(position) = keys.windows(2).position(|pair| !self.order.less(pair[0], pair[1])) {
            return Err(Error::Unordered { position: position + 1 });
        }

        Ok(black_height)
    }

    fn validate_links(&self, link: Option<Handle>) -> Result<usize, Error> {
        let Some(handle) = link else {
            return Ok(0);
        };
        let node = self.nodes.get(handle);
        if self.is_red(node.right()) {
            return Err(Error::RightLeaningRed);
        }
        if node.is_red() && self.is_red(node.left()) {
            return Err(Error::ConsecutiveReds);
        }
        let left = self.validate_links(node.left())?;
        let right = self.validate_links(node.right())?;
        if left != right {
            return Err(Error::UnbalancedBlacks { left, right });
        }
        Ok(left + usize::from(!node.is_red()))
    }
}
