use alloc::collections::TryReserveError;
use core::fmt;

/// Errors reported by [`LLRBTreeMap`](crate::LLRBTreeMap).
///
/// Ordinary operations never fail: [`LLRBTreeMap::get`](crate::LLRBTreeMap::get)
/// aborts on memory exhaustion like any other collection, and erasing an absent
/// or already erased key is a no-op. The fallible variants below come from
/// [`try_get`](crate::LLRBTreeMap::try_get), [`try_put`](crate::LLRBTreeMap::try_put)
/// and [`validate`](crate::LLRBTreeMap::validate).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The node arena could not grow. The tree is left exactly as it was.
    #[error("node allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// The tree already holds the maximum number of nodes a handle can address.
    #[error("tree is at maximum capacity ({max} nodes)")]
    CapacityExceeded {
        /// The largest number of nodes a tree can hold.
        max: usize,
    },

    /// A rotation was requested on a node whose child in the rotation direction
    /// is missing or black. This is a fault in the rebalancing sequence, not in
    /// the caller's data.
    #[error("rotate {direction} requires a red {} child", .direction.opposite())]
    InvalidRotation {
        /// The direction of the rejected rotation.
        direction: Direction,
    },

    /// The root of the tree is red.
    #[error("root node is red")]
    RedRoot,

    /// A red node is the right child of its parent.
    #[error("red node is a right child")]
    RightLeaningRed,

    /// A red node has a red child.
    #[error("red node has a red child")]
    ConsecutiveReds,

    /// Two root-to-leaf paths pass through different numbers of black nodes.
    #[error("unbalanced black height: left {left}, right {right}")]
    UnbalancedBlacks {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// The in-order key sequence is not strictly increasing under the map's predicate.
    #[error("keys out of order at in-order position {position}")]
    Unordered {
        /// Zero-based in-order position of the first key that is not greater than its predecessor.
        position: usize,
    },
}

/// The direction of a tree rotation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Rotate left: the right child is lifted.
    Left,
    /// Rotate right: the left child is lifted.
    Right,
}

impl Direction {
    /// Returns the other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}
