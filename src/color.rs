/// The color of a link into a node of a left-leaning red-black tree.
///
/// A red link glues a node to its parent as part of the same 2-3 node; black
/// links are the ordinary tree edges counted by the black height.
///
/// # Examples
///
/// ```
/// use llrb_tree::{Color, LLRBTreeMap};
///
/// let mut map = LLRBTreeMap::new();
/// map.put(1, "a");
///
/// let mut colors = Vec::new();
/// map.traverse(|node| colors.push(node.color()));
/// assert_eq!(colors, [Color::Black]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Color {
    /// A new node's color; red nodes lean left and never sit on top of another red.
    #[default]
    Red,
    /// The root, and every node counted by the black height.
    Black,
}

impl Color {
    /// Returns true for [`Color::Red`].
    #[inline]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    /// Returns true for [`Color::Black`].
    #[inline]
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}
