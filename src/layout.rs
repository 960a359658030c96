//! Column layout for tabular reports.

/// Horizontal alignment of a report column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
}

/// Widths and alignments of the key and value columns written by
/// [`LLRBTreeMap::write_columns`](crate::LLRBTreeMap::write_columns).
///
/// The default layout is two 15-character columns, keys left-aligned and
/// values right-aligned.
///
/// # Examples
///
/// ```
/// use llrb_tree::{Align, ColumnLayout, LLRBTreeMap};
///
/// let mut map = LLRBTreeMap::new();
/// map.put("apple", 3);
/// map.put("fig", 12);
///
/// let layout = ColumnLayout::new(6, 4).key_align(Align::Right).value_align(Align::Left);
/// let mut out = String::new();
/// map.write_columns(&mut out, &layout).unwrap();
/// assert_eq!(out, " apple3   \n   fig12  \n");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ColumnLayout {
    pub(crate) key_width: usize,
    pub(crate) value_width: usize,
    pub(crate) key_align: Align,
    pub(crate) value_align: Align,
}

impl ColumnLayout {
    /// Creates a layout with the given column widths, keys left-aligned and
    /// values right-aligned.
    #[must_use]
    pub const fn new(key_width: usize, value_width: usize) -> Self {
        Self {
            key_width,
            value_width,
            key_align: Align::Left,
            value_align: Align::Right,
        }
    }

    /// Sets the alignment of the key column.
    #[must_use]
    pub const fn key_align(mut self, align: Align) -> Self {
        self.key_align = align;
        self
    }

    /// Sets the alignment of the value column.
    #[must_use]
    pub const fn value_align(mut self, align: Align) -> Self {
        self.value_align = align;
        self
    }

    /// Width of the key column.
    #[must_use]
    pub const fn key_width(&self) -> usize {
        self.key_width
    }

    /// Width of the value column.
    #[must_use]
    pub const fn value_width(&self) -> usize {
        self.value_width
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(15, 15)
    }
}
