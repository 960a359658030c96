use alloc::collections::VecDeque;
use core::fmt::{self, Display, Write};

use super::LLRBTreeMap;
use crate::layout::{Align, ColumnLayout};
use crate::raw::{Handle, Node};

fn write_cell<W: Write>(out: &mut W, cell: &impl Display, width: usize, align: Align) -> fmt::Result {
    match align {
        Align::Left => write!(out, "{cell:<width$}"),
        Align::Right => write!(out, "{cell:>width$}"),
    }
}

// B, b, R, r: black alive, black dead, red alive, red dead.
fn flag<K, V>(node: &Node<K, V>) -> char {
    match (node.is_red(), node.is_alive()) {
        (false, true) => 'B',
        (false, false) => 'b',
        (true, true) => 'R',
        (true, false) => 'r',
    }
}

impl<K, V, P> LLRBTreeMap<K, V, P> {
    /// Writes one line per alive entry, in key order, as two padded columns.
    ///
    /// Nothing separates the columns beyond their padding; a cell wider than
    /// its column is written in full.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn write_columns<W>(&self, out: &mut W, layout: &ColumnLayout) -> fmt::Result
    where
        W: Write,
        K: Display,
        V: Display,
    {
        for (key, value) in self.iter() {
            write_cell(out, key, layout.key_width, layout.key_align)?;
            write_cell(out, value, layout.value_width, layout.value_align)?;
            out.write_char('\n')?;
        }
        Ok(())
    }

    /// Writes the shape of the tree level by level, one line per level.
    ///
    /// Each position holds the node's flag: `B` black, `R` red, lower case
    /// for an erased node, and `-` where the level has no node. Output stops
    /// after the last level that holds a node.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// map.put(1, ());
    /// map.put(2, ());
    /// map.erase(&1);
    ///
    /// let mut out = String::new();
    /// map.dump_flags(&mut out).unwrap();
    /// assert_eq!(out, " B\n r-\n");
    /// ```
    pub fn dump_flags<W: Write>(&self, out: &mut W) -> fmt::Result {
        let Some(root) = self.raw.root() else {
            return Ok(());
        };
        let mut queue: VecDeque<Option<Handle>> = VecDeque::new();
        queue.push_back(Some(root));
        let mut width = 1usize;
        let mut nodes_below = 1usize;
        while nodes_below > 0 {
            nodes_below = 0;
            out.write_char(' ')?;
            for _ in 0..width {
                match queue.pop_front().flatten() {
                    Some(handle) => {
                        let node = self.raw.node(handle);
                        out.write_char(flag(node))?;
                        nodes_below += usize::from(node.left().is_some()) + usize::from(node.right().is_some());
                        queue.push_back(node.left());
                        queue.push_back(node.right());
                    }
                    None => {
                        out.write_char('-')?;
                        queue.push_back(None);
                        queue.push_back(None);
                    }
                }
            }
            out.write_char('\n')?;
            width *= 2;
        }
        Ok(())
    }

    /// Writes the keys level by level, one line per level, each key
    /// right-aligned in `width` and followed by its flag (see
    /// [`dump_flags`](Self::dump_flags)). Empty positions are skipped.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let map: LLRBTreeMap<i32, ()> = [(1, ()), (2, ()), (3, ())].into_iter().collect();
    ///
    /// let mut out = String::new();
    /// map.dump_keys(&mut out, 2).unwrap();
    /// assert_eq!(out, "  2B\n  1B  3B\n");
    /// ```
    pub fn dump_keys<W>(&self, out: &mut W, width: usize) -> fmt::Result
    where
        W: Write,
        K: Display,
    {
        let mut level: VecDeque<Handle> = self.raw.root().into_iter().collect();
        while !level.is_empty() {
            for _ in 0..level.len() {
                let Some(handle) = level.pop_front() else { break };
                let node = self.raw.node(handle);
                write!(out, " {:>width$}{}", node.key(), flag(node))?;
                level.extend(node.left());
                level.extend(node.right());
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn empty_map_dumps_nothing() {
        let map: LLRBTreeMap<u8, u8> = LLRBTreeMap::new();
        let mut out = String::new();
        map.dump_flags(&mut out).unwrap();
        map.dump_keys(&mut out, 3).unwrap();
        map.write_columns(&mut out, &ColumnLayout::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn flags_fill_missing_positions() {
        // 1..=4 leaves 3 as the red left child of 4.
        let map: LLRBTreeMap<u8, ()> = (1..=4).map(|k| (k, ())).collect();
        let mut out = String::new();
        map.dump_flags(&mut out).unwrap();
        assert_eq!(out, " B\n BB\n --R-\n");
    }

    #[test]
    fn columns_skip_tombstones() {
        let mut map = LLRBTreeMap::new();
        map.put("a", 1);
        map.put("b", 2);
        map.erase(&"a");
        let mut out = String::new();
        map.write_columns(&mut out, &ColumnLayout::new(3, 3)).unwrap();
        assert_eq!(out, "b    2\n");
    }

    #[test]
    fn oversized_cells_are_not_truncated() {
        let mut map = LLRBTreeMap::new();
        map.put("longer", 12345);
        let mut out = String::new();
        map.write_columns(&mut out, &ColumnLayout::new(2, 2)).unwrap();
        assert_eq!(out, "longer12345\n");
    }
}
