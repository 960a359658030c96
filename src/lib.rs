//! An ordered associative array on a left-leaning red-black tree, with lazy deletion.
//!
//! [`LLRBTreeMap`] keeps its keys sorted by a predicate bound at construction
//! and balances itself as a left-leaning red-black tree, so lookups and
//! insertions take O(log n):
//!
//! - [`get`](LLRBTreeMap::get) - Get-or-insert, the map's indexing operation
//! - [`erase`](LLRBTreeMap::erase) - Mark an entry dead, leaving a tombstone in the tree
//! - [`rehash`](LLRBTreeMap::rehash) - Rebuild from the alive entries, reclaiming tombstones
//! - [`traverse`](LLRBTreeMap::traverse) - Visit every node in order, tombstones included
//!
//! # Example
//!
//! ```
//! use llrb_tree::{wordify, LLRBTreeMap};
//!
//! let mut frequency = LLRBTreeMap::new();
//! for word in wordify::tokens("The quick fox -- the QUICK dog.") {
//!     *frequency.get(word) += 1;
//! }
//!
//! assert_eq!(frequency.find(&"quick".to_string()), Some(&2));
//! assert_eq!(frequency.len(), 4);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - The map only requires `alloc`
//! - **`std`** (default) - The [`wordbench`] workbench that reads text files into a word histogram
//! - **`cli`** (default) - The `wordbench` command line front end
//!
//! # Implementation
//!
//! Nodes live in an arena and link to their children by handle. Erased nodes
//! stay in place until a rehash, so erasing never rotates and never frees.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

mod color;
mod compare;
mod error;
mod layout;
mod raw;

pub mod llrb_map;
#[cfg(feature = "std")]
pub mod wordbench;
pub mod wordify;

pub use color::Color;
pub use compare::{Compare, NaturalOrder, ReverseOrder};
pub use error::{Direction, Error};
pub use layout::{Align, ColumnLayout};
pub use llrb_map::LLRBTreeMap;
