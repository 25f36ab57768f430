//! Tree queries over a grown Lichtenberg grid.
//!
//! [`GrowthTree::build`] projects the broken cells of a
//! [`CellGrid`](lichtenberg_core::CellGrid) into an index-linked forest
//! that answers leaf and path queries. The tree is a snapshot: it does not
//! borrow the grid, and it never changes after construction.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod tree;

pub use tree::{Ancestors, GrowthTree, Leaf, NodeId, NodeRef};
