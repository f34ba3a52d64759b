//! # Mark Trees
//!
//! Rebuilds the nested annotation structure of a block from its flat span
//! sequence. Spans only list the marks they carry; nesting is derived from how
//! far each mark runs over the following spans.
//!
//! ## Modules
//!
//! - **`sort`**: Per-span mark ordering by run length with decorator tie-breaks
//! - **`tree`**: Stack-based builder producing [`MarkNode`] trees
//!
//! ## Key Invariants
//!
//! - A contiguous run of spans sharing a mark yields exactly one [`Mark`] node
//! - Longer-running marks are always ancestors of shorter ones
//! - Trees borrow from the block and are rebuilt on every render pass

pub mod sort;
pub mod tree;

pub use sort::{KNOWN_DECORATORS, sorted_marks};
pub use tree::{Mark, MarkNode, build_marks_tree};
