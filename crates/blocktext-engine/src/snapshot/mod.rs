//! # Snapshot Testing Support
//!
//! Utilities for testing the derived trees via snapshot assertions and
//! invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts a nested forest (lists, items, mark trees) to a stable,
//!   serializable `Snap` for `insta` snapshots and structural dumps
//! - **`invariants`**: Runtime checks for nesting correctness (items match their
//!   list, nested lists are deeper, one mark node per contiguous run)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{MarkSnap, NodeSnap, Snap, normalize};
