//! # blocktext engine
//!
//! Turns flat, CMS-authored block arrays into render trees and dispatches
//! them to a pluggable component registry.
//!
//! ## Pipeline
//!
//! 1. **Classification** (`model::classify`): untyped JSON nodes are tagged as
//!    spans, blocks, list-item blocks or opaque custom nodes
//! 2. **Key assignment** (`model::keys`): every block and span gets a stable key
//! 3. **List nesting** (`lists`): consecutive list items become a list forest
//! 4. **Mark trees** (`marks`): per block, flat spans become nested annotations
//! 5. **Dispatch** (`render`): the forest is walked and handed to components,
//!    with fallbacks and diagnostics for anything unresolved
//!
//! ```rust
//! use blocktext_engine::{RenderOptions, render};
//! use serde_json::json;
//!
//! let input = json!([{
//!     "_type": "block",
//!     "_key": "a1",
//!     "style": "normal",
//!     "children": [{"_type": "span", "_key": "s1", "text": "Hello", "marks": ["strong"]}]
//! }]);
//! let html = render(&input, &RenderOptions::default());
//! assert_eq!(html, "<p><strong>Hello</strong></p>");
//! ```

pub mod error;
pub mod lists;
pub mod marks;
pub mod model;
pub mod render;
pub mod snapshot;
pub mod text;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use error::RenderError;
pub use lists::{ListChild, ListItem, ListNestMode, ListNode, nest_lists};
pub use marks::{Mark, MarkNode, build_marks_tree};
pub use model::{
    Block, CustomNode, Document, Inline, KeyGenerator, ListItemInfo, MarkDef, Node, NodeClass,
    Span, classify, ensure_keys,
};
pub use render::{
    BlockProps, ComponentOverrides, ComponentRegistry, HardBreak, ListProps, MarkProps,
    MissingComponent, MissingComponentHandler, NodeType, RenderContext, RenderOptions, Renderer,
    Renderers, TypeProps, render, render_json,
};
pub use text::to_plain_text;
