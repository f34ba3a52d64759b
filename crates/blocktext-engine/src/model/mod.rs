//! # Block Model
//!
//! Typed view over the flat block arrays produced by the content store.
//!
//! ## Modules
//!
//! - **`classify`**: Structural predicates over untyped JSON (`is_span`, `is_block`, ...)
//! - **`keys`**: `KeyGenerator` and `ensure_keys` for deterministic identity keys
//! - **`document`**: `Document` parsing from JSON into typed [`Node`]s
//!
//! ## Key Invariants
//!
//! - Parsing never fails: anything that is not a block becomes a [`CustomNode`]
//! - Every parsed [`Block`] and [`Span`] carries a non-empty key
//! - Raw input is never mutated; typed nodes are owned copies

pub mod classify;
pub mod document;
pub mod keys;

use serde_json::{Map, Value};

use crate::lists::ListNode;

pub use classify::{NodeClass, classify};
pub use document::Document;
pub use keys::{KeyGenerator, ensure_keys};

/// Discriminator field carried by every node.
pub const TYPE_FIELD: &str = "_type";
/// Identity key field.
pub const KEY_FIELD: &str = "_key";
/// Discriminators starting with this prefix are reserved for derived nodes.
pub const RESERVED_PREFIX: char = '@';
/// Style used when a block does not declare one.
pub const DEFAULT_STYLE: &str = "normal";

/// Inline text leaf, optionally annotated with marks.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub key: String,
    pub text: String,
    /// Mark keys in input order. Either decorator names or `markDefs` keys.
    pub marks: Vec<String>,
}

/// Payload for a non-trivial mark (links, references), declared once per block.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkDef {
    pub key: String,
    pub mark_type: String,
    /// Remaining fields of the definition, e.g. `href` for links.
    pub fields: Map<String, Value>,
}

impl MarkDef {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// A node the engine never introspects, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomNode {
    /// Value of `_type`, empty when the node has none.
    pub type_name: String,
    pub key: Option<String>,
    pub value: Value,
}

impl CustomNode {
    pub fn from_value(value: &Value) -> Self {
        Self {
            type_name: value
                .get(TYPE_FIELD)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            key: existing_key(value).map(str::to_string),
            value: value.clone(),
        }
    }
}

/// A child of a block: either a text span or an opaque inline object.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Span(Span),
    Object(CustomNode),
}

/// List membership of a list-item block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemInfo {
    /// The list kind, e.g. `bullet` or `number`.
    pub kind: String,
    /// Nesting level, always >= 1.
    pub level: u32,
}

/// A top-level unit of rich text.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub key: String,
    pub type_name: String,
    pub style: String,
    pub children: Vec<Inline>,
    pub mark_defs: Vec<MarkDef>,
    /// Present when this block is a list item.
    pub list_item: Option<ListItemInfo>,
}

impl Block {
    pub fn is_list_item(&self) -> bool {
        self.list_item.is_some()
    }

    /// Looks up a mark definition by the key spans reference it with.
    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|def| def.key == key)
    }

    pub fn level(&self) -> u32 {
        self.list_item.as_ref().map_or(1, |info| info.level)
    }

    pub fn list_kind(&self) -> Option<&str> {
        self.list_item.as_ref().map(|info| info.kind.as_str())
    }
}

/// A node of the (possibly nested) document forest.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A standard or list-item block.
    Block(Block),
    /// A derived list; only produced by [`crate::nest_lists`].
    List(ListNode),
    /// Anything that failed the block test.
    Custom(CustomNode),
}

impl Node {
    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Block(block) => Some(&block.key),
            Node::List(list) => Some(&list.key),
            Node::Custom(custom) => custom.key.as_deref(),
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }
}

/// A key counts as present only when it is a non-empty string.
pub(crate) fn existing_key(value: &Value) -> Option<&str> {
    value
        .get(KEY_FIELD)
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
}
