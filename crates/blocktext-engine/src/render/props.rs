use serde_json::Value;

use crate::{
    lists::ListNode,
    model::{Block, CustomNode, MarkDef},
};

/// Input to `block` and `listItem` components.
#[derive(Debug, Clone, Copy)]
pub struct BlockProps<'a> {
    pub block: &'a Block,
    /// Already rendered content of the block.
    pub children: &'a str,
    pub index: usize,
    pub is_inline: bool,
    pub context: &'a Value,
}

/// Input to `list` components.
#[derive(Debug, Clone, Copy)]
pub struct ListProps<'a> {
    pub list: &'a ListNode,
    /// Already rendered items (and, in direct mode, nested lists).
    pub children: &'a str,
    pub index: usize,
    pub context: &'a Value,
}

/// Input to `marks` components.
#[derive(Debug, Clone, Copy)]
pub struct MarkProps<'a> {
    pub mark_type: &'a str,
    pub mark_key: &'a str,
    /// The block's definition for this mark, absent for plain decorators.
    pub definition: Option<&'a MarkDef>,
    /// Unrendered text covered by the mark.
    pub text: &'a str,
    pub children: &'a str,
    pub context: &'a Value,
}

impl MarkProps<'_> {
    /// A string field of the mark definition, e.g. `href`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.definition
            .and_then(|def| def.get(name))
            .and_then(Value::as_str)
    }
}

/// Input to `types` components.
#[derive(Debug, Clone, Copy)]
pub struct TypeProps<'a> {
    pub node: &'a CustomNode,
    pub index: usize,
    pub is_inline: bool,
    /// The enclosing block when the node sits inline.
    pub parent_block: Option<&'a Block>,
    pub context: &'a Value,
}
