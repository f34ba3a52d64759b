use serde_json::Value;

use super::{KEY_FIELD, RESERVED_PREFIX, TYPE_FIELD};

/// Structural category of an untyped node.
///
/// Produced by [`classify`]; a node missing the fields a variant requires
/// simply falls through to the next, more permissive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    ListItemBlock,
    Block,
    Span,
    Custom,
}

/// Classifies a node, most specific variant first.
pub fn classify(node: &Value) -> NodeClass {
    if is_list_item_block(node) {
        NodeClass::ListItemBlock
    } else if is_block(node) {
        NodeClass::Block
    } else if is_span(node) {
        NodeClass::Span
    } else {
        NodeClass::Custom
    }
}

/// A span has a string `text`, and `marks` (when present) is an array of strings.
pub fn is_span(node: &Value) -> bool {
    let Some(obj) = node.as_object() else {
        return false;
    };
    if !matches!(obj.get("text"), Some(Value::String(_))) {
        return false;
    }
    match obj.get("marks") {
        None => true,
        Some(Value::Array(marks)) => marks.iter().all(Value::is_string),
        Some(_) => false,
    }
}

/// A block has a non-reserved string `_type`, mappable `markDefs` and an
/// array of typed `children`.
pub fn is_block(node: &Value) -> bool {
    let Some(obj) = node.as_object() else {
        return false;
    };

    let Some(type_name) = obj.get(TYPE_FIELD).and_then(Value::as_str) else {
        return false;
    };
    if type_name.starts_with(RESERVED_PREFIX) {
        return false;
    }

    // Every mark definition needs a string key to be referenced from spans
    let mark_defs_ok = match obj.get("markDefs") {
        None | Some(Value::Null) => true,
        Some(Value::Array(defs)) => defs
            .iter()
            .all(|def| def.get(KEY_FIELD).is_some_and(Value::is_string)),
        Some(_) => false,
    };

    let children_ok = match obj.get("children") {
        Some(Value::Array(children)) => children.iter().all(|child| {
            child
                .as_object()
                .is_some_and(|child| child.contains_key(TYPE_FIELD))
        }),
        _ => false,
    };

    mark_defs_ok && children_ok
}

/// A list-item block is a block with a string `listItem` and, if present, a numeric `level`.
pub fn is_list_item_block(node: &Value) -> bool {
    if !is_block(node) {
        return false;
    }
    let has_kind = matches!(node.get("listItem"), Some(Value::String(_)));
    let level_ok = match node.get("level") {
        None => true,
        Some(level) => level.is_number(),
    };
    has_kind && level_ok
}
