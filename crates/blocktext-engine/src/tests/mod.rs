//! Shared builders for unit tests.
//!
//! Typed nodes are built directly so tests read as the structure they check,
//! without going through JSON parsing.

use serde_json::{Map, Value, json};

use crate::model::{Block, CustomNode, Inline, ListItemInfo, MarkDef, Node, Span};

pub fn span(text: &str, marks: &[&str]) -> Inline {
    Inline::Span(Span {
        key: format!("s-{text}"),
        text: text.to_string(),
        marks: marks.iter().map(|m| m.to_string()).collect(),
    })
}

pub fn object(type_name: &str) -> Inline {
    Inline::Object(custom(type_name))
}

pub fn custom(type_name: &str) -> CustomNode {
    CustomNode::from_value(&json!({"_type": type_name, "_key": format!("o-{type_name}")}))
}

pub fn link_def(key: &str, mark_type: &str, href: Option<&str>) -> MarkDef {
    let mut fields = Map::new();
    if let Some(href) = href {
        fields.insert("href".to_string(), Value::String(href.to_string()));
    }
    MarkDef {
        key: key.to_string(),
        mark_type: mark_type.to_string(),
        fields,
    }
}

pub fn block_with(children: Vec<Inline>, mark_defs: Vec<MarkDef>) -> Block {
    Block {
        key: "b".to_string(),
        type_name: "block".to_string(),
        style: "normal".to_string(),
        children,
        mark_defs,
        list_item: None,
    }
}

pub fn paragraph(key: &str, text: &str) -> Node {
    let mut block = block_with(vec![span(text, &[])], vec![]);
    block.key = key.to_string();
    Node::Block(block)
}

pub fn item(key: &str, kind: &str, level: u32) -> Node {
    let mut block = block_with(vec![span(key, &[])], vec![]);
    block.key = key.to_string();
    block.list_item = Some(ListItemInfo {
        kind: kind.to_string(),
        level,
    });
    Node::Block(block)
}
