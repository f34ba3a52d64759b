use serde_json::{Map, Value};

use crate::{
    error::RenderError,
    lists::{ListNestMode, nest_lists},
};

use super::{
    Block, CustomNode, DEFAULT_STYLE, Inline, KEY_FIELD, KeyGenerator, ListItemInfo, MarkDef, Node,
    Span, TYPE_FIELD, classify, existing_key,
};

/// A flat, typed document: the classified top-level nodes in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Parses a single node or an array of nodes. Never fails; `null` entries are skipped.
    pub fn from_value(input: &Value) -> Self {
        Self::from_value_with(input, &KeyGenerator::default())
    }

    pub fn from_value_with(input: &Value, keys: &KeyGenerator) -> Self {
        let nodes = match input {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .filter(|(_, item)| !item.is_null())
                .map(|(index, item)| parse_node(item, index, keys))
                .collect(),
            Value::Null => Vec::new(),
            node => vec![parse_node(node, 0, keys)],
        };
        Self { nodes }
    }

    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.nodes.iter().filter_map(Node::as_block)
    }

    /// Groups list items into the nested list forest.
    pub fn into_nested(self, mode: ListNestMode) -> Vec<Node> {
        nest_lists(self.nodes, mode)
    }
}

fn parse_node(value: &Value, index: usize, keys: &KeyGenerator) -> Node {
    match value.as_object() {
        Some(obj) if classify::is_block(value) => Node::Block(parse_block(obj, value, index, keys)),
        _ => Node::Custom(CustomNode::from_value(value)),
    }
}

fn parse_block(obj: &Map<String, Value>, value: &Value, index: usize, keys: &KeyGenerator) -> Block {
    let key = existing_key(value)
        .map(str::to_string)
        .unwrap_or_else(|| keys.block_key(value, index));

    let children = match obj.get("children") {
        Some(Value::Array(children)) => children
            .iter()
            .enumerate()
            .map(|(child_index, child)| parse_inline(&key, child, child_index, keys))
            .collect(),
        _ => Vec::new(),
    };

    let mark_defs = match obj.get("markDefs") {
        Some(Value::Array(defs)) => defs.iter().filter_map(parse_mark_def).collect(),
        _ => Vec::new(),
    };

    let list_item = classify::is_list_item_block(value).then(|| ListItemInfo {
        kind: str_field(obj, "listItem").unwrap_or_default().to_string(),
        level: obj.get("level").and_then(parse_level).unwrap_or(1),
    });

    Block {
        key,
        type_name: str_field(obj, TYPE_FIELD).unwrap_or_default().to_string(),
        style: str_field(obj, "style")
            .filter(|style| !style.is_empty())
            .unwrap_or(DEFAULT_STYLE)
            .to_string(),
        children,
        mark_defs,
        list_item,
    }
}

fn parse_inline(block_key: &str, child: &Value, index: usize, keys: &KeyGenerator) -> Inline {
    if !classify::is_span(child) {
        return Inline::Object(CustomNode::from_value(child));
    }

    let key = existing_key(child)
        .map(str::to_string)
        .unwrap_or_else(|| keys.span_key(block_key, child, index));
    let text = child
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let marks = match child.get("marks") {
        Some(Value::Array(marks)) => marks
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Inline::Span(Span { key, text, marks })
}

fn parse_mark_def(def: &Value) -> Option<MarkDef> {
    let obj = def.as_object()?;
    let key = str_field(obj, KEY_FIELD)?.to_string();
    let mark_type = str_field(obj, TYPE_FIELD)
        .filter(|mark_type| !mark_type.is_empty())
        .unwrap_or(&key)
        .to_string();
    let fields = obj
        .iter()
        .filter(|(name, _)| name.as_str() != KEY_FIELD && name.as_str() != TYPE_FIELD)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    Some(MarkDef {
        key,
        mark_type,
        fields,
    })
}

/// Levels below 1 (or non-integral ones truncating to 0) count as level 1.
fn parse_level(level: &Value) -> Option<u32> {
    let level = level
        .as_u64()
        .or_else(|| level.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64))?;
    u32::try_from(level).ok().filter(|level| *level > 0)
}

fn str_field<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    obj.get(field).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ensure_keys;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_standard_block_with_defaults() {
        let doc = Document::from_value(&json!([{
            "_type": "block",
            "_key": "b1",
            "children": [{"_type": "span", "_key": "s1", "text": "hello"}]
        }]));

        let block = doc.nodes[0].as_block().unwrap();
        assert_eq!(block.key, "b1");
        assert_eq!(block.style, "normal");
        assert!(!block.is_list_item());
        assert_eq!(
            block.children,
            vec![Inline::Span(Span {
                key: "s1".into(),
                text: "hello".into(),
                marks: vec![],
            })]
        );
    }

    #[test]
    fn parses_list_item_level_defaults() {
        let doc = Document::from_value(&json!([
            {"_type": "block", "listItem": "bullet", "children": []},
            {"_type": "block", "listItem": "number", "level": 3, "children": []},
            {"_type": "block", "listItem": "number", "level": 0, "children": []},
            {"_type": "block", "listItem": "number", "level": 2.0, "children": []}
        ]));

        let levels: Vec<_> = doc.blocks().map(Block::level).collect();
        assert_eq!(levels, vec![1, 3, 1, 2]);
        assert_eq!(doc.nodes[1].as_block().unwrap().list_kind(), Some("number"));
    }

    #[test]
    fn non_numeric_level_demotes_to_plain_block() {
        let doc = Document::from_value(&json!([
            {"_type": "block", "listItem": "bullet", "level": "2", "children": []}
        ]));
        assert!(!doc.nodes[0].as_block().unwrap().is_list_item());
    }

    #[test]
    fn mark_defs_keep_payload_and_type() {
        let doc = Document::from_value(&json!({
            "_type": "block",
            "markDefs": [
                {"_key": "l1", "_type": "link", "href": "https://example.com"},
                {"_key": "plain"}
            ],
            "children": []
        }));

        let block = doc.nodes[0].as_block().unwrap();
        let link = block.mark_def("l1").unwrap();
        assert_eq!(link.mark_type, "link");
        assert_eq!(link.get("href"), Some(&json!("https://example.com")));
        assert_eq!(block.mark_def("plain").unwrap().mark_type, "plain");
        assert!(block.mark_def("missing").is_none());
    }

    #[test]
    fn non_span_children_are_opaque_objects() {
        let doc = Document::from_value(&json!({
            "_type": "block",
            "children": [{"_type": "mention", "userId": 7}]
        }));
        let block = doc.nodes[0].as_block().unwrap();
        match &block.children[0] {
            Inline::Object(object) => {
                assert_eq!(object.type_name, "mention");
                assert_eq!(object.value["userId"], 7);
            }
            other => panic!("expected opaque object, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_top_level_nodes_become_custom() {
        let doc = Document::from_value(&json!([
            {"_type": "image", "_key": "img", "asset": "a"},
            {"_type": "span", "text": "stray"},
            null,
            "text"
        ]));

        assert_eq!(doc.nodes.len(), 3);
        match &doc.nodes[0] {
            Node::Custom(custom) => {
                assert_eq!(custom.type_name, "image");
                assert_eq!(custom.key.as_deref(), Some("img"));
            }
            other => panic!("expected custom node, got {other:?}"),
        }
        assert!(matches!(&doc.nodes[1], Node::Custom(c) if c.type_name == "span"));
        assert!(matches!(&doc.nodes[2], Node::Custom(c) if c.type_name.is_empty()));
    }

    #[test]
    fn typed_keys_match_raw_key_normalization() {
        let raw = json!([
            {"_type": "block", "children": [{"_type": "span", "text": "a"}]}
        ]);
        assert_eq!(
            Document::from_value(&raw),
            Document::from_value(&ensure_keys(&raw))
        );
    }

    #[test]
    fn from_json_reports_invalid_input() {
        let err = Document::from_json("[{").unwrap_err();
        assert!(err.to_string().contains("Invalid document JSON"));
    }
}
