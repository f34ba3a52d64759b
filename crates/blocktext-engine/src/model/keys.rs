use serde_json::{Map, Value};
use uuid::Uuid;

use super::{KEY_FIELD, classify, existing_key};

/// Length of generated keys, matching the usual 12 hex char CMS keys.
const KEY_LEN: usize = 12;

/// Generates identity keys for blocks and spans that arrive without one.
///
/// Keys are name-based (UUID v5) over the parent key, the position and the
/// canonical JSON of the node, so logically identical input always yields
/// the same keys across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenerator {
    namespace: Uuid,
}

impl KeyGenerator {
    /// Keys derived under a different namespace never collide with the default ones.
    pub fn with_namespace(namespace: Uuid) -> Self {
        Self { namespace }
    }

    pub fn block_key(&self, node: &Value, index: usize) -> String {
        self.derive("", index, node)
    }

    pub fn span_key(&self, parent_key: &str, node: &Value, index: usize) -> String {
        self.derive(parent_key, index, node)
    }

    fn derive(&self, parent_key: &str, index: usize, node: &Value) -> String {
        let material = format!("{parent_key}/{index}/{node}");
        let mut key = Uuid::new_v5(&self.namespace, material.as_bytes())
            .simple()
            .to_string();
        key.truncate(KEY_LEN);
        log::trace!("generated key {key} for node at {parent_key}/{index}");
        key
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self {
            namespace: Uuid::NAMESPACE_OID,
        }
    }
}

/// Returns a copy of `input` where every block and span carries a `_key`.
///
/// Accepts a single node or an array of nodes. Existing keys are kept as-is;
/// custom nodes are passed through untouched.
pub fn ensure_keys(input: &Value) -> Value {
    ensure_keys_with(input, &KeyGenerator::default())
}

pub fn ensure_keys_with(input: &Value, keys: &KeyGenerator) -> Value {
    match input {
        Value::Array(nodes) => Value::Array(
            nodes
                .iter()
                .enumerate()
                .map(|(index, node)| ensure_block_key(node, index, keys))
                .collect(),
        ),
        node => ensure_block_key(node, 0, keys),
    }
}

fn ensure_block_key(node: &Value, index: usize, keys: &KeyGenerator) -> Value {
    let Some(obj) = node.as_object() else {
        return node.clone();
    };
    if !classify::is_block(node) {
        return node.clone();
    }

    let block_key = existing_key(node)
        .map(str::to_string)
        .unwrap_or_else(|| keys.block_key(node, index));

    let mut keyed: Map<String, Value> = obj.clone();
    keyed.insert(KEY_FIELD.to_string(), Value::String(block_key.clone()));

    if let Some(Value::Array(children)) = obj.get("children") {
        let children = children
            .iter()
            .enumerate()
            .map(|(child_index, child)| ensure_span_key(&block_key, child, child_index, keys))
            .collect();
        keyed.insert("children".to_string(), Value::Array(children));
    }

    Value::Object(keyed)
}

fn ensure_span_key(block_key: &str, child: &Value, index: usize, keys: &KeyGenerator) -> Value {
    if !classify::is_span(child) || existing_key(child).is_some() {
        return child.clone();
    }
    let mut keyed = child.clone();
    if let Value::Object(obj) = &mut keyed {
        obj.insert(
            KEY_FIELD.to_string(),
            Value::String(keys.span_key(block_key, child, index)),
        );
    }
    keyed
}
