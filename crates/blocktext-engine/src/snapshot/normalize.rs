use serde::Serialize;

use crate::{
    lists::{ListChild, ListNode},
    marks::{MarkNode, build_marks_tree},
    model::{Block, Node},
};

/// Snapshot of a nested forest.
#[derive(Debug, Serialize, PartialEq)]
pub struct Snap {
    pub nodes: Vec<NodeSnap>,
}

/// Snapshot of one forest node.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "kind")]
pub enum NodeSnap {
    Block {
        key: String,
        style: String,
        content: Vec<MarkSnap>,
    },
    List {
        key: String,
        list_item: String,
        level: u32,
        children: Vec<NodeSnap>,
    },
    Item {
        key: String,
        style: String,
        level: u32,
        content: Vec<MarkSnap>,
        /// Lists nested under this item.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        sublists: Vec<NodeSnap>,
    },
    Custom {
        type_name: String,
        key: Option<String>,
    },
}

/// Snapshot of one annotation tree node.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "kind")]
pub enum MarkSnap {
    Mark {
        mark_type: String,
        key: String,
        children: Vec<MarkSnap>,
    },
    Text {
        text: String,
    },
    HardBreak,
    Object {
        type_name: String,
    },
}

/// Converts a forest into a serializable snapshot, building every block's
/// mark tree along the way.
pub fn normalize(nodes: &[Node]) -> Snap {
    Snap {
        nodes: nodes.iter().map(node_snap).collect(),
    }
}

fn node_snap(node: &Node) -> NodeSnap {
    match node {
        Node::Block(block) if block.is_list_item() => item_snap(block, &[]),
        Node::Block(block) => NodeSnap::Block {
            key: block.key.clone(),
            style: block.style.clone(),
            content: content_snap(block),
        },
        Node::List(list) => list_snap(list),
        Node::Custom(custom) => NodeSnap::Custom {
            type_name: custom.type_name.clone(),
            key: custom.key.clone(),
        },
    }
}

fn list_snap(list: &ListNode) -> NodeSnap {
    NodeSnap::List {
        key: list.key.clone(),
        list_item: list.list_item.clone(),
        level: list.level,
        children: list
            .children
            .iter()
            .map(|child| match child {
                ListChild::Item(item) => item_snap(&item.block, &item.sublists),
                ListChild::List(nested) => list_snap(nested),
            })
            .collect(),
    }
}

fn item_snap(block: &Block, sublists: &[ListNode]) -> NodeSnap {
    NodeSnap::Item {
        key: block.key.clone(),
        style: block.style.clone(),
        level: block.level(),
        content: content_snap(block),
        sublists: sublists.iter().map(list_snap).collect(),
    }
}

fn content_snap(block: &Block) -> Vec<MarkSnap> {
    build_marks_tree(block).iter().map(mark_snap).collect()
}

fn mark_snap(node: &MarkNode<'_>) -> MarkSnap {
    match node {
        MarkNode::Mark(mark) => MarkSnap::Mark {
            mark_type: mark.mark_type.to_string(),
            key: mark.key.to_string(),
            children: mark.children.iter().map(mark_snap).collect(),
        },
        MarkNode::Text(text) => MarkSnap::Text {
            text: text.to_string(),
        },
        MarkNode::HardBreak => MarkSnap::HardBreak,
        MarkNode::Object(object) => MarkSnap::Object {
            type_name: object.type_name.clone(),
        },
    }
}
