//! # List Nesting
//!
//! Groups flat, leveled list-item blocks into a list forest.
//!
//! Content stores keep list items as ordinary top-level blocks tagged with a
//! kind (`bullet`, `number`, ...) and a level. Rendering needs real nesting,
//! so [`nest_lists`] folds consecutive items into [`ListNode`]s and opens a
//! nested list whenever the level increases.
//!
//! ## Key Invariants
//!
//! - Every item directly inside a [`ListNode`] has that list's level and kind
//! - Non-list blocks are passed through in order and end the current list
//! - Nesting never fails: a state that cannot be placed degrades to a flat block

use std::fmt;

use crate::model::{Block, Node};

/// Where a deeper list is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListNestMode {
    /// Under the last item of the enclosing list, like `<li><ul>..</ul></li>`.
    #[default]
    Html,
    /// As a direct child of the enclosing list.
    Direct,
}

impl ListNestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListNestMode::Html => "html",
            ListNestMode::Direct => "direct",
        }
    }
}

impl fmt::Display for ListNestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived list of one kind at one level.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    /// The first item's key with a `-parent` suffix.
    pub key: String,
    pub level: u32,
    /// The list kind shared by every direct item.
    pub list_item: String,
    pub mode: ListNestMode,
    pub children: Vec<ListChild>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListChild {
    Item(ListItem),
    /// Only produced in [`ListNestMode::Direct`].
    List(ListNode),
}

/// A list-item block plus the deeper lists nested under it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub block: Block,
    pub sublists: Vec<ListNode>,
}

impl ListItem {
    pub fn new(block: Block) -> Self {
        Self {
            block,
            sublists: Vec::new(),
        }
    }
}

impl ListNode {
    fn from_block(block: Block, mode: ListNestMode) -> Self {
        Self {
            key: format!("{}-parent", block.key),
            level: block.level(),
            list_item: block.list_kind().unwrap_or_default().to_string(),
            mode,
            children: vec![ListChild::Item(ListItem::new(block))],
        }
    }

    fn accepts(&self, block: &Block) -> bool {
        block.level() == self.level && block.list_kind() == Some(self.list_item.as_str())
    }

    /// Items directly in this list, in order.
    pub fn items(&self) -> impl Iterator<Item = &ListItem> {
        self.children.iter().filter_map(|child| match child {
            ListChild::Item(item) => Some(item),
            ListChild::List(_) => None,
        })
    }

    fn push_item(&mut self, block: Block) {
        self.children.push(ListChild::Item(ListItem::new(block)));
    }

    fn attach_nested(&mut self, nested: ListNode) {
        match (self.mode, self.children.last_mut()) {
            (ListNestMode::Html, Some(ListChild::Item(item))) => item.sublists.push(nested),
            _ => self.children.push(ListChild::List(nested)),
        }
    }

    /// The list attached after the last item, if any.
    fn last_nested(&self) -> Option<&ListNode> {
        match self.children.last()? {
            ListChild::List(list) => Some(list),
            ListChild::Item(item) => item.sublists.last(),
        }
    }

    fn last_nested_mut(&mut self) -> Option<&mut ListNode> {
        match self.children.last_mut()? {
            ListChild::List(list) => Some(list),
            ListChild::Item(item) => item.sublists.last_mut(),
        }
    }
}

enum Placement {
    Fresh,
    Append(usize),
    Nest(usize),
    Unexpected,
}

/// Folds list-item blocks into a list forest.
///
/// The list being extended is tracked as a depth along the right-most spine
/// of the last top-level node: depth 0 is that node, each further step is the
/// list attached at the end of the previous one.
pub fn nest_lists(nodes: Vec<Node>, mode: ListNestMode) -> Vec<Node> {
    let mut tree: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut current: Option<usize> = None;

    for node in nodes {
        let block = match node {
            Node::Block(block) if block.is_list_item() => block,
            other => {
                tree.push(other);
                current = None;
                continue;
            }
        };

        let placement = match current {
            None => Placement::Fresh,
            Some(depth) => match spine_list(&tree, depth) {
                None => Placement::Unexpected,
                Some(list) if list.accepts(&block) => Placement::Append(depth),
                Some(list) if block.level() > list.level => Placement::Nest(depth),
                // Shallower, or same level with another kind
                Some(_) => find_matching(&tree, &block).map_or(Placement::Fresh, Placement::Append),
            },
        };

        current = match placement {
            Placement::Fresh => {
                tree.push(Node::List(ListNode::from_block(block, mode)));
                Some(0)
            }
            Placement::Append(depth) => match spine_list_mut(&mut tree, depth) {
                Some(list) => {
                    list.push_item(block);
                    Some(depth)
                }
                None => push_unexpected(&mut tree, block),
            },
            Placement::Nest(depth) => match spine_list_mut(&mut tree, depth) {
                Some(list) => {
                    list.attach_nested(ListNode::from_block(block, mode));
                    Some(depth + 1)
                }
                None => push_unexpected(&mut tree, block),
            },
            Placement::Unexpected => push_unexpected(&mut tree, block),
        };
    }

    tree
}

fn push_unexpected(tree: &mut Vec<Node>, block: Block) -> Option<usize> {
    log::warn!(
        "Unknown list state encountered for block {} ({:?} at level {})",
        block.key,
        block.list_kind(),
        block.level()
    );
    tree.push(Node::Block(block));
    None
}

fn spine_list(tree: &[Node], depth: usize) -> Option<&ListNode> {
    let mut list = match tree.last()? {
        Node::List(list) => list,
        _ => return None,
    };
    for _ in 0..depth {
        list = list.last_nested()?;
    }
    Some(list)
}

fn spine_list_mut(tree: &mut [Node], depth: usize) -> Option<&mut ListNode> {
    let mut list = match tree.last_mut()? {
        Node::List(list) => list,
        _ => return None,
    };
    for _ in 0..depth {
        list = list.last_nested_mut()?;
    }
    Some(list)
}

/// Depth of the first list on the spine with the block's level and kind.
fn find_matching(tree: &[Node], block: &Block) -> Option<usize> {
    let mut list = match tree.last()? {
        Node::List(list) => list,
        _ => return None,
    };
    let mut depth = 0;
    loop {
        if list.accepts(block) {
            return Some(depth);
        }
        list = list.last_nested()?;
        depth += 1;
    }
}
