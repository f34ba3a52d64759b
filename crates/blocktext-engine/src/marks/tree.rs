use crate::model::{Block, CustomNode, Inline, MarkDef};

use super::sort::sorted_marks;

/// A node of a block's annotation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkNode<'a> {
    Mark(Mark<'a>),
    /// One line of a span's text.
    Text(&'a str),
    /// A newline inside a span's text.
    HardBreak,
    /// A non-span child of the block, passed through untouched.
    Object(&'a CustomNode),
}

/// An open annotation spanning one or more contiguous spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark<'a> {
    /// The key spans reference, either a decorator name or a `markDefs` key.
    pub key: &'a str,
    /// The definition's type, or the key itself when there is no definition.
    pub mark_type: &'a str,
    pub definition: Option<&'a MarkDef>,
    pub children: Vec<MarkNode<'a>>,
}

impl<'a> Mark<'a> {
    fn root() -> Self {
        Self {
            key: "",
            mark_type: "",
            definition: None,
            children: Vec::new(),
        }
    }

    fn open(block: &'a Block, key: &'a str) -> Self {
        let definition = block.mark_def(key);
        Self {
            key,
            mark_type: definition.map_or(key, |def| def.mark_type.as_str()),
            definition,
            children: Vec::new(),
        }
    }

    /// Text covered by this mark, hard breaks as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[MarkNode<'_>], out: &mut String) {
    for node in nodes {
        match node {
            MarkNode::Mark(mark) => collect_text(&mark.children, out),
            MarkNode::Text(text) => out.push_str(text),
            MarkNode::HardBreak => out.push('\n'),
            MarkNode::Object(_) => {}
        }
    }
}

/// Builds the annotation tree for a block's children.
///
/// Walks the spans once while keeping a stack of open marks. Each span first
/// closes every open mark it no longer carries, then opens the marks it still
/// needs in run-length order, and finally appends its content to the
/// innermost open mark.
pub fn build_marks_tree(block: &Block) -> Vec<MarkNode<'_>> {
    let mut stack = vec![Mark::root()];

    for (index, child) in block.children.iter().enumerate() {
        let mut needed = sorted_marks(&block.children, index);

        // Keep the open marks this span still carries, outermost first
        let mut depth = 1;
        while let Some(open) = stack.get(depth) {
            let Some(pos) = needed.iter().position(|key| *key == open.key) else {
                break;
            };
            needed.remove(pos);
            depth += 1;
        }
        close_to(&mut stack, depth);

        for key in needed {
            stack.push(Mark::open(block, key));
        }

        let Some(top) = stack.last_mut() else {
            continue;
        };
        match child {
            Inline::Span(span) => push_text(&mut top.children, &span.text),
            Inline::Object(object) => top.children.push(MarkNode::Object(object)),
        }
    }

    close_to(&mut stack, 1);
    stack
        .pop()
        .map(|root| root.children)
        .unwrap_or_default()
}

/// Pops marks until `depth` remain, attaching each to its parent.
fn close_to(stack: &mut Vec<Mark<'_>>, depth: usize) {
    while stack.len() > depth.max(1) {
        let Some(closed) = stack.pop() else {
            break;
        };
        if let Some(parent) = stack.last_mut() {
            parent.children.push(MarkNode::Mark(closed));
        }
    }
}

fn push_text<'a>(target: &mut Vec<MarkNode<'a>>, text: &'a str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            target.push(MarkNode::HardBreak);
        }
        target.push(MarkNode::Text(line));
    }
}
