use crate::model::{Inline, Node};

/// Plain text of a node sequence, one paragraph per block.
///
/// Span texts within a block are concatenated. Inline objects contribute no
/// text, but when one sits between two words it is replaced by a single
/// space. Blocks are separated by a blank line; non-block nodes (including
/// nested lists) are skipped.
pub fn to_plain_text(nodes: &[Node]) -> String {
    nodes
        .iter()
        .filter_map(Node::as_block)
        .map(|block| block_text(&block.children))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block_text(children: &[Inline]) -> String {
    let mut text = String::new();
    let mut pad_next = false;

    for child in children {
        match child {
            Inline::Span(span) => {
                let needs_pad = pad_next
                    && !text.is_empty()
                    && !text.ends_with(char::is_whitespace)
                    && !span.text.starts_with(char::is_whitespace);
                if needs_pad {
                    text.push(' ');
                }
                text.push_str(&span.text);
                pad_next = false;
            }
            Inline::Object(_) => pad_next = true,
        }
    }

    text
}
