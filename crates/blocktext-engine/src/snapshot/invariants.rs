use crate::{
    lists::{ListChild, ListNode},
    marks::{MarkNode, build_marks_tree},
    model::{Block, Node},
};

pub fn check(nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Block(block) => check_marks(block),
            Node::List(list) => check_list(list),
            Node::Custom(_) => {}
        }
    }
}

fn check_list(list: &ListNode) {
    assert!(!list.children.is_empty(), "empty list: {}", list.key);
    for child in &list.children {
        match child {
            ListChild::Item(item) => {
                assert_eq!(
                    (item.block.level(), item.block.list_kind()),
                    (list.level, Some(list.list_item.as_str())),
                    "item {} does not match list {}",
                    item.block.key,
                    list.key
                );
                check_marks(&item.block);
                for sublist in &item.sublists {
                    check_nested(list, sublist);
                }
            }
            ListChild::List(nested) => check_nested(list, nested),
        }
    }
}

fn check_nested(parent: &ListNode, nested: &ListNode) {
    assert!(
        nested.level > parent.level,
        "nested list {} (level {}) is not deeper than {} (level {})",
        nested.key,
        nested.level,
        parent.key,
        parent.level
    );
    check_list(nested);
}

fn check_marks(block: &Block) {
    check_mark_children(&block.key, &build_marks_tree(block), &mut Vec::new());
}

fn check_mark_children<'a>(block_key: &str, nodes: &[MarkNode<'a>], open: &mut Vec<&'a str>) {
    let mut previous: Option<&str> = None;
    for node in nodes {
        let MarkNode::Mark(mark) = node else {
            previous = None;
            continue;
        };
        assert!(
            !mark.children.is_empty(),
            "empty mark {} in block {block_key}",
            mark.key
        );
        assert!(
            !open.contains(&mark.key),
            "mark {} nested inside itself in block {block_key}",
            mark.key
        );
        assert_ne!(
            previous,
            Some(mark.key),
            "mark {} split into adjacent nodes in block {block_key}",
            mark.key
        );

        open.push(mark.key);
        check_mark_children(block_key, &mark.children, open);
        open.pop();
        previous = Some(mark.key);
    }
}
