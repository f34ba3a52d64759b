use serde_json::Value;

use crate::{
    lists::{ListChild, ListItem, ListNode},
    marks::{MarkNode, build_marks_tree},
    model::{Block, CustomNode, DEFAULT_STYLE, Node},
};

use super::{
    components::{ComponentRegistry, HardBreak, Renderers},
    missing::{MissingComponent, MissingComponentHandler, NodeType},
    props::{BlockProps, ListProps, MarkProps, TypeProps},
};

/// Read-only state for one render pass.
///
/// Walks a node forest, resolving a component for every node and falling
/// back to the registry's `unknown_*` components (with one diagnostic per
/// failed lookup) when none is registered.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'r> {
    pub components: &'r ComponentRegistry,
    pub on_missing: &'r MissingComponentHandler,
    /// Caller payload handed to every component unchanged.
    pub context: &'r Value,
}

impl<'r> RenderContext<'r> {
    pub fn new(
        components: &'r ComponentRegistry,
        on_missing: &'r MissingComponentHandler,
        context: &'r Value,
    ) -> Self {
        Self {
            components,
            on_missing,
            context,
        }
    }

    pub fn render_nodes(&self, nodes: &[Node]) -> String {
        nodes
            .iter()
            .enumerate()
            .map(|(index, node)| self.render_node(node, index, false))
            .collect()
    }

    pub fn render_node(&self, node: &Node, index: usize, is_inline: bool) -> String {
        match node {
            Node::List(list) => self.render_list(list, index),
            // Only reachable when the forest was not nested
            Node::Block(block) if block.is_list_item() => {
                self.render_list_item(block, &[], index)
            }
            Node::Block(block) => self.render_block(block, index, is_inline),
            Node::Custom(custom) => self.render_custom(custom, index, is_inline, None),
        }
    }

    fn render_list(&self, list: &ListNode, index: usize) -> String {
        let renderer = self
            .resolve(&self.components.list, &list.list_item, NodeType::ListStyle)
            .unwrap_or(&self.components.unknown_list);

        let children: String = list
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| match child {
                ListChild::Item(ListItem { block, sublists }) => {
                    self.render_list_item(block, sublists, i)
                }
                ListChild::List(nested) => self.render_list(nested, i),
            })
            .collect();

        renderer(&ListProps {
            list,
            children: &children,
            index,
            context: self.context,
        })
    }

    fn render_list_item(&self, block: &Block, sublists: &[ListNode], index: usize) -> String {
        let kind = block.list_kind().unwrap_or_default();
        let renderer = self
            .resolve(&self.components.list_item, kind, NodeType::ListItemStyle)
            .unwrap_or(&self.components.unknown_list_item);

        let mut children = if block.style == DEFAULT_STYLE {
            self.render_block_content(block)
        } else {
            // Styled items get their content wrapped by the block component
            self.render_block(block, index, false)
        };
        for (i, sublist) in sublists.iter().enumerate() {
            children.push_str(&self.render_list(sublist, i));
        }

        renderer(&BlockProps {
            block,
            children: &children,
            index,
            is_inline: false,
            context: self.context,
        })
    }

    fn render_block(&self, block: &Block, index: usize, is_inline: bool) -> String {
        let renderer = self
            .resolve(&self.components.block, &block.style, NodeType::BlockStyle)
            .unwrap_or(&self.components.unknown_block_style);
        let children = self.render_block_content(block);

        renderer(&BlockProps {
            block,
            children: &children,
            index,
            is_inline,
            context: self.context,
        })
    }

    fn render_block_content(&self, block: &Block) -> String {
        build_marks_tree(block)
            .iter()
            .enumerate()
            .map(|(index, node)| self.render_mark_node(node, index, block))
            .collect()
    }

    fn render_mark_node(&self, node: &MarkNode<'_>, index: usize, parent: &Block) -> String {
        match node {
            MarkNode::Text(text) => (self.components.text)(*text),
            MarkNode::HardBreak => match &self.components.hard_break {
                HardBreak::Renderer(renderer) => renderer(),
                HardBreak::Disabled => "\n".to_string(),
            },
            MarkNode::Mark(mark) => {
                let renderer = self
                    .resolve(&self.components.marks, mark.mark_type, NodeType::Mark)
                    .unwrap_or(&self.components.unknown_mark);
                let children: String = mark
                    .children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| self.render_mark_node(child, i, parent))
                    .collect();

                renderer(&MarkProps {
                    mark_type: mark.mark_type,
                    mark_key: mark.key,
                    definition: mark.definition,
                    text: &mark.plain_text(),
                    children: &children,
                    context: self.context,
                })
            }
            MarkNode::Object(object) => self.render_custom(object, index, true, Some(parent)),
        }
    }

    fn render_custom(
        &self,
        node: &CustomNode,
        index: usize,
        is_inline: bool,
        parent_block: Option<&Block>,
    ) -> String {
        let renderer = self
            .resolve(&self.components.types, &node.type_name, NodeType::Block)
            .unwrap_or(&self.components.unknown_type);

        renderer(&TypeProps {
            node,
            index,
            is_inline,
            parent_block,
            context: self.context,
        })
    }

    /// Looks up a component, reporting the miss when there is none.
    fn resolve<'c, R>(
        &self,
        renderers: &'c Renderers<R>,
        key: &str,
        node_type: NodeType,
    ) -> Option<&'c R> {
        let found = renderers.get(key);
        if found.is_none() {
            self.on_missing
                .report(&MissingComponent::new(key, node_type));
        }
        found
    }
}
