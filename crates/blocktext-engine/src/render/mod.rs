//! # Rendering
//!
//! Dispatches a nested document forest to a pluggable component registry.
//!
//! ## Modules
//!
//! - **`components`**: `ComponentRegistry`, per-category `Renderers` and the
//!   `ComponentOverrides` builder callers use to replace defaults
//! - **`defaults`**: The built-in HTML components and link safety checks
//! - **`props`**: What each component receives
//! - **`missing`**: Diagnostics for lookups that fell back to `unknown_*` components
//! - **`context`**: `RenderContext`, the recursive dispatcher
//!
//! ## Key Invariants
//!
//! - Dispatch never fails: every lookup has a fallback component
//! - Exactly one diagnostic is reported per failed lookup
//! - Content of unresolved nodes is still rendered by the fallback

pub mod components;
pub mod context;
pub mod defaults;
pub mod missing;
pub mod props;

use serde_json::Value;

use crate::{
    error::RenderError,
    lists::ListNestMode,
    model::{Document, Node},
};

pub use components::{ComponentOverrides, ComponentRegistry, HardBreak, Renderers};
pub use context::RenderContext;
pub use missing::{MissingComponent, MissingComponentHandler, NodeType};
pub use props::{BlockProps, ListProps, MarkProps, TypeProps};

/// Caller options for a render.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Overrides merged over the default HTML components.
    pub components: ComponentOverrides,
    /// Opaque payload passed to every component.
    pub context: Value,
    pub on_missing_component: MissingComponentHandler,
    pub list_nest_mode: ListNestMode,
}

/// A merged registry that can render any number of documents.
#[derive(Debug, Clone)]
pub struct Renderer {
    components: ComponentRegistry,
    on_missing_component: MissingComponentHandler,
    context: Value,
    list_nest_mode: ListNestMode,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            components: ComponentRegistry::default().merge(options.components),
            on_missing_component: options.on_missing_component,
            context: options.context,
            list_nest_mode: options.list_nest_mode,
        }
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Renders a raw block array (or a single block).
    pub fn render_value(&self, input: &Value) -> String {
        self.render_document(Document::from_value(input))
    }

    pub fn render_json(&self, json: &str) -> Result<String, RenderError> {
        Ok(self.render_document(Document::from_json(json)?))
    }

    pub fn render_document(&self, document: Document) -> String {
        let nodes = document.into_nested(self.list_nest_mode);
        self.render_nodes(&nodes)
    }

    /// Renders an already nested forest.
    pub fn render_nodes(&self, nodes: &[Node]) -> String {
        self.context().render_nodes(nodes)
    }

    pub fn context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.components, &self.on_missing_component, &self.context)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Renders a raw block array with the given options.
pub fn render(input: &Value, options: &RenderOptions) -> String {
    Renderer::new(options.clone()).render_value(input)
}

/// Like [`render`], for a JSON string.
pub fn render_json(json: &str, options: &RenderOptions) -> Result<String, RenderError> {
    Renderer::new(options.clone()).render_json(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn collecting() -> (MissingComponentHandler, Arc<Mutex<Vec<MissingComponent>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = MissingComponentHandler::callback(move |_, missing| {
            sink.lock().unwrap().push(missing.clone());
        });
        (handler, seen)
    }

    fn block(style: &str, text: &str) -> Value {
        json!({
            "_type": "block",
            "_key": format!("k-{text}"),
            "style": style,
            "children": [{"_type": "span", "_key": "s", "text": text}]
        })
    }

    fn list_item(kind: &str, level: u32, text: &str) -> Value {
        json!({
            "_type": "block",
            "_key": format!("k-{text}"),
            "style": "normal",
            "listItem": kind,
            "level": level,
            "children": [{"_type": "span", "_key": "s", "text": text}]
        })
    }

    #[test]
    fn unknown_block_style_falls_back_and_reports_once() {
        let (handler, seen) = collecting();
        let options = RenderOptions {
            on_missing_component: handler,
            ..Default::default()
        };

        let html = render(&json!([block("totally-unknown", "x")]), &options);

        assert_eq!(html, "<p>x</p>");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![MissingComponent::new("totally-unknown", NodeType::BlockStyle)]
        );
    }

    #[test]
    fn uniform_mark_override_routes_every_mark() {
        let options = RenderOptions {
            components: ComponentOverrides::new()
                .marks(|props| format!("[{}:{}]", props.mark_type, props.children)),
            ..Default::default()
        };
        let input = json!([{
            "_type": "block",
            "markDefs": [{"_key": "l1", "_type": "link", "href": "https://example.com"}],
            "children": [
                {"_type": "span", "text": "a", "marks": ["strong"]},
                {"_type": "span", "text": "b", "marks": ["l1"]}
            ]
        }]);

        assert_eq!(render(&input, &options), "<p>[strong:a][link:b]</p>");
    }

    #[test]
    fn keyed_block_override_keeps_other_defaults() {
        let options = RenderOptions {
            components: ComponentOverrides::new()
                .block_style("h1", |props| format!("<h1 class=\"title\">{}</h1>", props.children)),
            ..Default::default()
        };
        let input = json!([block("h1", "Title"), block("h2", "Sub"), block("normal", "Body")]);

        assert_eq!(
            render(&input, &options),
            "<h1 class=\"title\">Title</h1><h2>Sub</h2><p>Body</p>"
        );
    }

    #[test]
    fn nested_lists_render_inside_items() {
        let input = json!([
            list_item("bullet", 1, "a"),
            list_item("bullet", 2, "b"),
            list_item("bullet", 1, "c"),
            list_item("number", 1, "d")
        ]);

        assert_eq!(
            render(&input, &RenderOptions::default()),
            "<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul><ol><li>d</li></ol>"
        );
    }

    #[test]
    fn direct_mode_renders_nested_list_between_items() {
        let options = RenderOptions {
            list_nest_mode: ListNestMode::Direct,
            ..Default::default()
        };
        let input = json!([
            list_item("bullet", 1, "a"),
            list_item("bullet", 2, "b"),
            list_item("bullet", 1, "c")
        ]);

        assert_eq!(
            render(&input, &options),
            "<ul><li>a</li><ul><li>b</li></ul><li>c</li></ul>"
        );
    }

    #[test]
    fn unknown_list_kind_reports_list_and_item_styles() {
        let (handler, seen) = collecting();
        let options = RenderOptions {
            on_missing_component: handler,
            ..Default::default()
        };

        let html = render(&json!([list_item("roman", 1, "i")]), &options);

        assert_eq!(html, "<ul><li>i</li></ul>");
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], MissingComponent::new("roman", NodeType::ListStyle));
    }

    #[test]
    fn keyed_list_items_report_unknown_kinds() {
        let (handler, seen) = collecting();
        let options = RenderOptions {
            components: ComponentOverrides::new()
                .list_item("bullet", |props| format!("<li>* {}</li>", props.children)),
            on_missing_component: handler,
            ..Default::default()
        };

        let html = render(
            &json!([list_item("bullet", 1, "a"), list_item("number", 1, "b")]),
            &options,
        );

        assert_eq!(html, "<ul><li>* a</li></ul><ol><li>b</li></ol>");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![MissingComponent::new("number", NodeType::ListItemStyle)]
        );
    }

    #[test]
    fn styled_list_items_wrap_content_in_block_component() {
        let mut item = list_item("bullet", 1, "Heading item");
        item["style"] = json!("h3");

        assert_eq!(
            render(&json!([item]), &RenderOptions::default()),
            "<ul><li><h3>Heading item</h3></li></ul>"
        );
    }

    #[test]
    fn custom_types_receive_node_and_context() {
        let options = RenderOptions {
            components: ComponentOverrides::new().type_component("image", |props| {
                format!(
                    "<img src=\"{}{}\"/>",
                    props.context["cdn"].as_str().unwrap_or_default(),
                    props.node.value["asset"].as_str().unwrap_or_default()
                )
            }),
            context: json!({"cdn": "https://cdn.example.com/"}),
            ..Default::default()
        };
        let input = json!([{"_type": "image", "_key": "i1", "asset": "cat.png"}]);

        assert_eq!(
            render(&input, &options),
            "<img src=\"https://cdn.example.com/cat.png\"/>"
        );
    }

    #[test]
    fn inline_objects_know_their_parent_block() {
        let options = RenderOptions {
            components: ComponentOverrides::new().type_component("mention", |props| {
                format!(
                    "@{}({})",
                    props.node.value["user"].as_str().unwrap_or_default(),
                    props.parent_block.map(|b| b.key.as_str()).unwrap_or("none")
                )
            }),
            ..Default::default()
        };
        let input = json!([{
            "_type": "block",
            "_key": "p1",
            "children": [
                {"_type": "span", "text": "hi "},
                {"_type": "mention", "user": "kim"}
            ]
        }]);

        assert_eq!(render(&input, &options), "<p>hi @kim(p1)</p>");
    }

    #[test]
    fn unknown_inline_type_is_hidden_span() {
        let input = json!([{
            "_type": "block",
            "children": [{"_type": "widget"}]
        }]);
        let options = RenderOptions {
            on_missing_component: MissingComponentHandler::Disabled,
            ..Default::default()
        };

        let html = render(&input, &options);
        assert!(html.starts_with("<p><span style=\"display:none\">Unknown block type"));
    }

    #[test]
    fn hard_breaks_can_be_disabled() {
        let input = json!([block("normal", "a\nb")]);
        let options = RenderOptions {
            components: ComponentOverrides::new().hard_break(HardBreak::Disabled),
            ..Default::default()
        };

        assert_eq!(render(&input, &RenderOptions::default()), "<p>a<br/>b</p>");
        assert_eq!(render(&input, &options), "<p>a\nb</p>");
    }

    #[test]
    fn text_is_escaped_by_default() {
        let input = json!([block("normal", "<script>")]);
        assert_eq!(
            render(&input, &RenderOptions::default()),
            "<p>&lt;script&gt;</p>"
        );
    }

    #[test]
    fn renderer_is_reusable_across_documents() {
        let renderer = Renderer::default();
        assert_eq!(renderer.render_value(&json!([block("h2", "one")])), "<h2>one</h2>");
        assert_eq!(renderer.render_value(&json!(block("h3", "two"))), "<h3>two</h3>");
    }

    #[test]
    fn render_json_rejects_invalid_input() {
        assert!(render_json("not json", &RenderOptions::default()).is_err());
    }
}
