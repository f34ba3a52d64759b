//! Default HTML components.
//!
//! A small reference renderer: semantic tags for the standard styles, lists
//! and decorators, and visible-but-harmless fallbacks for everything else.

use std::{collections::HashMap, sync::Arc};

use super::{
    components::{
        BlockRenderer, ComponentRegistry, HardBreak, ListRenderer, MarkRenderer, Renderers,
    },
    missing::{MissingComponent, NodeType},
    props::{BlockProps, ListProps, MarkProps, TypeProps},
};

const LINK_PROTOCOLS: [&str; 4] = ["http", "https", "mailto", "tel"];

pub fn html_components() -> ComponentRegistry {
    ComponentRegistry {
        types: Renderers::default(),
        block: Renderers::ByKey(default_blocks()),
        marks: Renderers::ByKey(default_marks()),
        list: Renderers::ByKey(HashMap::from([
            ("bullet".to_string(), wrap_list("ul")),
            ("number".to_string(), wrap_list("ol")),
        ])),
        list_item: Renderers::Uniform(wrap_block("li")),
        hard_break: HardBreak::renderer(|| "<br/>".to_string()),
        text: Arc::new(escape_html),
        unknown_type: Arc::new(unknown_type),
        unknown_mark: Arc::new(unknown_mark),
        unknown_list: wrap_list("ul"),
        unknown_list_item: wrap_block("li"),
        unknown_block_style: wrap_block("p"),
    }
}

fn default_blocks() -> HashMap<String, BlockRenderer> {
    ["h1", "h2", "h3", "h4", "h5", "h6", "blockquote"]
        .into_iter()
        .map(|tag| (tag.to_string(), wrap_block(tag)))
        .chain([("normal".to_string(), wrap_block("p"))])
        .collect()
}

fn default_marks() -> HashMap<String, MarkRenderer> {
    HashMap::from([
        ("strong".to_string(), wrap_mark("<strong>", "</strong>")),
        ("em".to_string(), wrap_mark("<em>", "</em>")),
        ("code".to_string(), wrap_mark("<code>", "</code>")),
        (
            "underline".to_string(),
            wrap_mark("<span style=\"text-decoration:underline\">", "</span>"),
        ),
        ("strike-through".to_string(), wrap_mark("<del>", "</del>")),
        ("link".to_string(), Arc::new(link) as MarkRenderer),
    ])
}

fn wrap_block(tag: &'static str) -> BlockRenderer {
    fn renderer(f: impl Fn(&BlockProps<'_>) -> String + Send + Sync + 'static) -> BlockRenderer {
        Arc::new(f)
    }
    renderer(move |props| format!("<{tag}>{}</{tag}>", props.children))
}

fn wrap_list(tag: &'static str) -> ListRenderer {
    fn renderer(f: impl Fn(&ListProps<'_>) -> String + Send + Sync + 'static) -> ListRenderer {
        Arc::new(f)
    }
    renderer(move |props| format!("<{tag}>{}</{tag}>", props.children))
}

fn wrap_mark(open: &'static str, close: &'static str) -> MarkRenderer {
    fn renderer(f: impl Fn(&MarkProps<'_>) -> String + Send + Sync + 'static) -> MarkRenderer {
        Arc::new(f)
    }
    renderer(move |props| format!("{open}{}{close}", props.children))
}

fn link(props: &MarkProps<'_>) -> String {
    let href = props.field("href").unwrap_or_default();
    if uri_looks_safe(href) {
        format!("<a href=\"{}\">{}</a>", escape_html(href), props.children)
    } else {
        props.children.to_string()
    }
}

fn unknown_mark(props: &MarkProps<'_>) -> String {
    format!(
        "<span class=\"unknown__pt__mark__{}\">{}</span>",
        escape_html(props.mark_type),
        props.children
    )
}

fn unknown_type(props: &TypeProps<'_>) -> String {
    let warning = escape_html(&MissingComponent::new(&props.node.type_name, NodeType::Block).message());
    if props.is_inline {
        format!("<span style=\"display:none\">{warning}</span>")
    } else {
        format!("<div style=\"display:none\">{warning}</div>")
    }
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Whether a link target is harmless to emit as an `href`.
///
/// Allows relative, hash and absolute-path URIs plus the `http`, `https`,
/// `mailto` and `tel` schemes. A colon that only appears after a `?` or `#`
/// does not start a scheme.
pub fn uri_looks_safe(uri: &str) -> bool {
    let url = uri.trim();
    if url.starts_with('#') || url.starts_with('/') {
        return true;
    }

    let Some(colon) = url.find(':') else {
        return true;
    };
    let scheme = url[..colon].to_ascii_lowercase();
    if LINK_PROTOCOLS.contains(&scheme.as_str()) {
        return true;
    }

    let before_colon = |c: char| url.find(c).is_some_and(|pos| pos < colon);
    before_colon('?') || before_colon('#')
}
