use std::sync::{Arc, Mutex};

use blocktext_engine::{
    ComponentOverrides, Document, ListNestMode, MissingComponent, MissingComponentHandler,
    NodeType, RenderOptions, Renderer, ensure_keys, render, snapshot, to_plain_text,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn fixture(name: &str) -> Value {
    let raw = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn with_images() -> RenderOptions {
    RenderOptions {
        components: ComponentOverrides::new().type_component("image", |props| {
            format!(
                "<img src=\"{}\"/>",
                props.node.value["asset"].as_str().unwrap_or_default()
            )
        }),
        ..Default::default()
    }
}

#[test]
fn release_notes_render_to_html() {
    let html = render(&fixture("release_notes"), &with_images());
    insta::assert_snapshot!(html, @r#"<h1>Release notes</h1><p>Read the <a href="https://example.com/docs"><strong>full </strong>guide</a> first.</p><ul><li>Faster parsing<ul><li><em>Up to 2x &amp; more</em></li></ul></li><li>Safer links</li></ul><img src="diagram.png"/><blockquote>Line one<br/>Line two</blockquote>"#);
}

#[test]
fn release_notes_plain_text() {
    let doc = Document::from_value(&fixture("release_notes"));
    assert_eq!(
        to_plain_text(&doc.nodes),
        "Release notes\n\nRead the full guide first.\n\nFaster parsing\n\nUp to 2x & more\n\nSafer links\n\nLine one\nLine two"
    );
}

#[test]
fn release_notes_forest_holds_invariants() {
    let doc = Document::from_value(&fixture("release_notes"));
    for mode in [ListNestMode::Html, ListNestMode::Direct] {
        let nodes = doc.clone().into_nested(mode);
        snapshot::invariants(&nodes);
        assert_eq!(nodes.len(), 5, "mode {mode}");
    }
}

#[test]
fn unresolved_components_fall_back_with_one_report_each() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = RenderOptions {
        on_missing_component: MissingComponentHandler::callback(move |_, missing| {
            sink.lock().unwrap().push(missing.clone());
        }),
        ..Default::default()
    };

    let html = render(&fixture("unkeyed"), &options);

    insta::assert_snapshot!(html, @r#"<p>Styled with <span class="unknown__pt__mark__highlight">a highlight</span></p><ul><li>Unknown list kind</li></ul><div style="display:none">Unknown block type &quot;callout&quot;, specify a component for it in the `components.types` option</div><p><span class="unknown__pt__mark__comment">Commented</span></p>"#);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            MissingComponent::new("fancy", NodeType::BlockStyle),
            MissingComponent::new("highlight", NodeType::Mark),
            MissingComponent::new("checklist", NodeType::ListStyle),
            MissingComponent::new("callout", NodeType::Block),
            MissingComponent::new("comment", NodeType::Mark),
        ]
    );
}

#[test]
fn generated_keys_are_stable_between_passes() {
    let input = fixture("unkeyed");
    let first = ensure_keys(&input);
    let second = ensure_keys(&ensure_keys(&input));
    assert_eq!(first, second);

    let typed = Document::from_value(&input);
    let keys: Vec<_> = typed.nodes.iter().map(|n| n.key().map(str::to_string)).collect();
    assert_eq!(keys[0].as_deref(), first[0]["_key"].as_str());
    assert_eq!(keys[2], None);
}

#[test]
fn list_grouping_follows_levels() {
    let input = json!([
        {"_type": "block", "_key": "a", "listItem": "bullet", "level": 1, "children": [{"_type": "span", "_key": "sa", "text": "a"}]},
        {"_type": "block", "_key": "b", "listItem": "bullet", "level": 2, "children": [{"_type": "span", "_key": "sb", "text": "b"}]}
    ]);
    let nodes = Document::from_value(&input).into_nested(ListNestMode::Html);

    insta::assert_json_snapshot!(snapshot::normalize(&nodes), @r#"
    {
      "nodes": [
        {
          "kind": "List",
          "key": "a-parent",
          "list_item": "bullet",
          "level": 1,
          "children": [
            {
              "kind": "Item",
              "key": "a",
              "style": "normal",
              "level": 1,
              "content": [
                {
                  "kind": "Text",
                  "text": "a"
                }
              ],
              "sublists": [
                {
                  "kind": "List",
                  "key": "b-parent",
                  "list_item": "bullet",
                  "level": 2,
                  "children": [
                    {
                      "kind": "Item",
                      "key": "b",
                      "style": "normal",
                      "level": 2,
                      "content": [
                        {
                          "kind": "Text",
                          "text": "b"
                        }
                      ]
                    }
                  ]
                }
              ]
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn one_renderer_serves_many_documents() {
    let renderer = Renderer::new(with_images());
    let notes = renderer.render_value(&fixture("release_notes"));
    let image = renderer.render_value(&json!({"_type": "image", "asset": "x.png"}));

    assert!(notes.starts_with("<h1>"));
    assert_eq!(image, "<img src=\"x.png\"/>");
}

#[test]
fn json_entry_point_matches_value_entry_point() {
    let raw = std::fs::read_to_string(format!(
        "{}/tests/fixtures/release_notes.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let renderer = Renderer::new(with_images());
    assert_eq!(
        renderer.render_json(&raw).unwrap(),
        renderer.render_value(&fixture("release_notes"))
    );
}
