use serde_json::{Value, json};

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_article(sections: usize) -> Value {
    let mut blocks = Vec::new();

    for section in 0..sections {
        blocks.push(json!({
            "_type": "block",
            "style": "h2",
            "children": [{"_type": "span", "text": format!("Section {section}")}]
        }));
        blocks.push(json!({
            "_type": "block",
            "markDefs": [{"_key": "ln", "_type": "link", "href": "https://example.com"}],
            "children": [
                {"_type": "span", "text": "Some ", "marks": []},
                {"_type": "span", "text": "bold and linked", "marks": ["strong", "ln"]},
                {"_type": "span", "text": " text,", "marks": ["ln"]},
                {"_type": "span", "text": " then plain.\nNext line.", "marks": []}
            ]
        }));
        blocks.extend(generate_list_items(6, 3));
    }

    Value::Array(blocks)
}

#[allow(dead_code)]
pub fn generate_list_items(count: usize, max_level: u32) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let level = (i as u32 % max_level) + 1;
            json!({
                "_type": "block",
                "listItem": if i % 4 == 3 { "number" } else { "bullet" },
                "level": level,
                "children": [{"_type": "span", "text": format!("Item {i}"), "marks": ["em"]}]
            })
        })
        .collect()
}
