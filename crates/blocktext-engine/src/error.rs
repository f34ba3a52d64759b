/// Errors surfaced at the edges of the engine.
///
/// The transformation itself never fails: malformed nodes degrade to a more
/// permissive variant and unresolved components fall back. Only decoding the
/// raw document can go wrong.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid document JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
