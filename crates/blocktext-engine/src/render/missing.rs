use std::{fmt, sync::Arc};

/// Which lookup failed when a component could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// A custom node with no `types` component.
    Block,
    Mark,
    BlockStyle,
    ListStyle,
    ListItemStyle,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Block => "block",
            NodeType::Mark => "mark",
            NodeType::BlockStyle => "blockStyle",
            NodeType::ListStyle => "listStyle",
            NodeType::ListItemStyle => "listItemStyle",
        }
    }

    /// The `components` option that would resolve this lookup.
    pub fn category(&self) -> &'static str {
        match self {
            NodeType::Block => "types",
            NodeType::Mark => "marks",
            NodeType::BlockStyle => "block",
            NodeType::ListStyle => "list",
            NodeType::ListItemStyle => "listItem",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            NodeType::Block => "block type",
            NodeType::Mark => "mark type",
            NodeType::BlockStyle => "block style",
            NodeType::ListStyle => "list style",
            NodeType::ListItemStyle => "list item style",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lookup that fell back to an `unknown*` component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingComponent {
    /// The style, kind or type that had no component.
    pub type_name: String,
    pub node_type: NodeType,
}

impl MissingComponent {
    pub fn new(type_name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            type_name: type_name.into(),
            node_type,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Unknown {} \"{}\", specify a component for it in the `components.{}` option",
            self.node_type.describe(),
            self.type_name,
            self.node_type.category()
        )
    }
}

pub type MissingComponentCallback = Arc<dyn Fn(&str, &MissingComponent) + Send + Sync>;

/// What to do when dispatch falls back to an `unknown*` component.
#[derive(Clone, Default)]
pub enum MissingComponentHandler {
    Disabled,
    /// Emit the message through `log::warn!`.
    #[default]
    Log,
    Callback(MissingComponentCallback),
}

impl MissingComponentHandler {
    pub fn callback(f: impl Fn(&str, &MissingComponent) + Send + Sync + 'static) -> Self {
        Self::Callback(Arc::new(f))
    }

    pub(crate) fn report(&self, missing: &MissingComponent) {
        match self {
            MissingComponentHandler::Disabled => {}
            MissingComponentHandler::Log => log::warn!("{}", missing.message()),
            MissingComponentHandler::Callback(callback) => callback(&missing.message(), missing),
        }
    }
}

impl fmt::Debug for MissingComponentHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingComponentHandler::Disabled => f.write_str("Disabled"),
            MissingComponentHandler::Log => f.write_str("Log"),
            MissingComponentHandler::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}
