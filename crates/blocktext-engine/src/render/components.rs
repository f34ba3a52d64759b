use std::{collections::HashMap, fmt, sync::Arc};

use super::{
    defaults,
    props::{BlockProps, ListProps, MarkProps, TypeProps},
};

pub type BlockRenderer = Arc<dyn Fn(&BlockProps<'_>) -> String + Send + Sync>;
pub type ListRenderer = Arc<dyn Fn(&ListProps<'_>) -> String + Send + Sync>;
pub type MarkRenderer = Arc<dyn Fn(&MarkProps<'_>) -> String + Send + Sync>;
pub type TypeRenderer = Arc<dyn Fn(&TypeProps<'_>) -> String + Send + Sync>;
pub type TextRenderer = Arc<dyn Fn(&str) -> String + Send + Sync>;
pub type HardBreakRenderer = Arc<dyn Fn() -> String + Send + Sync>;

/// Components for one category: a single function for every variant, or
/// one function per variant key.
#[derive(Clone)]
pub enum Renderers<R> {
    Uniform(R),
    ByKey(HashMap<String, R>),
}

impl<R> Renderers<R> {
    pub fn get(&self, key: &str) -> Option<&R> {
        match self {
            Renderers::Uniform(renderer) => Some(renderer),
            Renderers::ByKey(map) => map.get(key),
        }
    }

    /// Applies a caller override on top of these defaults.
    ///
    /// A uniform override replaces the category. A keyed override is merged
    /// entry by entry over keyed defaults and replaces uniform ones.
    pub fn merge(self, overrides: Option<Renderers<R>>) -> Self {
        match (self, overrides) {
            (base, None) => base,
            (Renderers::ByKey(mut base), Some(Renderers::ByKey(overrides))) => {
                base.extend(overrides);
                Renderers::ByKey(base)
            }
            (_, Some(overrides)) => overrides,
        }
    }

    fn insert(self, key: String, renderer: R) -> Self {
        let mut map = match self {
            Renderers::ByKey(map) => map,
            Renderers::Uniform(_) => HashMap::new(),
        };
        map.insert(key, renderer);
        Renderers::ByKey(map)
    }
}

impl<R> Default for Renderers<R> {
    fn default() -> Self {
        Renderers::ByKey(HashMap::new())
    }
}

impl<R> fmt::Debug for Renderers<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderers::Uniform(_) => f.write_str("Uniform(..)"),
            Renderers::ByKey(map) => {
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();
                f.debug_tuple("ByKey").field(&keys).finish()
            }
        }
    }
}

/// How newlines inside spans are rendered.
#[derive(Clone)]
pub enum HardBreak {
    Renderer(HardBreakRenderer),
    /// Keep the newline as a literal `\n`.
    Disabled,
}

impl HardBreak {
    pub fn renderer(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        HardBreak::Renderer(Arc::new(f))
    }
}

impl fmt::Debug for HardBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardBreak::Renderer(_) => f.write_str("Renderer(..)"),
            HardBreak::Disabled => f.write_str("Disabled"),
        }
    }
}

/// The complete, merged set of components used by a render pass.
///
/// Every category has an `unknown_*` fallback, so resolution never fails.
#[derive(Clone)]
pub struct ComponentRegistry {
    pub types: Renderers<TypeRenderer>,
    pub block: Renderers<BlockRenderer>,
    pub marks: Renderers<MarkRenderer>,
    pub list: Renderers<ListRenderer>,
    pub list_item: Renderers<BlockRenderer>,
    pub hard_break: HardBreak,
    /// Converts literal span text into output, e.g. HTML escaping.
    pub text: TextRenderer,
    pub unknown_type: TypeRenderer,
    pub unknown_mark: MarkRenderer,
    pub unknown_list: ListRenderer,
    pub unknown_list_item: BlockRenderer,
    pub unknown_block_style: BlockRenderer,
}

impl ComponentRegistry {
    /// Merges caller overrides over this registry, category by category.
    pub fn merge(self, overrides: ComponentOverrides) -> Self {
        Self {
            types: self.types.merge(overrides.types),
            block: self.block.merge(overrides.block),
            marks: self.marks.merge(overrides.marks),
            list: self.list.merge(overrides.list),
            list_item: self.list_item.merge(overrides.list_item),
            hard_break: overrides.hard_break.unwrap_or(self.hard_break),
            text: overrides.text.unwrap_or(self.text),
            unknown_type: overrides.unknown_type.unwrap_or(self.unknown_type),
            unknown_mark: overrides.unknown_mark.unwrap_or(self.unknown_mark),
            unknown_list: overrides.unknown_list.unwrap_or(self.unknown_list),
            unknown_list_item: overrides.unknown_list_item.unwrap_or(self.unknown_list_item),
            unknown_block_style: overrides
                .unknown_block_style
                .unwrap_or(self.unknown_block_style),
        }
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        defaults::html_components()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.types)
            .field("block", &self.block)
            .field("marks", &self.marks)
            .field("list", &self.list)
            .field("list_item", &self.list_item)
            .field("hard_break", &self.hard_break)
            .finish_non_exhaustive()
    }
}

/// Partial registry supplied by callers. Unset categories keep their defaults.
#[derive(Clone, Default)]
pub struct ComponentOverrides {
    pub types: Option<Renderers<TypeRenderer>>,
    pub block: Option<Renderers<BlockRenderer>>,
    pub marks: Option<Renderers<MarkRenderer>>,
    pub list: Option<Renderers<ListRenderer>>,
    pub list_item: Option<Renderers<BlockRenderer>>,
    pub hard_break: Option<HardBreak>,
    pub text: Option<TextRenderer>,
    pub unknown_type: Option<TypeRenderer>,
    pub unknown_mark: Option<MarkRenderer>,
    pub unknown_list: Option<ListRenderer>,
    pub unknown_list_item: Option<BlockRenderer>,
    pub unknown_block_style: Option<BlockRenderer>,
}

fn keyed<R>(current: Option<Renderers<R>>, key: String, renderer: R) -> Option<Renderers<R>> {
    Some(current.unwrap_or_default().insert(key, renderer))
}

impl ComponentOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Component for custom nodes with the given `_type`.
    pub fn type_component(
        mut self,
        type_name: impl Into<String>,
        f: impl Fn(&TypeProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        let renderer: TypeRenderer = Arc::new(f);
        self.types = keyed(self.types, type_name.into(), renderer);
        self
    }

    /// One component for every custom node type.
    pub fn types(mut self, f: impl Fn(&TypeProps<'_>) -> String + Send + Sync + 'static) -> Self {
        self.types = Some(Renderers::Uniform(Arc::new(f)));
        self
    }

    pub fn block_style(
        mut self,
        style: impl Into<String>,
        f: impl Fn(&BlockProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        let renderer: BlockRenderer = Arc::new(f);
        self.block = keyed(self.block, style.into(), renderer);
        self
    }

    pub fn blocks(mut self, f: impl Fn(&BlockProps<'_>) -> String + Send + Sync + 'static) -> Self {
        self.block = Some(Renderers::Uniform(Arc::new(f)));
        self
    }

    pub fn mark(
        mut self,
        mark_type: impl Into<String>,
        f: impl Fn(&MarkProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        let renderer: MarkRenderer = Arc::new(f);
        self.marks = keyed(self.marks, mark_type.into(), renderer);
        self
    }

    pub fn marks(mut self, f: impl Fn(&MarkProps<'_>) -> String + Send + Sync + 'static) -> Self {
        self.marks = Some(Renderers::Uniform(Arc::new(f)));
        self
    }

    pub fn list(
        mut self,
        kind: impl Into<String>,
        f: impl Fn(&ListProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        let renderer: ListRenderer = Arc::new(f);
        self.list = keyed(self.list, kind.into(), renderer);
        self
    }

    pub fn lists(mut self, f: impl Fn(&ListProps<'_>) -> String + Send + Sync + 'static) -> Self {
        self.list = Some(Renderers::Uniform(Arc::new(f)));
        self
    }

    pub fn list_item(
        mut self,
        kind: impl Into<String>,
        f: impl Fn(&BlockProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        let renderer: BlockRenderer = Arc::new(f);
        self.list_item = keyed(self.list_item, kind.into(), renderer);
        self
    }

    pub fn list_items(
        mut self,
        f: impl Fn(&BlockProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.list_item = Some(Renderers::Uniform(Arc::new(f)));
        self
    }

    pub fn hard_break(mut self, hard_break: HardBreak) -> Self {
        self.hard_break = Some(hard_break);
        self
    }

    pub fn text(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.text = Some(Arc::new(f));
        self
    }

    pub fn unknown_type(
        mut self,
        f: impl Fn(&TypeProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.unknown_type = Some(Arc::new(f));
        self
    }

    pub fn unknown_mark(
        mut self,
        f: impl Fn(&MarkProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.unknown_mark = Some(Arc::new(f));
        self
    }

    pub fn unknown_list(
        mut self,
        f: impl Fn(&ListProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.unknown_list = Some(Arc::new(f));
        self
    }

    pub fn unknown_list_item(
        mut self,
        f: impl Fn(&BlockProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.unknown_list_item = Some(Arc::new(f));
        self
    }

    pub fn unknown_block_style(
        mut self,
        f: impl Fn(&BlockProps<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.unknown_block_style = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ComponentOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentOverrides")
            .field("types", &self.types)
            .field("block", &self.block)
            .field("marks", &self.marks)
            .field("list", &self.list)
            .field("list_item", &self.list_item)
            .field("hard_break", &self.hard_break)
            .finish_non_exhaustive()
    }
}
