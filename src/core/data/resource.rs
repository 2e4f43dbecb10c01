use std::{collections::BTreeMap, fmt};

use serde_json::{Map, Value};

use super::message::{MessageContext, MessageLocation};

/// Path segment that selects a component tree in a key reference.
pub const COMPONENT_NAMESPACE: &str = "component";

/// The part of the resource namespace a tree occupies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// The shared core tree, addressed without prefix (e.g., `common::state::on`).
    Core,
    /// A component tree, addressed as `component::<name>::...`.
    Component(String),
}

impl Namespace {
    pub fn component(name: impl Into<String>) -> Self {
        Namespace::Component(name.into())
    }

    /// Prefix that turns a tree-local key into a fully qualified key path.
    pub fn key_prefix(&self) -> Option<String> {
        match self {
            Namespace::Core => None,
            Namespace::Component(name) => Some(format!("{}::{}", COMPONENT_NAMESPACE, name)),
        }
    }

    /// Fully qualified key path for a tree-local key.
    pub fn qualify(&self, local_key: &str) -> String {
        match self.key_prefix() {
            Some(prefix) => format!("{}::{}", prefix, local_key),
            None => local_key.to_string(),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Core => write!(f, "core"),
            Namespace::Component(name) => write!(f, "{}", name),
        }
    }
}

/// A string resource tree loaded from one `strings.json` file.
///
/// The raw mapping is kept with its original key order for rendering, and
/// every string leaf is additionally flattened into `entries` with its
/// location for reporting.
#[derive(Debug, Clone)]
pub struct ResourceTree {
    pub namespace: Namespace,
    /// File the tree was loaded from.
    pub file_path: String,
    /// Root mapping of the file.
    pub root: Map<String, Value>,
    /// String leaves in file order.
    pub entries: Vec<MessageContext>,
    /// Object-valued keys, innermost first (value left empty).
    pub sections: Vec<MessageContext>,
}

impl ResourceTree {
    pub fn new(
        namespace: Namespace,
        file_path: impl Into<String>,
        root: Map<String, Value>,
        entries: Vec<MessageContext>,
    ) -> Self {
        Self {
            namespace,
            file_path: file_path.into(),
            root,
            entries,
            sections: Vec::new(),
        }
    }

    pub fn with_sections(mut self, sections: Vec<MessageContext>) -> Self {
        self.sections = sections;
        self
    }

    /// Walk the nested mapping from the root.
    ///
    /// Returns `None` as soon as a segment is missing or a string leaf is
    /// reached before the path is exhausted.
    pub fn get<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        let mut current = self.root.get(first.as_ref())?;
        for segment in rest {
            current = current.as_object()?.get(segment.as_ref())?;
        }
        Some(current)
    }

    /// Get the flattened entry for a tree-local key.
    pub fn entry(&self, local_key: &str) -> Option<&MessageContext> {
        self.entries.iter().find(|e| e.key == local_key)
    }

    /// Location of any key, leaf or section, falling back to the top of the file.
    pub fn locate(&self, local_key: &str) -> MessageContext {
        self.entries
            .iter()
            .chain(&self.sections)
            .find(|e| e.key == local_key)
            .cloned()
            .unwrap_or_else(|| {
                MessageContext::new(
                    MessageLocation::with_line(self.file_path.clone(), 1),
                    local_key,
                    "",
                )
            })
    }

    /// The integration title, when the tree declares one.
    pub fn title(&self) -> Option<&str> {
        self.root.get("title").and_then(Value::as_str)
    }

    /// Number of string leaves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All loaded resource trees: component trees keyed by name plus the
/// optional core tree.
///
/// Built once during loading and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ResourceCollection {
    core: Option<ResourceTree>,
    components: BTreeMap<String, ResourceTree>,
}

impl ResourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tree under its namespace, returning any tree it replaced.
    pub fn insert(&mut self, tree: ResourceTree) -> Option<ResourceTree> {
        match &tree.namespace {
            Namespace::Core => self.core.replace(tree),
            Namespace::Component(name) => self.components.insert(name.clone(), tree),
        }
    }

    pub fn core(&self) -> Option<&ResourceTree> {
        self.core.as_ref()
    }

    pub fn component(&self, name: &str) -> Option<&ResourceTree> {
        self.components.get(name)
    }

    /// All trees: the core tree first, then components sorted by name.
    pub fn trees(&self) -> impl Iterator<Item = &ResourceTree> {
        self.core.iter().chain(self.components.values())
    }

    /// Number of loaded trees (core included).
    pub fn len(&self) -> usize {
        self.components.len() + usize::from(self.core.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
