//! Key reference resolution.
//!
//! Turns a string that may contain `[%key:<path>%]` references into the
//! terminal literal by walking the referenced trees of a
//! [`ResourceCollection`]. Resolution is transitive: the value found at a
//! path may itself contain references.
//!
//! Two guards keep resolution finite:
//! - the chain of keys currently being resolved is tracked, and a key that
//!   reappears in it is reported as [`ResolutionError::Cycle`];
//! - the number of hops is bounded by `max_depth`
//!   ([`ResolutionError::DepthExceeded`]).
//!
//! Keys resolved once are remembered for the rest of the call, so a value
//! referencing the same key many times is walked once per key.

mod error;

pub use error::{MalformedReason, ResolutionError};

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::core::{
    MessageContext, Namespace, ResourceCollection, ResourceTree,
    parsers::reference::{KeyPath, KeyTarget, find_references, has_stray_marker},
};

/// Default bound on reference hops.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Resolve `value` against `collection` with the default depth bound.
pub fn resolve(value: &str, collection: &ResourceCollection) -> Result<String, ResolutionError> {
    Resolver::new(collection).resolve(value)
}

/// Resolves key references against an immutable collection of trees.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    collection: &'a ResourceCollection,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(collection: &'a ResourceCollection) -> Self {
        Self {
            collection,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolve a literal-or-reference string to its terminal literal.
    ///
    /// Strings without references are returned unchanged. Every reference
    /// occurrence is replaced in place by its resolved target.
    pub fn resolve(&self, value: &str) -> Result<String, ResolutionError> {
        Ok(self.resolve_in_chain(value, &mut Walk::default(), 0)?.value)
    }

    /// Resolve the string stored at a fully qualified key path
    /// (`component::group::config::step::user::title`).
    ///
    /// The lookup of `key` itself counts as the first hop, the same as
    /// resolving `[%key:<key>%]`.
    pub fn resolve_key(&self, key: &str) -> Result<String, ResolutionError> {
        let path = KeyPath::parse(key, key)?;
        let value = self.lookup(&path)?;
        let mut walk = Walk::starting_at(path.to_string());
        Ok(self.resolve_in_chain(value, &mut walk, 1)?.value)
    }

    /// Resolve a flattened entry of `tree`.
    ///
    /// The entry's own key seeds the chain, so an entry that reaches itself
    /// through references is reported as a cycle.
    pub fn resolve_entry(
        &self,
        tree: &ResourceTree,
        entry: &MessageContext,
    ) -> Result<String, ResolutionError> {
        let mut walk = Walk::starting_at(tree.namespace.qualify(&entry.key));
        Ok(self.resolve_in_chain(&entry.value, &mut walk, 0)?.value)
    }

    /// Look up the raw value at `path` without resolving it further.
    pub fn lookup(&self, path: &KeyPath) -> Result<&'a str, ResolutionError> {
        let key = path.to_string();
        let (tree, local) = match path.target() {
            KeyTarget::Component { name, local } => {
                let tree = self.collection.component(name).ok_or_else(|| {
                    ResolutionError::UnknownComponent {
                        key: key.clone(),
                        component: name.to_string(),
                    }
                })?;
                (tree, local)
            }
            KeyTarget::Core { local } => {
                let tree = self
                    .collection
                    .core()
                    .ok_or_else(|| ResolutionError::UnknownNamespace { key: key.clone() })?;
                (tree, local)
            }
        };

        // `component::<name>` alone addresses the whole tree
        if local.is_empty() {
            return Err(ResolutionError::NotAString { key });
        }

        match tree.get(local) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(ResolutionError::NotAString { key }),
            None => Err(ResolutionError::MissingKey { key }),
        }
    }

    /// Render `tree` with every string leaf resolved, keeping shape and key order.
    pub fn render(&self, tree: &ResourceTree) -> Result<Value, ResolutionError> {
        let mut rendered = Map::new();
        for (key, value) in &tree.root {
            let value = self.render_value(value, &tree.namespace, key)?;
            rendered.insert(key.clone(), value);
        }
        Ok(Value::Object(rendered))
    }

    fn render_value(
        &self,
        value: &Value,
        namespace: &Namespace,
        local_key: &str,
    ) -> Result<Value, ResolutionError> {
        match value {
            Value::Object(map) => {
                let mut rendered = Map::new();
                for (key, child) in map {
                    let child_key = format!("{}::{}", local_key, key);
                    rendered.insert(
                        key.clone(),
                        self.render_value(child, namespace, &child_key)?,
                    );
                }
                Ok(Value::Object(rendered))
            }
            Value::String(s) => {
                let mut walk = Walk::starting_at(namespace.qualify(local_key));
                Ok(Value::String(self.resolve_in_chain(s, &mut walk, 0)?.value))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_in_chain(
        &self,
        value: &str,
        walk: &mut Walk,
        depth: usize,
    ) -> Result<Resolved, ResolutionError> {
        let references = find_references(value);
        if has_stray_marker(value, &references) {
            return Err(ResolutionError::Malformed {
                text: value.to_string(),
                reason: MalformedReason::InvalidSyntax,
            });
        }
        if references.is_empty() {
            return Ok(Resolved {
                value: value.to_string(),
                hops: 0,
            });
        }

        let mut resolved = String::with_capacity(value.len());
        let mut hops = 0;
        let mut cursor = 0;
        for reference in &references {
            resolved.push_str(&value[cursor..reference.span.start]);

            let path = KeyPath::parse(&reference.path, value)?;
            let key = path.to_string();
            if walk.chain.contains(&key) {
                let mut cycle = walk.chain.clone();
                cycle.push(key);
                return Err(ResolutionError::Cycle { chain: cycle });
            }
            if depth >= self.max_depth {
                return Err(ResolutionError::DepthExceeded {
                    key,
                    max_depth: self.max_depth,
                });
            }

            // A remembered key is reused only when its chain still fits at
            // this depth; otherwise the walk is repeated to report the bound.
            let target = match walk.resolved.get(&key) {
                Some(known) if depth + 1 + known.hops <= self.max_depth => known.clone(),
                _ => {
                    let raw = self.lookup(&path)?;
                    walk.chain.push(key.clone());
                    let target = self.resolve_in_chain(raw, walk, depth + 1)?;
                    walk.chain.pop();
                    walk.resolved.insert(key, target.clone());
                    target
                }
            };

            hops = hops.max(target.hops + 1);
            resolved.push_str(&target.value);
            cursor = reference.span.end;
        }
        resolved.push_str(&value[cursor..]);

        Ok(Resolved {
            value: resolved,
            hops,
        })
    }
}

/// State of one top-level resolution.
#[derive(Debug, Default)]
struct Walk {
    /// Keys currently being resolved, outermost first.
    chain: Vec<String>,
    /// Keys already resolved during this call.
    resolved: HashMap<String, Resolved>,
}

impl Walk {
    fn starting_at(key: String) -> Self {
        Self {
            chain: vec![key],
            resolved: HashMap::new(),
        }
    }
}

/// A resolved value and the longest chain of hops it took.
#[derive(Debug, Clone)]
struct Resolved {
    value: String,
    hops: usize,
}
