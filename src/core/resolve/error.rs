use std::fmt;

/// Why a reference token is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Text contains `[%key:` but no well-formed `[%key:<path>%]` token there.
    InvalidSyntax,
    /// `[%key:%]`
    EmptyPath,
    /// A `::` with nothing on one side (`a::::b`, `::a`, `a::`).
    EmptySegment,
    /// A segment with characters outside `[a-z0-9_-]`.
    InvalidSegment,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::InvalidSyntax => write!(f, "invalid reference syntax"),
            MalformedReason::EmptyPath => write!(f, "empty key path"),
            MalformedReason::EmptySegment => write!(f, "empty path segment"),
            MalformedReason::InvalidSegment => write!(f, "invalid path segment"),
        }
    }
}

/// Failure to resolve a key reference to a terminal literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// A reference token could not be parsed.
    Malformed {
        text: String,
        reason: MalformedReason,
    },
    /// `component::<name>::...` where no tree is loaded for `<name>`.
    UnknownComponent { key: String, component: String },
    /// A core-namespace path while no core tree is loaded.
    UnknownNamespace { key: String },
    /// A path segment does not exist in the target tree.
    MissingKey { key: String },
    /// The path ends on a nested mapping instead of a string.
    NotAString { key: String },
    /// A key reappeared in its own resolution chain. The chain ends with the repeated key.
    Cycle { chain: Vec<String> },
    /// The chain grew past the configured bound.
    DepthExceeded { key: String, max_depth: usize },
}

impl ResolutionError {
    /// The key path the error is about, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ResolutionError::Malformed { .. } => None,
            ResolutionError::UnknownComponent { key, .. }
            | ResolutionError::UnknownNamespace { key }
            | ResolutionError::MissingKey { key }
            | ResolutionError::NotAString { key }
            | ResolutionError::DepthExceeded { key, .. } => Some(key),
            ResolutionError::Cycle { chain } => chain.last().map(String::as_str),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ResolutionError::Malformed { .. })
    }

    /// Cycles and runaway chains.
    pub fn is_cyclic(&self) -> bool {
        matches!(
            self,
            ResolutionError::Cycle { .. } | ResolutionError::DepthExceeded { .. }
        )
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::Malformed { text, reason } => {
                write!(f, "malformed key reference in \"{}\": {}", text, reason)
            }
            ResolutionError::UnknownComponent { key, component } => {
                write!(f, "unknown component '{}' in key '{}'", component, key)
            }
            ResolutionError::UnknownNamespace { key } => {
                write!(f, "no core strings loaded for key '{}'", key)
            }
            ResolutionError::MissingKey { key } => write!(f, "key '{}' does not exist", key),
            ResolutionError::NotAString { key } => {
                write!(f, "key '{}' refers to a section, not a string", key)
            }
            ResolutionError::Cycle { chain } => {
                write!(f, "cyclic reference: {}", chain.join(" -> "))
            }
            ResolutionError::DepthExceeded { key, max_depth } => write!(
                f,
                "reference depth exceeded {} while resolving '{}'",
                max_depth, key
            ),
        }
    }
}

impl std::error::Error for ResolutionError {}
