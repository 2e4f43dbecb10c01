//! Key reference syntax: `[%key:<path>%]`.
//!
//! A path is a sequence of segments joined with `::`. Segments are made of
//! lowercase ASCII letters, digits, `-` and `_`. References may make up a
//! whole string or be embedded in a longer literal.

use std::{fmt, ops::Range, sync::LazyLock};

use regex::Regex;

use crate::core::{
    COMPONENT_NAMESPACE,
    resolve::{MalformedReason, ResolutionError},
};

/// Opening marker of a key reference.
pub const REFERENCE_MARKER: &str = "[%key:";

/// Separator between key path segments.
pub const KEY_SEPARATOR: &str = "::";

static KEY_REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[%key:((?:[a-z0-9_-]+|::)*)%\]").unwrap());

/// One well-formed reference occurrence inside a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReference {
    /// Byte range of the whole `[%key:...%]` token.
    pub span: Range<usize>,
    /// Raw path text between `[%key:` and `%]`.
    pub path: String,
}

/// Find every well-formed reference token in `text`, in order.
pub fn find_references(text: &str) -> Vec<KeyReference> {
    KEY_REFERENCE_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let path = caps.get(1)?;
            Some(KeyReference {
                span: whole.range(),
                path: path.as_str().to_string(),
            })
        })
        .collect()
}

/// Whether `text` contains the reference marker at all.
pub fn contains_reference_marker(text: &str) -> bool {
    text.contains(REFERENCE_MARKER)
}

/// Whether the text outside the given references still contains a marker.
///
/// Catches things like `[%key:Component::Group%]` or an unterminated
/// `[%key:component::group` that the reference pattern does not match.
pub fn has_stray_marker(text: &str, references: &[KeyReference]) -> bool {
    let mut cursor = 0;
    for reference in references {
        if contains_reference_marker(&text[cursor..reference.span.start]) {
            return true;
        }
        cursor = reference.span.end;
    }
    contains_reference_marker(&text[cursor..])
}

/// Whether `segment` only uses the characters a reference path allows.
pub fn is_valid_segment(segment: &str) -> bool {
    segment
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

/// What a key path points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget<'a> {
    /// `component::<name>::<local...>`
    Component { name: &'a str, local: &'a [String] },
    /// Any other path, walked from the core tree root.
    Core { local: &'a [String] },
}

/// A parsed key path (`component::group::config::step::user::title`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse the raw path of a reference.
    ///
    /// `text` is the string the reference was found in, used for the error.
    pub fn parse(path: &str, text: &str) -> Result<Self, ResolutionError> {
        if path.is_empty() {
            return Err(ResolutionError::Malformed {
                text: text.to_string(),
                reason: MalformedReason::EmptyPath,
            });
        }

        let segments: Vec<String> = path.split(KEY_SEPARATOR).map(String::from).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ResolutionError::Malformed {
                text: text.to_string(),
                reason: MalformedReason::EmptySegment,
            });
        }
        if !segments.iter().all(|s| is_valid_segment(s)) {
            return Err(ResolutionError::Malformed {
                text: text.to_string(),
                reason: MalformedReason::InvalidSegment,
            });
        }

        Ok(Self { segments })
    }

    /// Build from already-split segments (used when walking trees).
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn target(&self) -> KeyTarget<'_> {
        match self.segments.as_slice() {
            [namespace, name, local @ ..] if namespace == COMPONENT_NAMESPACE => {
                KeyTarget::Component {
                    name: name.as_str(),
                    local,
                }
            }
            local => KeyTarget::Core { local },
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(KEY_SEPARATOR))
    }
}
