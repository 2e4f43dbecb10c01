use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::{
    MessageContext, MessageLocation, Namespace, ResourceTree, parsers::reference::KEY_SEPARATOR,
};

pub fn parse_strings_file(path: &Path, namespace: Namespace) -> Result<ResourceTree> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read strings file: {:?}", path))?;

    parse_strings_str(&content, &path.to_string_lossy(), namespace)
}

/// Parse the content of a strings file into a located resource tree.
///
/// The root must be an object and every leaf must be a string; arrays,
/// numbers, booleans and nulls are rejected with the offending key.
pub fn parse_strings_str(
    content: &str,
    file_path: &str,
    namespace: Namespace,
) -> Result<ResourceTree> {
    let json: Value = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse strings file: {:?}", file_path))?;

    let root = match json {
        Value::Object(root) => root,
        other => bail!(
            "Strings file {:?} must contain a JSON object at the root, found {}",
            file_path,
            value_kind(&other)
        ),
    };

    // Pre-compute line index for O(log n) line lookups
    let line_index = build_line_index(content);
    let source = SourceText {
        file_path,
        content,
        line_index: &line_index,
    };

    let mut flattened = Flattened::default();
    for (key, value) in &root {
        check_key_name(key, key, file_path)?;
        flatten_json(value, key.clone(), &source, &mut flattened)?;
    }

    Ok(ResourceTree::new(namespace, file_path, root, flattened.entries)
        .with_sections(flattened.sections))
}

#[derive(Default)]
struct Flattened {
    entries: Vec<MessageContext>,
    sections: Vec<MessageContext>,
}

struct SourceText<'a> {
    file_path: &'a str,
    content: &'a str,
    line_index: &'a [usize],
}

impl SourceText<'_> {
    fn context(&self, key_path: String, value: String) -> MessageContext {
        let (location, source_line) = self.locate(&key_path);
        let context = MessageContext::new(location, key_path, value);
        match source_line {
            Some(line) => context.with_source_line(line),
            None => context,
        }
    }

    /// Location and source line of a flattened key, falling back to 1:1.
    fn locate(&self, key_path: &str) -> (MessageLocation, Option<&str>) {
        match find_key_offset(self.content, key_path) {
            Some(offset) => {
                let line = offset_to_line(self.line_index, offset);
                let line_start = self.line_index[line - 1];
                let col = self.content[line_start..offset].chars().count() + 1;
                (
                    MessageLocation::new(self.file_path, line, col),
                    Some(line_text(self.content, self.line_index, line)),
                )
            }
            None => (MessageLocation::with_line(self.file_path, 1), None),
        }
    }
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0]; // Line 1 starts at offset 0
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1, // Exact match at line start
        Err(line) => line,    // Falls within this line
    }
}

/// Text of a 1-based line, without the trailing newline.
fn line_text<'a>(content: &'a str, line_index: &[usize], line: usize) -> &'a str {
    let start = line_index[line - 1];
    let end = line_index.get(line).map_or(content.len(), |next| next - 1);
    content[start..end].trim_end_matches('\r')
}

/// Find the byte offset of the last key of `key_path` in the JSON content.
///
/// Searches for each key part in sequence to handle duplicate leaf keys correctly.
/// For example, `step::cover::title` finds the `"title"` that comes after `"cover"`,
/// not the `"title"` of another step like `"user"`.
///
/// Each match must be an actual JSON key (followed by `:`), not a string
/// value that happens to contain the same text.
fn find_key_offset(content: &str, key_path: &str) -> Option<usize> {
    let mut search_start = 0;
    let mut key_start = None;

    for part in key_path.split(KEY_SEPARATOR) {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        // Find all occurrences and pick the one that's a key (followed by :)
        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();

            if after_pattern < remaining.len() {
                let is_key = remaining[after_pattern..].trim_start().starts_with(':');
                if is_key {
                    key_start = Some(search_start + abs_pos);
                    search_start += after_pattern;
                    found = true;
                    break;
                }
            }
            pos = abs_pos + 1;
        }

        if !found {
            return None;
        }
    }

    key_start
}

fn flatten_json(
    value: &Value,
    prefix: String,
    source: &SourceText<'_>,
    result: &mut Flattened,
) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = format!("{}{}{}", prefix, KEY_SEPARATOR, key);
                check_key_name(key, &new_prefix, source.file_path)?;
                flatten_json(val, new_prefix, source, result)?;
            }
            result.sections.push(source.context(prefix, String::new()));
        }
        Value::String(s) => {
            result.entries.push(source.context(prefix, s.clone()));
        }
        other => {
            let (location, _) = source.locate(&prefix);
            bail!(
                "Unsupported value for '{}' at {}:{}: expected a string or an object, found {}",
                prefix,
                source.file_path,
                location.line,
                value_kind(other)
            );
        }
    }
    Ok(())
}

/// Keys are joined with `::` when flattened, so a key holding the separator
/// would collide with a nested path.
fn check_key_name(key: &str, key_path: &str, file_path: &str) -> Result<()> {
    if key.contains(KEY_SEPARATOR) {
        bail!(
            "Key '{}' in {} contains the key separator '{}'",
            key_path,
            file_path,
            KEY_SEPARATOR
        );
    }
    Ok(())
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
