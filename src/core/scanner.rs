//! Resource file discovery by path convention.
//!
//! ```text
//! <root>/<coreStrings>                          core tree
//! <root>/<componentsDir>/<name>/<stringsFile>   component <name>
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::{config::Config, core::Namespace};

/// A resource file found on disk and the namespace it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub namespace: Namespace,
    pub path: PathBuf,
}

/// Result of scanning the resource root.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Core file first (if present), then components sorted by name.
    pub files: Vec<ResourceFile>,
    /// Component names skipped because they match an ignore pattern.
    pub ignored: Vec<String>,
    /// Paths that could not be read while walking.
    pub skipped_count: usize,
}

pub fn scan_resource_files(root: &Path, config: &Config, verbose: bool) -> Result<ScanResult> {
    if !root.exists() {
        bail!(
            "Resource root '{}' does not exist.\n\
             Hint: Check your .keyrefrc.json 'root' setting or pass --root.",
            root.display()
        );
    }

    if !root.is_dir() {
        bail!("'{}' is not a directory.", root.display());
    }

    let mut result = ScanResult::default();

    let core_path = root.join(&config.core_strings);
    if core_path.is_file() {
        result.files.push(ResourceFile {
            namespace: Namespace::Core,
            path: core_path,
        });
    } else if verbose {
        eprintln!(
            "Note: No core strings at '{}', the common namespace is unavailable",
            core_path.display()
        );
    }

    let components_dir = root.join(&config.components_dir);
    if !components_dir.is_dir() {
        if verbose {
            eprintln!(
                "Note: Components directory '{}' not found",
                components_dir.display()
            );
        }
        return Ok(result);
    }

    let ignore_patterns = config.ignore_patterns();

    for entry in WalkDir::new(&components_dir)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                result.skipped_count += 1;
                if verbose {
                    eprintln!("{} {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() != config.strings_file.as_str() {
            continue;
        }

        let Some(name) = component_name(entry.path()) else {
            continue;
        };

        if is_ignored(&name, &ignore_patterns) {
            result.ignored.push(name);
            continue;
        }

        result.files.push(ResourceFile {
            namespace: Namespace::Component(name),
            path: entry.into_path(),
        });
    }

    Ok(result)
}

/// Component name from `<componentsDir>/<name>/<stringsFile>`.
fn component_name(strings_path: &Path) -> Option<String> {
    strings_path
        .parent()
        .and_then(Path::file_name)
        .and_then(|s| s.to_str())
        .map(String::from)
}

fn is_ignored(name: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| p.matches(name))
}
