use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::resolve::DEFAULT_MAX_DEPTH;

pub const CONFIG_FILE_NAME: &str = ".keyrefrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the core strings file and the components directory.
    #[serde(default = "default_root")]
    pub root: String,
    /// Components directory, relative to `root`.
    #[serde(default = "default_components_dir")]
    pub components_dir: String,
    /// File name of a component's strings file.
    #[serde(default = "default_strings_file")]
    pub strings_file: String,
    /// Core strings file (the `common::*` namespace), relative to `root`.
    #[serde(default = "default_core_strings")]
    pub core_strings: String,
    /// Maximum number of reference hops.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Glob patterns over component names to skip.
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_root() -> String {
    "./homeassistant".to_string()
}

fn default_components_dir() -> String {
    "components".to_string()
}

fn default_strings_file() -> String {
    "strings.json".to_string()
}

fn default_core_strings() -> String {
    "strings.json".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            components_dir: default_components_dir(),
            strings_file: default_strings_file(),
            core_strings: default_core_strings(),
            max_depth: default_max_depth(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or
    /// `maxDepth` is zero.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.max_depth == 0 {
            bail!("'maxDepth' must be at least 1");
        }

        if self.strings_file.is_empty() {
            bail!("'stringsFile' must not be empty");
        }

        Ok(())
    }

    /// Compiled `ignores` patterns. Call after `validate()`.
    pub fn ignore_patterns(&self) -> Vec<Pattern> {
        self.ignores
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Find the config file in `start_dir` or its ancestors, stopping at a `.git` directory.
///
/// A config in `start_dir` itself is returned relative to it; ancestors of a
/// relative start directory are walked in canonical form.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let local = start_dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    if start_dir.join(".git").exists() {
        return None;
    }

    let mut current = if start_dir.is_absolute() {
        start_dir.to_path_buf()
    } else {
        start_dir.canonicalize().ok()?
    };

    while current.pop() {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
    }
    None
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Config file the values came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    /// True if config was loaded from a file, false if using defaults.
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self, fallback: &Path) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| fallback.to_path_buf(), Path::to_path_buf)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
