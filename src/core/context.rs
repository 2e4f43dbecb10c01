use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        ResourceCollection, ResourceTree,
        parsers::json::parse_strings_file,
        resolve::Resolver,
        scanner::{ResourceFile, scan_resource_files},
    },
    issues::ParseErrorIssue,
};

/// Loaded state shared by every command.
///
/// Construction loads configuration, discovers resource files under the
/// resource root and parses them in parallel. Files that fail to parse are
/// kept as `ParseErrorIssue`s so the rest of the tree can still be checked.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--root`, `--max-depth`)
/// 2. `.keyrefrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Resource root directory.
    pub root_dir: PathBuf,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    /// All successfully parsed trees.
    pub collection: ResourceCollection,

    /// Number of resource files found (parsed or not).
    pub files_scanned: usize,

    parse_errors: Vec<ParseErrorIssue>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the resource root
    /// does not exist.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let cwd = PathBuf::from(".");

        let config_result = load_config(&cwd)?;

        if verbose && !config_result.from_file() {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let base_dir = config_result.base_dir(&cwd);
        let mut config = config_result.config;

        if let Some(max_depth) = common_args.max_depth {
            config.max_depth = max_depth;
            config.validate()?;
        }

        // CLI --root is taken relative to the working directory, the config
        // value relative to the config file.
        let root_dir = match &common_args.root {
            Some(root) => root.clone(),
            None => join_relative(&base_dir, Path::new(&config.root)),
        };

        Self::load(config, root_dir, verbose)
    }

    /// Load all resource files under `root_dir` with the given configuration.
    pub fn load(config: Config, root_dir: PathBuf, verbose: bool) -> Result<Self> {
        let scan_result = scan_resource_files(&root_dir, &config, verbose)?;

        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        if verbose && !scan_result.ignored.is_empty() {
            eprintln!("{}", ignored_note(&scan_result.ignored));
        }

        let files_scanned = scan_result.files.len();

        // Parallel file reading and parsing
        let parse_results: Vec<_> = scan_result
            .files
            .into_par_iter()
            .map(|ResourceFile { namespace, path }| {
                let result = parse_strings_file(&path, namespace);
                (path, result)
            })
            .collect();

        let mut collection = ResourceCollection::new();
        let mut parse_errors = Vec::new();

        for (path, result) in parse_results {
            match result {
                Ok(tree) => {
                    if verbose {
                        eprintln!(
                            "Note: Loaded {} string(s) for '{}' from {}",
                            tree.len(),
                            tree.namespace,
                            path.display()
                        );
                    }
                    collection.insert(tree);
                }
                Err(e) => {
                    if verbose {
                        eprintln!("{} {:#}", "warning:".bold().yellow(), e);
                    }
                    parse_errors.push(ParseErrorIssue {
                        file_path: path.to_string_lossy().to_string(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        Ok(Self {
            config,
            root_dir,
            verbose,
            collection,
            files_scanned,
            parse_errors,
        })
    }

    /// Resolver over the loaded collection, bounded by the configured depth.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.collection).with_max_depth(self.config.max_depth)
    }

    /// Trees selected by component name, or every tree when `components` is empty.
    ///
    /// # Errors
    ///
    /// Returns error if a requested component has no loaded strings file.
    pub fn selected_trees(&self, components: &[String]) -> Result<Vec<&ResourceTree>> {
        if components.is_empty() {
            return Ok(self.collection.trees().collect());
        }

        components
            .iter()
            .map(|name| self.component_tree(name))
            .collect()
    }

    /// The tree of one component.
    ///
    /// # Errors
    ///
    /// Returns error if the component has no loaded strings file.
    pub fn component_tree(&self, name: &str) -> Result<&ResourceTree> {
        match self.collection.component(name) {
            Some(tree) => Ok(tree),
            None => bail!(
                "Component '{}' not found under {}",
                name,
                self.root_dir.display()
            ),
        }
    }

    /// Files that could not be parsed.
    pub fn parse_errors(&self) -> &[ParseErrorIssue] {
        &self.parse_errors
    }
}

fn ignored_note(ignored: &[String]) -> String {
    format!(
        "Note: Ignored {} component(s) matching 'ignores': {}",
        ignored.len(),
        ignored.join(", ")
    )
}

fn join_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let rel = path.strip_prefix(".").unwrap_or(path);
    if base == Path::new(".") {
        rel.to_path_buf()
    } else {
        base.join(rel)
    }
}
