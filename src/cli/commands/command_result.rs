use std::path::PathBuf;

use crate::{core::ResolutionError, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Resolve(ResolveSummary),
    Render(RenderSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub input: String,
    pub outcome: Result<String, ResolutionError>,
}

#[derive(Debug)]
pub struct RenderSummary {
    pub component: String,
    /// Pretty JSON of the rendered tree; `None` when references failed to resolve.
    pub rendered: Option<String>,
    /// File the rendered JSON was written to.
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running keyref commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found, sorted for reporting.
    pub issues: Vec<Issue>,
    /// Number of resource files that failed to parse.
    pub parse_error_count: usize,
    /// Number of resource files that were checked.
    pub files_checked: usize,
}
