//! Issue types for resource tree checks.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it: location, message, severity, rule and optional note/hint.

use enum_dispatch::enum_dispatch;

use crate::core::{MessageContext, ResolutionError};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MalformedReference,
    UnresolvedReference,
    CyclicReference,
    InvalidStructure,
    UnknownSection,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MalformedReference => write!(f, "malformed-reference"),
            Rule::UnresolvedReference => write!(f, "unresolved-reference"),
            Rule::CyclicReference => write!(f, "cyclic-reference"),
            Rule::InvalidStructure => write!(f, "invalid-structure"),
            Rule::UnknownSection => write!(f, "unknown-section"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Key References
// ============================================================

/// String leaf containing `[%key:` that is not a well-formed reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedReferenceIssue {
    pub context: MessageContext,
    pub error: ResolutionError,
}

impl MalformedReferenceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MalformedReference
    }
}

/// Reference whose target does not exist or is not a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReferenceIssue {
    pub context: MessageContext,
    pub error: ResolutionError,
}

impl UnresolvedReferenceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnresolvedReference
    }
}

/// Reference chain that loops or exceeds the depth bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicReferenceIssue {
    pub context: MessageContext,
    pub error: ResolutionError,
}

impl CyclicReferenceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::CyclicReference
    }
}

// ============================================================
// Issue Types - File Structure
// ============================================================

/// Section or field whose value has the wrong shape (e.g., a string `step`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStructureIssue {
    pub context: MessageContext,
    /// What the section should hold ("a string", "an object").
    pub expected: String,
    /// What it holds instead.
    pub found: String,
}

impl InvalidStructureIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidStructure
    }
}

/// Section or field name that is not part of the strings file layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSectionIssue {
    pub context: MessageContext,
    /// Where the name appeared ("top-level section", "step field", ...).
    pub scope: &'static str,
}

impl UnknownSectionIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownSection
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found while checking resource trees.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MalformedReference(MalformedReferenceIssue),
    UnresolvedReference(UnresolvedReferenceIssue),
    CyclicReference(CyclicReferenceIssue),
    InvalidStructure(InvalidStructureIssue),
    UnknownSection(UnknownSectionIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    /// Classify a resolution failure of a string leaf.
    pub fn from_resolution(context: MessageContext, error: ResolutionError) -> Self {
        if error.is_malformed() {
            Issue::MalformedReference(MalformedReferenceIssue { context, error })
        } else if error.is_cyclic() {
            Issue::CyclicReference(CyclicReferenceIssue { context, error })
        } else {
            Issue::UnresolvedReference(UnresolvedReferenceIssue { context, error })
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Issue::MalformedReference(_) => MalformedReferenceIssue::severity(),
            Issue::UnresolvedReference(_) => UnresolvedReferenceIssue::severity(),
            Issue::CyclicReference(_) => CyclicReferenceIssue::severity(),
            Issue::InvalidStructure(_) => InvalidStructureIssue::severity(),
            Issue::UnknownSection(_) => UnknownSectionIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::MalformedReference(_) => MalformedReferenceIssue::rule(),
            Issue::UnresolvedReference(_) => UnresolvedReferenceIssue::rule(),
            Issue::CyclicReference(_) => CyclicReferenceIssue::rule(),
            Issue::InvalidStructure(_) => InvalidStructureIssue::rule(),
            Issue::UnknownSection(_) => UnknownSectionIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Key in a strings file (line, column, optional source line).
    Message(&'a MessageContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards it through `Issue`.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MalformedReferenceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("references look like [%key:component::<name>::<path>%]")
    }

    fn details(&self) -> Option<String> {
        Some(self.error.to_string())
    }
}

impl Report for UnresolvedReferenceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.error {
            ResolutionError::UnknownNamespace { .. } => {
                Some("no core strings file was loaded; check 'coreStrings' in .keyrefrc.json")
            }
            _ => None,
        }
    }

    fn details(&self) -> Option<String> {
        Some(self.error.to_string())
    }
}

impl Report for CyclicReferenceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.error {
            ResolutionError::DepthExceeded { .. } => {
                Some("raise 'maxDepth' (or pass --max-depth) if the chain is intentional")
            }
            _ => None,
        }
    }

    fn details(&self) -> Option<String> {
        Some(self.error.to_string())
    }
}

impl Report for InvalidStructureIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("expected {}, found {}", self.expected, self.found))
    }
}

impl Report for UnknownSectionIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let name = self.context.key.rsplit("::").next().unwrap_or_default();
        Some(format!("'{}' is not a known {}", name, self.scope))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Message(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Message(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Message(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
