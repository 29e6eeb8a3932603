//! Issue types for extraction and rewrite results.
//!
//! Each issue is self-contained with everything the reporter needs to display it.

use enum_dispatch::enum_dispatch;

use crate::core::emit::MessageConflict;
use crate::core::fluent::Identifier;
use crate::core::{CallSiteError, ExtractionError, SourceContext, SourceLocation};

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
    ConflictingMessage,
    InvalidMessage,
    NestedCall,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ConflictingMessage => write!(f, "conflicting-message"),
            Rule::InvalidMessage => write!(f, "invalid-message"),
            Rule::NestedCall => write!(f, "nested-call"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A `createMessage` call that cannot be turned into a Fluent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMessageIssue {
    pub context: SourceContext,
    pub error: ExtractionError,
}

impl InvalidMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidMessage
    }
}

impl From<CallSiteError> for InvalidMessageIssue {
    fn from(err: CallSiteError) -> Self {
        Self {
            context: SourceContext::new(err.location, err.source_line),
            error: err.error,
        }
    }
}

/// A message whose id already belongs to a different message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingMessageIssue {
    pub context: SourceContext,
    pub id: Identifier,
    /// The call that owns the id.
    pub first: SourceLocation,
}

impl ConflictingMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ConflictingMessage
    }
}

impl From<MessageConflict> for ConflictingMessageIssue {
    fn from(conflict: MessageConflict) -> Self {
        Self {
            context: conflict.context,
            id: conflict.id,
            first: conflict.first,
        }
    }
}

/// A call inside the arguments of another rewritten call; left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedCallIssue {
    pub context: SourceContext,
    /// Where the enclosing call starts.
    pub outer: SourceLocation,
}

impl NestedCallIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::NestedCall
    }
}

/// Source file that failed to parse.
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

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ConflictingMessage(ConflictingMessageIssue),
    InvalidMessage(InvalidMessageIssue),
    NestedCall(NestedCallIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ConflictingMessage(_) => ConflictingMessageIssue::severity(),
            Issue::InvalidMessage(_) => InvalidMessageIssue::severity(),
            Issue::NestedCall(_) => NestedCallIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ConflictingMessage(_) => ConflictingMessageIssue::rule(),
            Issue::InvalidMessage(_) => InvalidMessageIssue::rule(),
            Issue::NestedCall(_) => NestedCallIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
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

impl Report for InvalidMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.error.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.error {
            ExtractionError::MissingDefaultVariant => {
                Some("add a variant named `other` or pass the default key as the third argument")
            }
            ExtractionError::InvalidSelector => {
                Some("assign the value to a local variable and pass that instead")
            }
            _ => None,
        }
    }
}

impl Report for ConflictingMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("message id `{}` is already used by a different message", self.id)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("first defined at {}", self.first))
    }

    fn hint(&self) -> Option<&str> {
        Some("selector messages are keyed by the selector; use a differently named variable")
    }
}

impl Report for NestedCallIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        "call nested inside another rewritten call is left unchanged".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("enclosing call at {}", self.outer))
    }

    fn hint(&self) -> Option<&str> {
        Some("run rewrite again after applying this pass")
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
            ReportLocation::Source(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_position(&self) -> (usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.location.line, ctx.location.col),
            ReportLocation::File { .. } => (0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_position().cmp(&other.sort_position()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
