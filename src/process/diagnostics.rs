// src/process/diagnostics.rs

use std::fmt;
use tracing::{debug, info, warn};

use crate::process::utils::excerpt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
}

/// Why a line after the header was not turned into a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Every token parsed, but there were the wrong number of them.
    TokenCount { expected: usize, found: usize },
    /// `token` is the first one that failed `f64` conversion.
    NotNumeric { token: String },
    /// The header line again, as written by a restarted run.
    RepeatedHeader,
    /// The `1 2 3 ... N` column numbering just above a repeated header.
    IndexRow,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::TokenCount { expected, found } => {
                write!(f, "expected {} values, found {}", expected, found)
            }
            DropReason::NotNumeric { token } => write!(f, "token {:?} is not numeric", token),
            DropReason::RepeatedHeader => write!(f, "repeated header starts a new segment"),
            DropReason::IndexRow => write!(f, "column index row of a repeated header"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    DroppedLine { reason: DropReason, excerpt: String },
    DuplicateColumn { original: String, renamed: String },
    ColumnPresence { column: String, present: bool },
    PreambleSkipped { reason: String },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::DroppedLine { reason, excerpt } => {
                write!(f, "dropped line ({}): {}", reason, excerpt)
            }
            DiagnosticKind::DuplicateColumn { original, renamed } => {
                write!(f, "duplicate column {} renamed to {}", original, renamed)
            }
            DiagnosticKind::ColumnPresence { column, present } => {
                let state = if *present { "present" } else { "missing" };
                write!(f, "key column {}: {}", column, state)
            }
            DiagnosticKind::PreambleSkipped { reason } => {
                write!(f, "preamble metadata skipped: {}", reason)
            }
        }
    }
}

/// One reader finding. `line` is 1-based and refers to the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(severity: Severity, line: Option<usize>, kind: DiagnosticKind) -> Self {
        Self {
            severity,
            line,
            kind,
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Forward to the active tracing subscriber.
    pub fn emit(&self) {
        let message = self.message();
        match (self.severity, self.line) {
            (Severity::Warning, Some(line)) => warn!(line, "{}", message),
            (Severity::Warning, None) => warn!("{}", message),
            (Severity::Info, Some(line)) => info!(line, "{}", message),
            (Severity::Info, None) => info!("{}", message),
            (Severity::Debug, Some(line)) => debug!(line, "{}", message),
            (Severity::Debug, None) => debug!("{}", message),
        }
    }
}

/// Counters and diagnostics gathered while reading one history file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// 1-based line number of the header.
    pub header_line: usize,
    pub accepted: usize,
    pub dropped: usize,
    /// Header+data blocks seen; a restarted run adds one per repeated header.
    pub segments: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn drop_line(&mut self, line: usize, reason: DropReason, text: &str) {
        self.dropped += 1;
        let severity = match reason {
            DropReason::RepeatedHeader | DropReason::IndexRow => Severity::Info,
            _ => Severity::Warning,
        };
        self.push(Diagnostic::new(
            severity,
            Some(line),
            DiagnosticKind::DroppedLine {
                reason,
                excerpt: excerpt(text),
            },
        ));
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// `(line, reason)` for every dropped line, in file order.
    pub fn dropped_lines(&self) -> impl Iterator<Item = (usize, &DropReason)> {
        self.diagnostics.iter().filter_map(|d| match (&d.kind, d.line) {
            (DiagnosticKind::DroppedLine { reason, .. }, Some(line)) => Some((line, reason)),
            _ => None,
        })
    }
}
