//! Validation diagnostics for hclsense
//!
//! This module provides structures for reporting problems found while
//! parsing or validating a configuration document, together with the
//! fixes that can be applied to resolve them.

use hclsense_ast::Range;
use serde::{Deserialize, Serialize};

/// A diagnostic message from the parser or a validator
///
/// # Example
///
/// ```
/// use hclsense_core::diagnostics::{Diagnostic, Severity};
/// use hclsense_ast::{Pos, Range};
///
/// let diag = Diagnostic::error("Required attribute \"ami\" not specified")
///     .with_detail("An attribute named \"ami\" is required here")
///     .with_subject(Range::new("main.tf", Pos::new(1, 18, 17), Pos::new(3, 2, 40)));
///
/// assert_eq!(diag.severity, Severity::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level of the diagnostic
    pub severity: Severity,

    /// Short description of the problem
    pub summary: String,

    /// Longer explanation, may be empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,

    /// Source range the diagnostic is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Range>,

    /// Fixes offered for this diagnostic
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<Fix>,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Uninitialised severity; never valid in a produced diagnostic
    Invalid,

    /// Error, indicates a problem that should be fixed
    Error,

    /// Warning, indicates a potential issue
    Warning,
}

/// An automated remedy for a diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Title shown to the user
    pub message: String,
    /// Kind of fix
    pub kind: FixKind,
    /// Edits to apply, in order
    pub edits: Vec<TextEdit>,
}

/// Category of a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixKind {
    #[serde(rename = "quickfix")]
    QuickFix,
}

/// A single insertion or replacement over a source range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEdit {
    /// Range to replace; zero-width for a pure insertion
    pub range: Range,
    /// Replacement text
    pub new_text: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, summary: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: String::new(),
            subject: None,
            fixes: Vec::new(),
        }
    }

    /// Create an error diagnostic
    pub fn error(summary: impl Into<String>) -> Self {
        Self::new(Severity::Error, summary)
    }

    /// Create a warning diagnostic
    pub fn warning(summary: impl Into<String>) -> Self {
        Self::new(Severity::Warning, summary)
    }

    /// Set the detail text
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Set the subject range
    pub fn with_subject(mut self, subject: Range) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Attach a fix
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }

    /// Check if this is an error-level diagnostic
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Check if this is a warning-level diagnostic
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }

    /// Summary and detail joined the way editors display them
    pub fn message(&self) -> String {
        if self.detail.is_empty() {
            self.summary.clone()
        } else {
            format!("{}: {}", self.summary, self.detail)
        }
    }
}

impl Fix {
    /// Create a quick fix
    pub fn quickfix(message: impl Into<String>, edits: Vec<TextEdit>) -> Self {
        Self {
            message: message.into(),
            kind: FixKind::QuickFix,
            edits,
        }
    }
}

impl FixKind {
    /// Protocol name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FixKind::QuickFix => "quickfix",
        }
    }
}

impl TextEdit {
    /// Create an edit
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Check if the edit inserts without replacing anything
    pub fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Invalid => write!(f, "invalid"),
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl std::fmt::Display for FixKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: severity: summary
        write!(f, "{}: {}", self.severity, self.summary)?;

        if let Some(ref subject) = self.subject {
            write!(
                f,
                "\n  --> {}:{}:{}",
                subject.filename, subject.start.line, subject.start.column
            )?;
        }

        if !self.detail.is_empty() {
            write!(f, "\n  = detail: {}", self.detail)?;
        }

        for fix in &self.fixes {
            write!(f, "\n  = fix: {}", fix.message)?;
        }

        Ok(())
    }
}

/// A collection of diagnostics
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    /// Get all diagnostics
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// All text edits from all fixes, in diagnostic order
    pub fn fix_edits(&self) -> Vec<TextEdit> {
        self.diagnostics
            .iter()
            .flat_map(|d| d.fixes.iter())
            .flat_map(|fix| fix.edits.iter().cloned())
            .collect()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get the count
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.diagnostics.extend(iter);
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}
