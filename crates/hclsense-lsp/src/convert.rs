//! Conversion of hclsense diagnostics to LSP types
//!
//! hclsense positions are 1-based lines and 1-based character columns. LSP
//! positions are 0-based lines and 0-based characters. Columns are copied
//! as character counts; no UTF-16 conversion is done.

use std::collections::HashMap;

use hclsense_ast::{Pos, Range as HclRange};
use hclsense_core::diagnostics::{Diagnostic as HclDiagnostic, Fix, Severity, TextEdit as HclTextEdit};
use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, Diagnostic, DiagnosticSeverity, Position, Range, TextEdit, Url,
    WorkspaceEdit,
};

/// Convert diagnostics for the document `source`
///
/// Always returns a vector, empty when there is nothing to report, so a
/// publish notification never carries a null list.
///
/// # Panics
///
/// Panics on a diagnostic with `Severity::Invalid`; such a diagnostic is a
/// bug in whatever produced it.
pub fn to_lsp_diagnostics(diagnostics: Option<&[HclDiagnostic]>, source: &Url) -> Vec<Diagnostic> {
    diagnostics
        .unwrap_or_default()
        .iter()
        .map(|diag| to_lsp_diagnostic(diag, source))
        .collect()
}

/// Convert a single diagnostic
///
/// The fixes travel in `data` as a JSON array of code actions, which is
/// empty rather than null when there are none.
pub fn to_lsp_diagnostic(diag: &HclDiagnostic, source: &Url) -> Diagnostic {
    let range = diag.subject.as_ref().map(to_lsp_range).unwrap_or_default();
    let actions = to_lsp_code_actions(&diag.fixes, source);
    let data = serde_json::json!(actions);

    Diagnostic {
        range,
        severity: Some(to_lsp_severity(diag.severity)),
        source: Some(source.to_string()),
        message: diag.message(),
        data: Some(data),
        ..Default::default()
    }
}

/// Map a severity to its LSP counterpart
///
/// # Panics
///
/// Panics on `Severity::Invalid`.
pub fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Invalid => panic!("invalid diagnostic severity"),
    }
}

/// Convert all fixes of a diagnostic
pub fn to_lsp_code_actions(fixes: &[Fix], source: &Url) -> Vec<CodeAction> {
    fixes
        .iter()
        .map(|fix| to_lsp_code_action(fix, source))
        .collect()
}

/// Convert a fix into a code action
///
/// Every edit is filed under `source`, whatever file its range names: a
/// fix only ever touches the document it was computed for.
pub fn to_lsp_code_action(fix: &Fix, source: &Url) -> CodeAction {
    let changes = if fix.edits.is_empty() {
        None
    } else {
        let edits: Vec<TextEdit> = fix.edits.iter().map(to_lsp_text_edit).collect();
        let mut changes = HashMap::new();
        changes.insert(source.clone(), edits);
        Some(changes)
    };

    CodeAction {
        title: fix.message.clone(),
        kind: Some(CodeActionKind::from(fix.kind.as_str().to_string())),
        edit: Some(WorkspaceEdit {
            changes,
            document_changes: None,
            change_annotations: None,
        }),
        ..Default::default()
    }
}

/// Convert a text edit
pub fn to_lsp_text_edit(edit: &HclTextEdit) -> TextEdit {
    TextEdit {
        range: to_lsp_range(&edit.range),
        new_text: edit.new_text.clone(),
    }
}

/// Convert a range
pub fn to_lsp_range(range: &HclRange) -> Range {
    Range {
        start: to_lsp_position(range.start),
        end: to_lsp_position(range.end),
    }
}

/// Convert a position
///
/// The zero position (line 0, column 0) maps to the LSP origin.
pub fn to_lsp_position(pos: Pos) -> Position {
    Position::new(
        pos.line.saturating_sub(1) as u32,
        pos.column.saturating_sub(1) as u32,
    )
}
