//! Quick fixes for validation diagnostics

use hclsense_ast::{Pos, Range, Value};
use hclsense_core::diagnostics::{Diagnostic, Fix, TextEdit};
use hclsense_core::render_attribute;

/// Title of the fix offered for a missing attribute
pub const ADD_MISSING_ATTRIBUTE: &str = "Add missing attribute";

/// Build the fix that adds `name = null` to the diagnostic's body
///
/// The edit is a zero-width insertion at the start of the line holding the
/// end of the subject, which for a block body is the line of its closing
/// brace. A diagnostic without a subject gets an insertion at the start of
/// the document.
pub fn missing_attribute_fix(diagnostic: &Diagnostic, name: &str) -> Fix {
    let range = match &diagnostic.subject {
        Some(subject) => {
            let end = subject.end;
            let pos = Pos::new(
                end.line,
                1,
                end.byte.saturating_sub(end.column.saturating_sub(1)),
            );
            Range::point(subject.filename.clone(), pos)
        }
        None => Range::point("", Pos::start()),
    };

    let edit = TextEdit::new(range, render_attribute(name, &Value::Null));
    Fix::quickfix(ADD_MISSING_ATTRIBUTE, vec![edit])
}
