//! Applying text edits to source text
//!
//! Edit ranges are resolved through their line and column, the same
//! coordinates editors use, rather than through the recorded byte offsets.

use hclsense_ast::Pos;

use crate::diagnostics::TextEdit;

/// Apply edits to `source` and return the new text
///
/// Edits are applied back to front. Edits sharing a start position keep
/// their relative order in the output. Positions past the end of a line or
/// of the document are clamped.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut resolved: Vec<(usize, usize, usize, &str)> = edits
        .iter()
        .enumerate()
        .map(|(index, edit)| {
            let start = byte_offset(source, edit.range.start);
            let end = byte_offset(source, edit.range.end).max(start);
            (start, index, end, edit.new_text.as_str())
        })
        .collect();

    // Back to front; for equal starts the later edit goes in first so the
    // earlier one ends up in front of it
    resolved.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut output = source.to_string();
    for (start, _, end, text) in resolved {
        output.replace_range(start..end, text);
    }
    output
}

/// Byte offset of a 1-based line and character column
pub fn byte_offset(source: &str, pos: Pos) -> usize {
    let mut line = 1;
    let mut line_start = 0;

    if pos.line > 1 {
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line += 1;
                line_start = i + 1;
                if line == pos.line {
                    break;
                }
            }
        }
        if line < pos.line {
            return source.len();
        }
    }

    let rest = &source[line_start..];
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let column = pos.column.max(1) - 1;

    rest[..line_len]
        .char_indices()
        .nth(column)
        .map(|(i, _)| line_start + i)
        .unwrap_or(line_start + line_len)
}
