//! Error types for parsing.

use hclsense_ast::{Pos, Range};
use thiserror::Error;

use crate::diagnostics::Diagnostic;

/// Result type for parse operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character that cannot start or continue the current construct
    #[error("Unexpected character '{found}' at {pos}, expected {expected}")]
    UnexpectedCharacter {
        found: char,
        expected: &'static str,
        pos: Pos,
    },

    /// Input ended in the middle of a construct
    #[error("Unexpected end of input at {pos}, expected {expected}")]
    UnexpectedEof { expected: &'static str, pos: Pos },

    /// Quoted string without a closing quote on the same line
    #[error("Unterminated string starting at {pos}")]
    UnterminatedString { pos: Pos },

    /// Block comment without `*/`
    #[error("Unterminated comment starting at {pos}")]
    UnterminatedComment { pos: Pos },

    /// Heredoc without its closing marker line
    #[error("Unterminated heredoc '{marker}' starting at {pos}")]
    UnterminatedHeredoc { marker: String, pos: Pos },

    /// Block body never closed
    #[error("Block '{block_type}' opened at {pos} is never closed")]
    UnclosedBlock { block_type: String, pos: Pos },

    /// Attribute assigned twice in the same body
    #[error("Attribute '{name}' at {pos} was already set at {previous}")]
    DuplicateAttribute { name: String, pos: Pos, previous: Pos },

    /// Quoted label containing escapes or templates that cannot be resolved
    #[error("Invalid block label at {pos}")]
    InvalidLabel { pos: Pos },

    /// `}` outside of any block
    #[error("Unexpected closing brace at {pos}")]
    UnexpectedClosingBrace { pos: Pos },
}

impl ParseError {
    /// Position the error was detected at
    pub fn pos(&self) -> Pos {
        match self {
            ParseError::UnexpectedCharacter { pos, .. }
            | ParseError::UnexpectedEof { pos, .. }
            | ParseError::UnterminatedString { pos }
            | ParseError::UnterminatedComment { pos }
            | ParseError::UnterminatedHeredoc { pos, .. }
            | ParseError::UnclosedBlock { pos, .. }
            | ParseError::DuplicateAttribute { pos, .. }
            | ParseError::InvalidLabel { pos }
            | ParseError::UnexpectedClosingBrace { pos } => *pos,
        }
    }

    /// Short summary used as the diagnostic title
    pub fn summary(&self) -> &'static str {
        match self {
            ParseError::UnexpectedCharacter { .. } => "Invalid character",
            ParseError::UnexpectedEof { .. } => "Unexpected end of file",
            ParseError::UnterminatedString { .. } => "Unterminated string",
            ParseError::UnterminatedComment { .. } => "Unterminated comment",
            ParseError::UnterminatedHeredoc { .. } => "Unterminated heredoc",
            ParseError::UnclosedBlock { .. } => "Unclosed block",
            ParseError::DuplicateAttribute { .. } => "Attribute redefined",
            ParseError::InvalidLabel { .. } => "Invalid block label",
            ParseError::UnexpectedClosingBrace { .. } => "Unexpected closing brace",
        }
    }

    /// Convert into an error diagnostic located at the error position
    pub fn to_diagnostic(&self, filename: &str) -> Diagnostic {
        Diagnostic::error(self.summary())
            .with_detail(self.to_string())
            .with_subject(Range::point(filename, self.pos()))
    }
}
