//! hclsense-core - Parsing, diagnostics and text edits for HCL documents
//!
//! Core library for hclsense. It turns configuration text into the
//! `hclsense_ast` tree, defines the diagnostic model shared by all
//! validators, and renders and applies the text edits fixes are made of.
//!
//! # Example
//!
//! ```
//! use hclsense_core::{apply_edits, parse};
//! use hclsense_core::diagnostics::TextEdit;
//! use hclsense_ast::{Pos, Range};
//!
//! let source = "variable \"region\" {\n}\n";
//! let file = parse(source, "main.tf").unwrap();
//! assert_eq!(file.body.blocks[0].first_label(), Some("region"));
//!
//! let edit = TextEdit::new(Range::point("main.tf", Pos::new(2, 1, 20)), "default = null\n");
//! assert_eq!(apply_edits(source, &[edit]), "variable \"region\" {\ndefault = null\n}\n");
//! ```

pub mod diagnostics;
pub mod edit;
pub mod error;
pub mod parser;
pub mod writer;

// Re-export main types and functions
pub use diagnostics::{Diagnostic, Diagnostics, Fix, FixKind, Severity, TextEdit};
pub use edit::apply_edits;
pub use error::{ParseError, Result};
pub use parser::parse;
pub use writer::{render_attribute, render_value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
