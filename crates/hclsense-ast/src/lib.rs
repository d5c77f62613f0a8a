//! hclsense-ast - Syntax tree definitions
//!
//! This crate provides the tree types used by hclsense for representing
//! parsed configuration documents: files, bodies, blocks and attributes,
//! together with the source positions they were parsed from.

pub mod body;
pub mod expr;
pub mod node;
pub mod pos;

pub use body::{Attribute, Block, Body, File};
pub use expr::{ExprKind, Expression, Value};
pub use node::Node;
pub use pos::{Pos, Range};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
