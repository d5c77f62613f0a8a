//! hclsense-validate - Schema-driven validation engine
//!
//! This crate checks parsed configuration files against a static body
//! schema and reports problems as diagnostics carrying quick fixes.
//!
//! # Architecture
//!
//! Individual validators implement the `Validator` trait and look at one
//! node at a time. The walker drives them over the tree in pre-order and
//! threads a `ValidationContext` from each block to its descendants. The
//! `ValidationEngine` runs every registered validator over a file and
//! collects the diagnostics.
//!
//! # Example
//!
//! ```
//! use hclsense_validate::{BodySchema, ValidationEngine};
//!
//! let source = "output \"id\" {\n}\n";
//! let mut file = hclsense_core::parse(source, "main.tf").unwrap();
//!
//! let engine = ValidationEngine::with_defaults();
//! let diagnostics = engine.validate(&mut file, Some(&BodySchema::builtin().unwrap()));
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].summary, "Required attribute \"value\" not specified");
//! ```

pub mod context;
pub mod fix;
pub mod required;
pub mod schema;
pub mod walk;

use hclsense_ast::{File, Node};
use hclsense_core::diagnostics::Diagnostic;
use tracing::debug;

pub use context::ValidationContext;
pub use fix::missing_attribute_fix;
pub use required::MissingRequiredAttribute;
pub use schema::{AttributeSchema, BlockSchema, BodySchema, SchemaError};
pub use walk::walk;

/// Trait for node validators
///
/// A validator is called once per node during a walk and returns the
/// context for the node's descendants together with any diagnostics.
pub trait Validator: Send + Sync {
    /// Get the validator's unique code (e.g., "HCL1" for attribute checks)
    fn code(&self) -> &'static str;

    /// Get a human-readable name for this validator
    fn name(&self) -> &'static str {
        "unnamed"
    }

    /// Inspect a single node
    ///
    /// `schema` is the resolved schema when `node` is a body, `None`
    /// otherwise or when no schema applies.
    fn visit(
        &self,
        ctx: ValidationContext,
        node: Node<'_>,
        schema: Option<&BodySchema>,
    ) -> (ValidationContext, Vec<Diagnostic>);
}

/// Validation engine that orchestrates multiple validators
pub struct ValidationEngine {
    /// Registered validators
    validators: Vec<Box<dyn Validator>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    /// Create a new empty validation engine
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Create an engine with default validators
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_validator(Box::new(MissingRequiredAttribute::default()));
        engine
    }

    /// Add a validator to the engine
    pub fn add_validator(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Get the number of registered validators
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Get the names of all registered validators
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Validate a file using all registered validators
    ///
    /// Each validator walks the file with a fresh context. Validators may
    /// heal the tree, so a later validator sees the earlier ones' changes.
    pub fn validate(&self, file: &mut File, schema: Option<&BodySchema>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for validator in &self.validators {
            let found = walk(file, schema, validator.as_ref());
            debug!(
                validator = validator.name(),
                file = %file.filename,
                count = found.len(),
                "validator finished"
            );
            diagnostics.extend(found);
        }

        diagnostics
    }

    /// Check if a file has any errors
    pub fn has_errors(&self, file: &mut File, schema: Option<&BodySchema>) -> bool {
        self.validate(file, schema).iter().any(|d| d.is_error())
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
