//! Required attribute validator
//!
//! Reports attributes a body schema marks as required but that the body
//! does not set, and heals the tree by inserting a `null` placeholder for
//! each of them.

use hclsense_ast::{Attribute, Body, Node};
use hclsense_core::diagnostics::Diagnostic;
use tracing::debug;

use crate::context::ValidationContext;
use crate::fix::missing_attribute_fix;
use crate::schema::BodySchema;
use crate::Validator;

/// Block types suppressed when no other list is configured
pub const DEFAULT_SUPPRESSED_BLOCKS: &[&str] = &["provider"];

/// Validates that required attributes are present
///
/// Top-level blocks of a suppressed type (by default `provider`) switch off
/// the check for themselves and everything nested in them, since their
/// required values may come from outside the document.
///
/// Missing attributes of one body are reported in ascending name order.
///
/// # Diagnostic Codes
///
/// - `HCL1`: Required attribute not specified
///
/// # Example
///
/// ```
/// use hclsense_ast::{Body, Node};
/// use hclsense_validate::{
///     AttributeSchema, BodySchema, MissingRequiredAttribute, ValidationContext, Validator,
/// };
///
/// let schema = BodySchema::new().with_attribute("ami", AttributeSchema::required());
/// let mut body = Body::default();
///
/// let validator = MissingRequiredAttribute::default();
/// let (_, diagnostics) =
///     validator.visit(ValidationContext::new(), Node::Body(&mut body), Some(&schema));
///
/// assert_eq!(diagnostics.len(), 1);
/// assert!(body.attribute("ami").unwrap().placeholder);
/// ```
#[derive(Debug, Clone)]
pub struct MissingRequiredAttribute {
    suppressed_blocks: Vec<String>,
}

impl Default for MissingRequiredAttribute {
    fn default() -> Self {
        Self::with_suppressed_blocks(DEFAULT_SUPPRESSED_BLOCKS.iter().copied())
    }
}

impl MissingRequiredAttribute {
    /// Create a validator suppressing the given top-level block types
    pub fn with_suppressed_blocks<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suppressed_blocks: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Block types that suppress the check when at the top level
    pub fn suppressed_blocks(&self) -> &[String] {
        &self.suppressed_blocks
    }

    fn is_suppressed_type(&self, type_name: &str) -> bool {
        self.suppressed_blocks.iter().any(|t| t == type_name)
    }

    fn check_body(&self, body: &mut Body, schema: &BodySchema) -> Vec<Diagnostic> {
        let missing: Vec<String> = schema
            .required_attributes()
            .filter(|name| !body.has_attribute(name))
            .map(str::to_string)
            .collect();

        let mut diagnostics = Vec::with_capacity(missing.len());
        for name in missing {
            let diagnostic = Diagnostic::error(format!("Required attribute {:?} not specified", name))
                .with_detail(format!("An attribute named {:?} is required here", name))
                .with_subject(body.range.clone());

            // Heal the tree so later passes don't report follow-up errors
            body.insert_attribute(Attribute::placeholder(name.as_str(), body.range.clone()));

            let fix = missing_attribute_fix(&diagnostic, &name);
            let diagnostic = diagnostic.with_fix(fix);

            debug!(
                attribute = %name,
                range = %body.range,
                "required attribute not specified"
            );
            diagnostics.push(diagnostic);
        }

        diagnostics
    }
}

impl Validator for MissingRequiredAttribute {
    fn code(&self) -> &'static str {
        "HCL1"
    }

    fn name(&self) -> &'static str {
        "missing-required-attribute"
    }

    fn visit(
        &self,
        ctx: ValidationContext,
        node: Node<'_>,
        schema: Option<&BodySchema>,
    ) -> (ValidationContext, Vec<Diagnostic>) {
        if ctx.has_suppression() {
            return (ctx, Vec::new());
        }

        match node {
            Node::Block {
                block,
                nesting_level,
            } => {
                if nesting_level == 0 && self.is_suppressed_type(&block.type_name) {
                    debug!(block = %block.type_name, "suppressing required attribute checks");
                    (ctx.with_suppression(), Vec::new())
                } else {
                    (ctx, Vec::new())
                }
            }
            Node::Body(body) => match schema {
                Some(schema) if schema.has_attributes() => {
                    let diagnostics = self.check_body(body, schema);
                    (ctx, diagnostics)
                }
                _ => (ctx, Vec::new()),
            },
            Node::Attribute(_) => (ctx, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeSchema;
    use hclsense_ast::{Block, Expression, Pos, Range, Value};

    fn body_range() -> Range {
        Range::new("main.tf", Pos::new(1, 31, 30), Pos::new(3, 2, 51))
    }

    fn body_with(names: &[&str]) -> Body {
        let mut body = Body::new(body_range());
        for name in names {
            let expr = Expression::literal(Value::Number(1.0), Range::default());
            body.insert_attribute(Attribute::new(*name, expr, Range::default()));
        }
        body
    }

    fn schema_requiring(names: &[&str]) -> BodySchema {
        names.iter().fold(BodySchema::new(), |schema, name| {
            schema.with_attribute(*name, AttributeSchema::required())
        })
    }

    fn block(type_name: &str) -> Block {
        Block {
            type_name: type_name.to_string(),
            labels: vec![],
            body: Body::default(),
            range: Range::default(),
        }
    }

    #[test]
    fn test_reports_missing_in_name_order() {
        let validator = MissingRequiredAttribute::default();
        let schema = schema_requiring(&["c", "a", "b"]);
        let mut body = body_with(&["b"]);

        let ctx = ValidationContext::new();
        let (returned, diagnostics) = validator.visit(ctx, Node::Body(&mut body), Some(&schema));

        assert_eq!(returned, ctx);
        let summaries: Vec<&str> = diagnostics.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec![
                "Required attribute \"a\" not specified",
                "Required attribute \"c\" not specified"
            ]
        );
    }

    #[test]
    fn test_validator_identity() {
        let validator = MissingRequiredAttribute::default();
        assert_eq!(validator.code(), "HCL1");
        assert_eq!(validator.name(), "missing-required-attribute");
    }

    #[test]
    fn test_diagnostic_shape() {
        let validator = MissingRequiredAttribute::default();
        let schema = schema_requiring(&["ami"]);
        let mut body = body_with(&[]);

        let (_, diagnostics) =
            validator.visit(ValidationContext::new(), Node::Body(&mut body), Some(&schema));

        let diag = &diagnostics[0];
        assert!(diag.is_error());
        assert_eq!(diag.detail, "An attribute named \"ami\" is required here");
        assert_eq!(diag.subject, Some(body_range()));
        assert_eq!(diag.fixes.len(), 1);
        assert_eq!(diag.fixes[0].edits[0].new_text, "ami = null\n");
    }

    #[test]
    fn test_placeholder_inserted() {
        let validator = MissingRequiredAttribute::default();
        let schema = schema_requiring(&["ami"]);
        let mut body = body_with(&[]);

        validator.visit(ValidationContext::new(), Node::Body(&mut body), Some(&schema));

        let attr = body.attribute("ami").unwrap();
        assert!(attr.placeholder);
        assert!(attr.expr.is_null());
    }

    #[test]
    fn test_optional_and_present_ignored() {
        let validator = MissingRequiredAttribute::default();
        let schema = schema_requiring(&["a"]).with_attribute("tags", AttributeSchema::optional());
        let mut body = body_with(&["a"]);

        let (_, diagnostics) =
            validator.visit(ValidationContext::new(), Node::Body(&mut body), Some(&schema));
        assert!(diagnostics.is_empty());
        assert!(!body.has_attribute("tags"));
    }

    #[test]
    fn test_no_schema_nothing_to_check() {
        let validator = MissingRequiredAttribute::default();
        let mut body = body_with(&[]);

        let (_, diagnostics) = validator.visit(ValidationContext::new(), Node::Body(&mut body), None);
        assert!(diagnostics.is_empty());

        let empty = BodySchema::new();
        let (_, diagnostics) =
            validator.visit(ValidationContext::new(), Node::Body(&mut body), Some(&empty));
        assert!(diagnostics.is_empty());
        assert!(body.attributes.is_empty());
    }

    #[test]
    fn test_suppressed_context_skips_body() {
        let validator = MissingRequiredAttribute::default();
        let schema = schema_requiring(&["a"]);
        let mut body = body_with(&[]);

        let ctx = ValidationContext::new().with_suppression();
        let (returned, diagnostics) = validator.visit(ctx, Node::Body(&mut body), Some(&schema));

        assert_eq!(returned, ctx);
        assert!(diagnostics.is_empty());
        assert!(body.attributes.is_empty());
    }

    #[test]
    fn test_top_level_provider_suppresses() {
        let validator = MissingRequiredAttribute::default();
        let provider = block("provider");

        let node = Node::Block {
            block: &provider,
            nesting_level: 0,
        };
        let (ctx, diagnostics) = validator.visit(ValidationContext::new(), node, None);
        assert!(ctx.has_suppression());
        assert!(diagnostics.is_empty());

        let node = Node::Block {
            block: &provider,
            nesting_level: 1,
        };
        let (ctx, _) = validator.visit(ValidationContext::new(), node, None);
        assert!(!ctx.has_suppression());
    }

    #[test]
    fn test_other_blocks_pass_context() {
        let validator = MissingRequiredAttribute::default();
        let resource = block("resource");
        let node = Node::Block {
            block: &resource,
            nesting_level: 0,
        };
        let (ctx, _) = validator.visit(ValidationContext::new(), node, None);
        assert!(!ctx.has_suppression());
    }

    #[test]
    fn test_custom_suppressed_blocks() {
        let validator = MissingRequiredAttribute::with_suppressed_blocks(["backend", "provider"]);
        assert_eq!(validator.suppressed_blocks(), ["backend", "provider"]);

        let backend = block("backend");
        let node = Node::Block {
            block: &backend,
            nesting_level: 0,
        };
        let (ctx, _) = validator.visit(ValidationContext::new(), node, None);
        assert!(ctx.has_suppression());
    }
}
