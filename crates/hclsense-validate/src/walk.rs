//! Depth-first tree walker
//!
//! Drives a [`Validator`] over a file in pre-order: a block is visited
//! before its body, a body before its attributes, and attributes before the
//! nested blocks. The context returned by a visit reaches the visited
//! node's descendants only; siblings see their parent's context.

use hclsense_ast::{Body, File, Node};
use hclsense_core::diagnostics::Diagnostic;

use crate::context::ValidationContext;
use crate::schema::BodySchema;
use crate::Validator;

/// Walk a file with a fresh context and collect all diagnostics
///
/// `schema` applies to the root body. Nested bodies get the schema their
/// parent schema declares for their block type, or none.
pub fn walk(file: &mut File, schema: Option<&BodySchema>, validator: &dyn Validator) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    walk_body(
        &mut file.body,
        schema,
        ValidationContext::new(),
        0,
        validator,
        &mut diagnostics,
    );
    diagnostics
}

fn walk_body(
    body: &mut Body,
    schema: Option<&BodySchema>,
    ctx: ValidationContext,
    depth: usize,
    validator: &dyn Validator,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let (ctx, found) = validator.visit(ctx, Node::Body(&mut *body), schema);
    diagnostics.extend(found);

    for attribute in body.sorted_attributes() {
        let (_, found) = validator.visit(ctx, Node::Attribute(attribute), None);
        diagnostics.extend(found);
    }

    for block in body.blocks.iter_mut() {
        let node = Node::Block {
            block: &*block,
            nesting_level: depth,
        };
        let (block_ctx, found) = validator.visit(ctx, node, None);
        diagnostics.extend(found);

        let block_schema = schema.and_then(|s| s.block_body(block));
        walk_body(
            &mut block.body,
            block_schema,
            block_ctx,
            depth + 1,
            validator,
            diagnostics,
        );
    }
}
