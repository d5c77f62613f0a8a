//! Node view handed to tree visitors
//!
//! A visitor sees one node at a time. Only bodies are handed out mutably,
//! so a visitor can add attributes to the body it is visiting and to
//! nothing else.

use crate::body::{Attribute, Block, Body};

/// A tree node as seen by a visitor
#[derive(Debug)]
pub enum Node<'a> {
    /// A block, with its nesting level (0 for blocks directly in a file)
    Block {
        block: &'a Block,
        nesting_level: usize,
    },
    /// A body, mutable for the duration of the visit
    Body(&'a mut Body),
    /// An attribute
    Attribute(&'a Attribute),
}
