//! Structural elements: files, bodies, blocks and attributes

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::expr::Expression;
use crate::pos::Range;

/// A parsed configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Name the file was parsed under
    pub filename: String,
    /// Root body of the file
    pub body: Body,
}

/// The content of a file or of a block
///
/// Attribute names are unique within a body. The order attributes were
/// written in is not preserved; nested blocks keep their source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    /// Attributes keyed by name
    pub attributes: HashMap<String, Attribute>,
    /// Nested blocks in source order
    pub blocks: Vec<Block>,
    /// Source range, including the braces for block bodies
    pub range: Range,
}

/// A block such as `resource "aws_instance" "web" { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block type keyword (e.g. `resource`, `provider`)
    pub type_name: String,
    /// Block labels, unquoted
    pub labels: Vec<String>,
    /// Block body
    pub body: Body,
    /// Source range from the type keyword to the closing brace
    pub range: Range,
}

/// An attribute assignment `name = expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Value expression
    pub expr: Expression,
    /// Source range from the name to the end of the expression
    pub range: Range,
    /// Whether the attribute was synthesized rather than parsed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl Attribute {
    /// Create a parsed attribute
    pub fn new(name: impl Into<String>, expr: Expression, range: Range) -> Self {
        Self {
            name: name.into(),
            expr,
            range,
            placeholder: false,
        }
    }

    /// Create a synthesized `name = null` attribute located at `range`
    pub fn placeholder(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            expr: Expression::null(range.clone()),
            range,
            placeholder: true,
        }
    }
}

impl Body {
    /// Create an empty body covering `range`
    pub fn new(range: Range) -> Self {
        Self {
            attributes: HashMap::new(),
            blocks: Vec::new(),
            range,
        }
    }

    /// Check if an attribute with this name exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Get an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Insert an attribute, returning the one it replaced
    pub fn insert_attribute(&mut self, attribute: Attribute) -> Option<Attribute> {
        self.attributes.insert(attribute.name.clone(), attribute)
    }

    /// Attributes sorted by name
    pub fn sorted_attributes(&self) -> Vec<&Attribute> {
        let mut attributes: Vec<&Attribute> = self.attributes.values().collect();
        attributes.sort_by(|a, b| a.name.cmp(&b.name));
        attributes
    }
}

impl Block {
    /// First label, if any
    pub fn first_label(&self) -> Option<&str> {
        self.labels.first().map(|s| s.as_str())
    }
}
