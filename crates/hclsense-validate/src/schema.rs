//! Static body schemas
//!
//! A schema describes which attributes a body accepts, which of them are
//! required, and which nested block types it may contain. Schemas are read
//! from TOML:
//!
//! ```toml
//! [blocks.output.body.attributes.value]
//! required = true
//!
//! [blocks.resource]
//! labels = ["type", "name"]
//!
//! [blocks.resource.dependent.aws_instance.attributes.ami]
//! required = true
//! ```
//!
//! `dependent` bodies are selected by the first label of a block and replace
//! the block's generic `body`.

use std::collections::BTreeMap;
use std::path::Path;

use hclsense_ast::Block;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_SCHEMA: &str = include_str!("../schema/core.toml");

/// Errors raised while loading a schema
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Definition of a single attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSchema {
    #[serde(rename = "required")]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AttributeSchema {
    /// A required attribute
    pub fn required() -> Self {
        Self {
            is_required: true,
            description: None,
        }
    }

    /// An optional attribute
    pub fn optional() -> Self {
        Self::default()
    }
}

/// Schema of a body: its attributes and nested blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySchema {
    pub attributes: BTreeMap<String, AttributeSchema>,
    pub blocks: BTreeMap<String, BlockSchema>,
}

/// Schema of a nested block type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSchema {
    /// Label names, for documentation only
    pub labels: Vec<String>,
    /// Body used when no dependent body matches
    pub body: BodySchema,
    /// Bodies selected by the block's first label
    pub dependent: BTreeMap<String, BodySchema>,
}

impl BodySchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a schema from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a schema from a TOML file
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The schema shipped with hclsense, covering core Terraform blocks
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::from_toml_str(BUILTIN_SCHEMA)
    }

    /// Add an attribute definition
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: AttributeSchema) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Add a nested block schema
    pub fn with_block(mut self, type_name: impl Into<String>, block: BlockSchema) -> Self {
        self.blocks.insert(type_name.into(), block);
        self
    }

    /// Whether the schema declares any attribute at all
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Names of required attributes in ascending order
    pub fn required_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, attr)| attr.is_required)
            .map(|(name, _)| name.as_str())
    }

    /// Resolve the body schema of a nested block
    ///
    /// Returns `None` when the block type is not declared here.
    pub fn block_body(&self, block: &Block) -> Option<&BodySchema> {
        self.blocks
            .get(&block.type_name)
            .map(|schema| schema.body_for(block.first_label()))
    }
}

impl BlockSchema {
    /// Create a block schema with the given generic body
    pub fn new(body: BodySchema) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Add a body selected by the first label
    pub fn with_dependent(mut self, label: impl Into<String>, body: BodySchema) -> Self {
        self.dependent.insert(label.into(), body);
        self
    }

    /// Body for a block with the given first label
    pub fn body_for(&self, first_label: Option<&str>) -> &BodySchema {
        first_label
            .and_then(|label| self.dependent.get(label))
            .unwrap_or(&self.body)
    }
}
