//! Configuration
//!
//! Settings are loaded from `hclsense.toml` in the workspace root:
//!
//! ```toml
//! [validation]
//! enabled = true
//! required_attributes = true
//! suppressed_blocks = ["provider"]
//!
//! [schema]
//! path = "schema/terraform.toml"
//! ```
//!
//! Every field is optional. Without a schema path the built-in schema is
//! used.

mod settings;

#[cfg(test)]
mod tests;

pub use settings::{ConfigError, SchemaSettings, Settings, ValidationSettings, CONFIG_FILE_NAME};
