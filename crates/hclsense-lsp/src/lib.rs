//! hclsense Language Server Protocol implementation
//!
//! This library provides LSP support for HCL and Terraform files:
//! - Diagnostics for missing required attributes, driven by a body schema
//! - Quick fixes that insert the missing attributes
//! - Workspace configuration through `hclsense.toml`
//!
//! # Library Usage
//!
//! ```ignore
//! use hclsense_lsp::run_server;
//!
//! // Run the LSP server
//! run_server().await;
//! ```
//!
//! The pieces are usable without a client as well:
//!
//! ```
//! use hclsense_lsp::{diagnose, Settings};
//! use hclsense_validate::BodySchema;
//! use tower_lsp::lsp_types::Url;
//!
//! let uri = Url::parse("file:///project/main.tf").unwrap();
//! let engine = Settings::default().build_engine();
//! let diagnostics = diagnose(&uri, "module \"vpc\" {\n}\n", &engine, &BodySchema::builtin().unwrap());
//! assert_eq!(diagnostics.len(), 1);
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the language server (typically called by an editor)
//! hclsense-lsp
//!
//! # With debug logging
//! RUST_LOG=debug hclsense-lsp
//! ```

pub mod config;
pub mod convert;
pub mod server;

// Re-export main entry point
pub use server::{diagnose, run_server, Backend};

// Re-export commonly used types
pub use config::{ConfigError, Settings};
pub use convert::{to_lsp_code_action, to_lsp_code_actions, to_lsp_diagnostics};
