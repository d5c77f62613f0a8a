//! hclsense CLI - Command-line interface library
//!
//! This library provides the `check` command: validate HCL and Terraform
//! files against a body schema, report missing required attributes, and
//! optionally insert them.
//!
//! # Library Usage
//!
//! ```ignore
//! use hclsense_cli::{check_files, CheckOptions};
//!
//! let report = check_files(&[PathBuf::from("infra/")], &CheckOptions::default())?;
//! println!("{} error(s)", report.error_count());
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Check a file or a whole directory
//! hclsense check main.tf modules/
//!
//! # JSON output for CI
//! hclsense check . --format json
//!
//! # Insert missing attributes as `name = null`
//! hclsense check . --fix
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{check_command, check_files, collect_inputs, render_json, render_text};
pub use app::{run_cli, CheckOptions, CheckReport, FileReport, OutputFormat};
