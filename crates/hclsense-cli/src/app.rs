//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use serde::Serialize;
use tracing::{debug, info};

use hclsense_core::diagnostics::{Diagnostic, Diagnostics};
use hclsense_core::{apply_edits, parse};
use hclsense_lsp::config::{Settings, CONFIG_FILE_NAME};
use hclsense_validate::{BodySchema, ValidationEngine};

/// File patterns checked inside directories
const FILE_PATTERNS: &[&str] = &["**/*.tf", "**/*.hcl"];

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "hclsense")]
#[command(author, version, about = "Schema-driven checks for HCL configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check HCL files for missing required attributes
    Check {
        /// Files or directories to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Schema file, overriding the configured one
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Configuration file (defaults to ./hclsense.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Insert missing attributes and rewrite the files
        #[arg(long)]
        fix: bool,
    },
}

/// Options of the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Schema file, overriding the configured one
    pub schema: Option<PathBuf>,
    /// Configuration file
    pub config: Option<PathBuf>,
    /// Apply fixes in place
    pub fix: bool,
}

/// Result of checking one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path as given or found
    pub file: String,
    /// Diagnostics left in the file
    pub diagnostics: Vec<Diagnostic>,
    /// Number of fixes written back
    #[serde(skip_serializing_if = "is_zero")]
    pub fixes_applied: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// Result of a check run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
}

impl CheckReport {
    /// Total number of errors
    pub fn error_count(&self) -> usize {
        self.diagnostics().filter(|d| d.is_error()).count()
    }

    /// Total number of warnings
    pub fn warning_count(&self) -> usize {
        self.diagnostics().filter(|d| d.is_warning()).count()
    }

    /// Check if any file has errors
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics.iter())
    }
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            inputs,
            format,
            schema,
            config,
            fix,
        } => {
            let options = CheckOptions {
                schema,
                config,
                fix,
            };
            let report = check_command(&inputs, format, &options)?;

            // Exit with error code if there are errors
            if report.has_errors() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Execute the check command and print the report
pub fn check_command(
    inputs: &[PathBuf],
    format: OutputFormat,
    options: &CheckOptions,
) -> Result<CheckReport> {
    let report = check_files(inputs, options)?;

    match format {
        OutputFormat::Json => println!("{}", render_json(&report)?),
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    Ok(report)
}

/// Check files without printing anything
pub fn check_files(inputs: &[PathBuf], options: &CheckOptions) -> Result<CheckReport> {
    let (settings, root) = load_settings(options.config.as_deref())?;

    let schema = match &options.schema {
        Some(path) => BodySchema::load(path)
            .with_context(|| format!("Failed to load schema: {}", path.display()))?,
        None => settings
            .load_schema(&root)
            .context("Failed to load configured schema")?,
    };
    let engine = settings.build_engine();

    let files = collect_inputs(inputs)?;
    info!("Checking {} file(s)", files.len());

    let mut report = CheckReport::default();
    for path in files {
        report
            .files
            .push(check_file(&path, &engine, &schema, options.fix)?);
    }

    Ok(report)
}

/// Settings and the directory relative paths in them resolve against
fn load_settings(config: Option<&Path>) -> Result<(Settings, PathBuf)> {
    match config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let settings = Settings::from_toml_str(&content)
                .with_context(|| format!("Invalid config file: {}", path.display()))?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((settings, root))
        }
        None => {
            let root = std::env::current_dir().context("Failed to get current directory")?;
            let settings = Settings::load(&root)
                .with_context(|| format!("Failed to load {}", CONFIG_FILE_NAME))?;
            Ok((settings, root))
        }
    }
}

/// Expand directories into the HCL files below them
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            for pattern in FILE_PATTERNS {
                let pattern = input.join(pattern).display().to_string();
                for entry in
                    glob(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?
                {
                    found.push(entry.context("Failed to read directory entry")?);
                }
            }
            found.sort();
            files.extend(found);
        } else if input.exists() {
            files.push(input.clone());
        } else {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    Ok(files)
}

fn check_file(path: &Path, engine: &ValidationEngine, schema: &BodySchema, fix: bool) -> Result<FileReport> {
    let filename = path.display().to_string();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", filename))?;

    let diagnostics = validate_source(&content, &filename, engine, schema);
    debug!("{}: {} diagnostic(s)", filename, diagnostics.len());

    let edits = diagnostics.fix_edits();
    if !fix || edits.is_empty() {
        return Ok(FileReport {
            file: filename,
            diagnostics: diagnostics.into_iter().collect(),
            fixes_applied: 0,
        });
    }

    let fixed = apply_edits(&content, &edits);
    fs::write(path, &fixed).with_context(|| format!("Failed to write fixed file: {}", filename))?;
    info!("Applied {} fix(es) to {}", edits.len(), filename);

    let remaining = validate_source(&fixed, &filename, engine, schema);
    Ok(FileReport {
        file: filename,
        diagnostics: remaining.into_iter().collect(),
        fixes_applied: edits.len(),
    })
}

/// Parse and validate; a parse error becomes the only diagnostic
fn validate_source(
    content: &str,
    filename: &str,
    engine: &ValidationEngine,
    schema: &BodySchema,
) -> Diagnostics {
    match parse(content, filename) {
        Ok(mut file) => Diagnostics::from(engine.validate(&mut file, Some(schema))),
        Err(e) => Diagnostics::from(vec![e.to_diagnostic(filename)]),
    }
}

/// Human-readable report
pub fn render_text(report: &CheckReport) -> String {
    let mut out = String::new();

    for file in &report.files {
        if file.fixes_applied > 0 {
            out.push_str(&format!(
                "Fixed {} issue(s) in {}\n",
                file.fixes_applied, file.file
            ));
        }
        for diag in &file.diagnostics {
            out.push_str(&format!("{}\n\n", diag));
        }
    }

    let (errors, warnings) = (report.error_count(), report.warning_count());
    if errors == 0 && warnings == 0 {
        out.push_str(&format!(
            "✓ No issues found in {} file(s)\n",
            report.files.len()
        ));
    } else {
        out.push_str(&format!(
            "Found {} error(s) and {} warning(s) in {} file(s)\n",
            errors,
            warnings,
            report.files.len()
        ));
    }

    out
}

/// JSON report for tool consumption
pub fn render_json(report: &CheckReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize diagnostics to JSON")
}
