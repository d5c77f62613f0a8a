//! Integration tests for the hclsense CLI
//!
//! These run the check command over real files in a temporary workspace.

use std::fs;
use std::path::PathBuf;

use hclsense_cli::{check_files, collect_inputs, render_json, CheckOptions};
use tempfile::TempDir;

const BROKEN: &str = r#"resource "aws_instance" "web" {
  ami = "ami-123"
}

output "ip" {
}
"#;

const CLEAN: &str = r#"variable "region" {
  default = "eu-west-1"
}
"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.tf"), BROKEN).unwrap();
    fs::create_dir(dir.path().join("modules")).unwrap();
    fs::write(dir.path().join("modules/vars.tf"), CLEAN).unwrap();
    fs::write(dir.path().join("modules/notes.txt"), "not hcl").unwrap();
    dir
}

fn options_in(dir: &TempDir) -> CheckOptions {
    // An explicit config keeps the test independent of the working directory
    let config = dir.path().join("hclsense.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    CheckOptions {
        config: Some(config),
        ..CheckOptions::default()
    }
}

#[test]
fn test_collect_inputs_expands_directories() {
    let dir = workspace();
    let files = collect_inputs(&[dir.path().to_path_buf()]).unwrap();

    assert_eq!(
        files,
        vec![dir.path().join("main.tf"), dir.path().join("modules/vars.tf")]
    );
}

#[test]
fn test_collect_inputs_missing_file() {
    let err = collect_inputs(&[PathBuf::from("/nonexistent/main.tf")]).unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}

#[test]
fn test_check_reports_missing_attributes() {
    let dir = workspace();
    let report = check_files(&[dir.path().to_path_buf()], &options_in(&dir)).unwrap();

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.error_count(), 2);
    assert!(report.has_errors());

    let summaries: Vec<&str> = report.files[0]
        .diagnostics
        .iter()
        .map(|d| d.summary.as_str())
        .collect();
    assert_eq!(
        summaries,
        vec![
            "Required attribute \"instance_type\" not specified",
            "Required attribute \"value\" not specified",
        ]
    );
    assert!(report.files[1].diagnostics.is_empty());
}

#[test]
fn test_check_fix_rewrites_file() {
    let dir = workspace();
    let mut options = options_in(&dir);
    options.fix = true;

    let main = dir.path().join("main.tf");
    let report = check_files(&[main.clone()], &options).unwrap();

    assert_eq!(report.files[0].fixes_applied, 2);
    assert!(!report.has_errors());
    assert_eq!(
        fs::read_to_string(&main).unwrap(),
        r#"resource "aws_instance" "web" {
  ami = "ami-123"
instance_type = null
}

output "ip" {
value = null
}
"#
    );
}

#[test]
fn test_check_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.tf");
    fs::write(&path, "resource \"a\" \"b\" {\n  x = 1\n").unwrap();

    let mut options = options_in(&dir);
    options.fix = true;
    let report = check_files(&[path.clone()], &options).unwrap();

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.files[0].diagnostics[0].summary, "Unclosed block");
    assert_eq!(report.files[0].fixes_applied, 0);
    // Unparseable files are never rewritten
    assert_eq!(fs::read_to_string(&path).unwrap(), "resource \"a\" \"b\" {\n  x = 1\n");
}

#[test]
fn test_check_with_custom_schema_and_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("rules.toml"),
        "[blocks.service.body.attributes.port]\nrequired = true\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("hclsense.toml"),
        "[schema]\npath = \"rules.toml\"\n",
    )
    .unwrap();
    let app = dir.path().join("app.hcl");
    fs::write(&app, "service \"api\" {\n}\n").unwrap();

    let options = CheckOptions {
        config: Some(dir.path().join("hclsense.toml")),
        ..CheckOptions::default()
    };
    let report = check_files(&[app.clone()], &options).unwrap();
    assert_eq!(report.error_count(), 1);

    // --schema wins over the configured schema
    let builtin_like = dir.path().join("empty.toml");
    fs::write(&builtin_like, "").unwrap();
    let options = CheckOptions {
        schema: Some(builtin_like),
        ..options
    };
    let report = check_files(&[app], &options).unwrap();
    assert_eq!(report.error_count(), 0);
}

#[test]
fn test_check_json_output() {
    let dir = workspace();
    let report = check_files(&[dir.path().join("main.tf")], &options_in(&dir)).unwrap();

    let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
    let diagnostics = json["files"][0]["diagnostics"].as_array().unwrap();

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0]["fixes"][0]["message"], "Add missing attribute");
    assert_eq!(diagnostics[0]["fixes"][0]["kind"], "quickfix");
    assert_eq!(diagnostics[0]["fixes"][0]["edits"][0]["new_text"], "instance_type = null\n");
}
