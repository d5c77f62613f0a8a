//! Library integration tests for hclsense-lsp
//!
//! These tests drive the full pipeline the server runs for a document:
//! parse, validate against the schema, convert, and serve quick fixes.

use std::fs;

use hclsense_core::diagnostics::{Diagnostic as HclDiagnostic, Fix, TextEdit as HclTextEdit};
use hclsense_ast::{Pos, Range as HclRange};
use hclsense_lsp::server::code_actions_for;
use hclsense_lsp::{diagnose, to_lsp_diagnostics, Settings};
use hclsense_validate::BodySchema;
use tower_lsp::lsp_types::{
    CodeActionContext, CodeActionOrCommand, CodeActionParams, PartialResultParams, Position,
    Range, TextDocumentIdentifier, Url, WorkDoneProgressParams,
};

const MAIN_TF: &str = r#"provider "aws" {
  region = "eu-west-1"
}

resource "aws_instance" "web" {
  tags = {
    Name = "web"
  }
}

output "ip" {
  value = aws_instance.web.public_ip
}
"#;

fn main_uri() -> Url {
    Url::parse("file:///project/main.tf").unwrap()
}

fn request(uri: Url, diagnostics: Vec<tower_lsp::lsp_types::Diagnostic>) -> CodeActionParams {
    CodeActionParams {
        text_document: TextDocumentIdentifier { uri },
        range: Range::default(),
        context: CodeActionContext {
            diagnostics,
            only: None,
            trigger_kind: None,
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
    }
}

#[test]
fn test_diagnose_document() {
    let engine = Settings::default().build_engine();
    let diagnostics = diagnose(&main_uri(), MAIN_TF, &engine, &BodySchema::builtin().unwrap());

    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Required attribute \"ami\" not specified: An attribute named \"ami\" is required here",
            "Required attribute \"instance_type\" not specified: An attribute named \"instance_type\" is required here",
        ]
    );

    // Both point at the resource body: `{` on line 5 through `}` on line 9
    for diag in &diagnostics {
        assert_eq!(diag.range.start, Position::new(4, 30));
        assert_eq!(diag.range.end, Position::new(8, 1));
        assert_eq!(diag.source.as_deref(), Some("file:///project/main.tf"));
    }
}

#[test]
fn test_code_actions_for_published_diagnostics() {
    let engine = Settings::default().build_engine();
    let diagnostics = diagnose(&main_uri(), MAIN_TF, &engine, &BodySchema::builtin().unwrap());

    let actions = code_actions_for(&request(main_uri(), diagnostics));
    assert_eq!(actions.len(), 2);

    let texts: Vec<String> = actions
        .iter()
        .map(|action| match action {
            CodeActionOrCommand::CodeAction(action) => {
                let changes = action.edit.as_ref().unwrap().changes.as_ref().unwrap();
                let edit = &changes[&main_uri()][0];
                assert_eq!(edit.range.start, Position::new(8, 0));
                edit.new_text.clone()
            }
            CodeActionOrCommand::Command(_) => panic!("unexpected command"),
        })
        .collect();
    assert_eq!(texts, vec!["ami = null\n", "instance_type = null\n"]);
}

#[test]
fn test_fix_grouped_under_requesting_document() {
    let edit = HclTextEdit::new(HclRange::point("other.tf", Pos::new(2, 1, 10)), "x = null\n");
    let diag = HclDiagnostic::error("Missing").with_fix(Fix::quickfix("Add missing attribute", vec![edit]));

    let converted = to_lsp_diagnostics(Some(&[diag]), &main_uri());
    let actions = code_actions_for(&request(main_uri(), converted));

    let CodeActionOrCommand::CodeAction(action) = &actions[0] else {
        panic!("expected a code action");
    };
    let changes = action.edit.as_ref().unwrap().changes.as_ref().unwrap();
    assert_eq!(changes.keys().collect::<Vec<_>>(), vec![&main_uri()]);
}

#[test]
fn test_workspace_configuration() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("hclsense.toml"),
        "[schema]\npath = \"rules.toml\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("rules.toml"),
        "[blocks.service.body.attributes.port]\nrequired = true\n",
    )
    .unwrap();

    let settings = Settings::load(dir.path()).unwrap();
    let schema = settings.load_schema(dir.path()).unwrap();
    let engine = settings.build_engine();

    let uri = Url::from_file_path(dir.path().join("app.hcl")).unwrap();
    let diagnostics = diagnose(&uri, "service \"api\" {\n  host = \"localhost\"\n}\n", &engine, &schema);

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("\"port\""));
}

#[test]
fn test_disabled_validation_publishes_empty_list() {
    let settings = Settings::from_toml_str("[validation]\nenabled = false\n").unwrap();
    let diagnostics = diagnose(
        &main_uri(),
        MAIN_TF,
        &settings.build_engine(),
        &BodySchema::builtin().unwrap(),
    );
    assert!(diagnostics.is_empty());
}
