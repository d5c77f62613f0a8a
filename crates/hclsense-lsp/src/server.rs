//! Language server backend
//!
//! Keeps the text of open documents, validates them on open, change and
//! save, and publishes the results. Quick fixes travel inside each
//! published diagnostic's `data` and are handed back on `code_action`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, CodeActionOptions, CodeActionOrCommand, CodeActionParams,
    CodeActionProviderCapability, CodeActionResponse, Diagnostic, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DidSaveTextDocumentParams,
    InitializeParams, InitializeResult, InitializedParams, MessageType, SaveOptions,
    ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
    TextDocumentSyncOptions, TextDocumentSyncSaveOptions, Url,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use hclsense_validate::{BodySchema, ValidationEngine};

use crate::config::Settings;
use crate::convert::to_lsp_diagnostics;

/// LSP Backend state
pub struct Backend {
    /// LSP client for sending notifications
    client: Client,
    /// Validation engine built from the workspace settings
    validation_engine: Arc<RwLock<ValidationEngine>>,
    /// Schema applied to document roots
    schema: Arc<RwLock<BodySchema>>,
    /// Document store for open documents
    documents: Arc<RwLock<HashMap<Url, String>>>,
}

impl Backend {
    /// Create a new backend instance with default settings
    pub fn new(client: Client) -> Self {
        Self {
            client,
            validation_engine: Arc::new(RwLock::new(ValidationEngine::with_defaults())),
            schema: Arc::new(RwLock::new(builtin_schema())),
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store document text
    async fn store_document(&self, uri: Url, text: String) {
        let mut docs = self.documents.write().await;
        docs.insert(uri, text);
    }

    /// Get document text by URI
    async fn get_document(&self, uri: &Url) -> Option<String> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }

    /// Remove document from store
    async fn remove_document(&self, uri: &Url) {
        let mut docs = self.documents.write().await;
        docs.remove(uri);
    }

    /// Apply workspace settings found under `root`
    async fn configure(&self, root: PathBuf) {
        let settings = match Settings::load(&root) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring invalid configuration in {}: {}", root.display(), e);
                Settings::default()
            }
        };

        let schema = match settings.load_schema(&root) {
            Ok(schema) => schema,
            Err(e) => {
                warn!("Falling back to built-in schema: {}", e);
                builtin_schema()
            }
        };

        *self.validation_engine.write().await = settings.build_engine();
        *self.schema.write().await = schema;
        info!("Loaded configuration from {}", root.display());
    }

    /// Validate a document and publish diagnostics
    async fn validate(&self, uri: Url, text: &str, version: Option<i32>) {
        debug!("Validating document: {}", uri);

        let diagnostics = {
            let engine = self.validation_engine.read().await;
            let schema = self.schema.read().await;
            diagnose(&uri, text, &engine, &schema)
        };

        debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client
            .publish_diagnostics(uri, diagnostics, version)
            .await;
    }
}

/// Built-in schema, or an empty one if it fails to load
fn builtin_schema() -> BodySchema {
    BodySchema::builtin().unwrap_or_else(|e| {
        warn!("Built-in schema unavailable, validating without one: {}", e);
        BodySchema::default()
    })
}

/// Parse, validate and convert one document
///
/// A parse error is reported as a single diagnostic at the error position.
pub fn diagnose(
    uri: &Url,
    text: &str,
    engine: &ValidationEngine,
    schema: &BodySchema,
) -> Vec<Diagnostic> {
    let filename = uri.as_str();

    match hclsense_core::parse(text, filename) {
        Ok(mut file) => {
            let found = engine.validate(&mut file, Some(schema));
            to_lsp_diagnostics(Some(found.as_slice()), uri)
        }
        Err(e) => {
            debug!("Failed to parse document {}: {}", uri, e);
            let diagnostic = e.to_diagnostic(filename);
            to_lsp_diagnostics(Some(std::slice::from_ref(&diagnostic)), uri)
        }
    }
}

/// Collect the quick fixes carried by the diagnostics of a request
///
/// Each action gets the diagnostic it fixes attached. Actions whose kind
/// is not requested by `context.only` are dropped.
pub fn code_actions_for(params: &CodeActionParams) -> Vec<CodeActionOrCommand> {
    let only = params.context.only.as_deref();
    let mut actions = Vec::new();

    for diagnostic in &params.context.diagnostics {
        let Some(data) = &diagnostic.data else {
            continue;
        };
        let decoded: Vec<CodeAction> = match serde_json::from_value(data.clone()) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!("Ignoring diagnostic data that is not a code action list: {}", e);
                continue;
            }
        };

        for mut action in decoded {
            if !kind_requested(action.kind.as_ref(), only) {
                continue;
            }
            action.diagnostics = Some(vec![diagnostic.clone()]);
            actions.push(CodeActionOrCommand::CodeAction(action));
        }
    }

    actions
}

/// Whether an action kind passes an `only` filter
///
/// Kinds are hierarchical: `quickfix` also admits `quickfix.missing`.
fn kind_requested(kind: Option<&CodeActionKind>, only: Option<&[CodeActionKind]>) -> bool {
    let Some(only) = only else {
        return true;
    };
    let Some(kind) = kind else {
        return false;
    };

    only.iter().any(|wanted| {
        let wanted = wanted.as_str();
        kind.as_str() == wanted
            || kind
                .as_str()
                .strip_prefix(wanted)
                .is_some_and(|rest| rest.starts_with('.'))
    })
}

/// Workspace root announced by the client
#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri)
        .or(params.root_uri.as_ref())
        .and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("hclsense LSP server initializing");

        if let Some(root) = workspace_root(&params) {
            self.configure(root).await;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),
                code_action_provider: Some(CodeActionProviderCapability::Options(
                    CodeActionOptions {
                        code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "hclsense-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("hclsense LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "hclsense LSP server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("hclsense LSP server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        debug!("Document opened: {}", doc.uri);

        self.store_document(doc.uri.clone(), doc.text.clone()).await;
        self.validate(doc.uri, &doc.text, Some(doc.version)).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document changed: {}", uri);

        // Full sync: the last change holds the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            self.store_document(uri.clone(), change.text.clone()).await;
            self.validate(uri, &change.text, Some(params.text_document.version))
                .await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document saved: {}", uri);

        if let Some(text) = params.text {
            self.store_document(uri.clone(), text).await;
        }
        if let Some(text) = self.get_document(&uri).await {
            self.validate(uri, &text, None).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document closed: {}", uri);

        self.remove_document(&uri).await;
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = &params.text_document.uri;
        debug!("Code action request for: {}", uri);

        let actions = code_actions_for(&params);
        if actions.is_empty() {
            Ok(None)
        } else {
            debug!("Returning {} code actions for {}", actions.len(), uri);
            Ok(Some(actions))
        }
    }
}

/// Run the language server over stdin/stdout
pub async fn run_server() {
    info!(
        "Starting hclsense Language Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
