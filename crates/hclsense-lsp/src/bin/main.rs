//! hclsense Language Server binary entry point
//!
//! Sets up logging to stderr (stdout carries the protocol) and calls the
//! library's `run_server()` function.

use hclsense_lsp::run_server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run_server().await;
}
