//! hclsense CLI binary entry point
//!
//! Sets up logging to stderr and calls the library's `run_cli()` function.

use anyhow::Result;
use hclsense_cli::run_cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run_cli()
}
