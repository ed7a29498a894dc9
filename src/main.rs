//! Command aws-add-secrets loads secrets from a CSV file into AWS Secrets
//! Manager.
//!
//! The CSV file must have a header row naming a `name` and a `value` column
//! (plus an optional `description`). Each secret's ARN is printed on its own
//! line, or a JSON record per secret with the `--env` flag.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aws_add_secrets::cli::{self, Cli};

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries only the ARN / JSON output lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli::execute(cli).await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
