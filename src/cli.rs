//! Command-line surface and the run pipeline.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::error::Error;
use crate::format::OutputMode;
use crate::publisher::{self, AwsSecretsClient};
use crate::reader;
use crate::record::SecretRecord;

const CSV_HELP: &str = "The csv file must have a header row; inspected columns are \
'name', 'value', and 'description' (optional).";

#[derive(Parser)]
#[command(name = "aws-add-secrets", version)]
#[command(about = "Load secrets from a CSV file into AWS Secrets Manager")]
#[command(after_help = CSV_HELP)]
pub struct Cli {
    /// Path to the input csv file
    pub file: Option<PathBuf>,

    /// Output a json record for each secret created instead of its ARN (for
    /// an ECS task definition)
    #[arg(long)]
    pub env: bool,

    /// AWS region to create the secrets in (defaults to the SDK chain)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,
}

/// Flags resolved once at startup and passed through the pipeline by value.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub file: PathBuf,
    pub mode: OutputMode,
    pub region: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> Result<RunConfig, Error> {
        Ok(RunConfig {
            file: self.file.ok_or(Error::MissingInput)?,
            mode: if self.env {
                OutputMode::TaskDefinition
            } else {
                OutputMode::Arn
            },
            region: self.region,
        })
    }
}

/// Read the file and reject an empty secret list as a user error.
fn load_secrets(path: &Path) -> Result<Vec<SecretRecord>, Error> {
    let secrets = reader::read_secrets(path)?;
    if secrets.is_empty() {
        return Err(Error::NoSecrets);
    }
    Ok(secrets)
}

/// Run the whole pipeline: read, validate, publish, print.
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    let secrets = load_secrets(&config.file)?;
    debug!(count = secrets.len(), file = %config.file.display(), "loaded secrets");

    let store = AwsSecretsClient::new(config.region.clone()).await?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    publisher::publish_all(&store, &secrets, config.mode, &mut out).await?;
    out.flush()?;
    Ok(())
}
