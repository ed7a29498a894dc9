//! Error types for the CSV-to-Secrets-Manager pipeline.
//!
//! Every variant aborts the whole run; there is no retry and no rollback of
//! secrets already created when a later one fails.

use std::path::PathBuf;
use thiserror::Error;

/// A reason a decoded record is not worth a remote call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidRecord {
    #[error("empty secret name")]
    EmptyName,

    #[error("empty secret value")]
    EmptyValue,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("input file missing")]
    MissingInput,

    #[error("open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv header missing {column:?} column")]
    MissingColumn { column: &'static str },

    #[error("csv read")]
    Csv(#[from] csv::Error),

    #[error("line {line}: row too short")]
    ShortRow { line: u64 },

    #[error("line {line}")]
    Validation {
        line: u64,
        #[source]
        source: InvalidRecord,
    },

    #[error("file has no secrets")]
    NoSecrets,

    #[error("create secret {name:?}")]
    Publish {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("encode task definition record")]
    Json(#[from] serde_json::Error),
}
