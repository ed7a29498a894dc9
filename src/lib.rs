//! Library surface backing the aws-add-secrets binary.
//!
//! Exposed so the read/validate/publish/format pipeline can be exercised in
//! tests without touching AWS.

pub mod cli;
pub mod error;
pub mod format;
pub mod publisher;
pub mod reader;
pub mod record;

pub use error::Error;
pub use format::OutputMode;
pub use publisher::SecretStore;
pub use record::SecretRecord;
