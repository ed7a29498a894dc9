//! CSV reading: header-driven column mapping and row decoding.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::error::Error;
use crate::record::SecretRecord;

/// Fixed-position field slots, resolved once from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    name: usize,
    value: usize,
    description: Option<usize>,
}

impl ColumnMap {
    /// Match header cells against the recognized column names, in any order
    /// and ignoring case. Unrecognized columns are skipped; on a duplicate
    /// the first occurrence wins.
    fn from_header(header: &StringRecord) -> Result<Self, Error> {
        let mut name = None;
        let mut value = None;
        let mut description = None;
        for (idx, column) in header.iter().enumerate() {
            let slot = match column.to_ascii_lowercase().as_str() {
                "name" => &mut name,
                "value" => &mut value,
                "description" => &mut description,
                _ => continue,
            };
            slot.get_or_insert(idx);
        }
        Ok(Self {
            name: name.ok_or(Error::MissingColumn { column: "name" })?,
            value: value.ok_or(Error::MissingColumn { column: "value" })?,
            description,
        })
    }

    /// `None` when the row is too short to hold a required slot.
    fn decode(&self, row: &StringRecord) -> Option<SecretRecord> {
        Some(SecretRecord {
            name: row.get(self.name)?.to_string(),
            value: row.get(self.value)?.to_string(),
            description: self
                .description
                .and_then(|idx| row.get(idx))
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// Read and validate every secret in the file, preserving file order.
///
/// An empty result means the file held a header but no data rows; the caller
/// decides what that means. All other problems abort with an error carrying
/// the 1-based line number where available.
pub fn read_secrets(path: &Path) -> Result<Vec<SecretRecord>, Error> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);
    let columns = ColumnMap::from_header(reader.headers()?)?;

    let mut secrets = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let secret = columns.decode(&row).ok_or(Error::ShortRow { line })?;
        secret
            .validate()
            .map_err(|source| Error::Validation { line, source })?;
        debug!(name = %secret.name, line, "parsed secret");
        secrets.push(secret);
    }
    Ok(secrets)
}
