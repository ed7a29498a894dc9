use crate::error::InvalidRecord;

/// One secret parsed from a CSV data row.
///
/// Built once by the reader, validated immediately, then handed to the
/// publisher unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    pub name: String,
    pub value: String,
    /// Empty when the file has no description column.
    pub description: String,
}

impl SecretRecord {
    /// Reject records missing a name or a value before any remote call is
    /// made for them.
    pub fn validate(&self) -> Result<(), InvalidRecord> {
        if self.name.is_empty() {
            return Err(InvalidRecord::EmptyName);
        }
        if self.value.is_empty() {
            return Err(InvalidRecord::EmptyValue);
        }
        Ok(())
    }
}
