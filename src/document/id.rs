//! Document identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Name of a persisted document, stored as `{id}.json`.
///
/// Construction goes through [`DocumentId::parse`], which rejects anything
/// that could escape the storage directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let reject = |reason| StoreError::InvalidDocumentId {
            id: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(reject("must not be empty"));
        }
        if raw.starts_with('.') {
            return Err(reject("must not start with '.'"));
        }
        if raw.contains(['/', '\\']) {
            return Err(reject("must not contain path separators"));
        }
        if raw.chars().any(char::is_control) {
            return Err(reject("must not contain control characters"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name used by filesystem storage.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
