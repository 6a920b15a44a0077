//! Parsing of `document/seg1/.../segN` addressing strings.

use crate::document::{DocumentId, FieldPath};
use crate::error::StoreError;

/// A document id plus a field path inside that document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    document: DocumentId,
    field_path: FieldPath,
}

impl Address {
    /// Split on `/`: the first part names the document, the rest is the path.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let mut parts = raw.split('/');
        let document = parts.next().unwrap_or_default();
        let field_path = FieldPath::new(parts.map(str::to_string).collect())
            .ok_or_else(|| StoreError::MalformedAddress(raw.to_string()))?;

        Ok(Self {
            document: DocumentId::parse(document)?,
            field_path,
        })
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn field_path(&self) -> &FieldPath {
        &self.field_path
    }

    /// Name of the parameter being addressed (the last path segment).
    pub fn parameter(&self) -> &str {
        self.field_path.last()
    }
}
