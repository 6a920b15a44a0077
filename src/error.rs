//! Error kinds shared by the store, validation and service layers.
//!
//! Every failure is local to one operation. The HTTP layer maps each kind to
//! a status code (see `http::response`).

use thiserror::Error;

use crate::document::{DocumentId, FieldNotFound};
use crate::validation::Rejection;

/// Errors produced by document, validator and service operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request carried no usable payload.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// Addressing string lacks a document id or a field segment.
    #[error("malformed address '{0}', expected document/param1/param2")]
    MalformedAddress(String),

    /// Document id rejected at the boundary (path traversal, empty, hidden).
    #[error("invalid document id '{id}': {reason}")]
    InvalidDocumentId { id: String, reason: &'static str },

    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),

    #[error("{source} in document {document}")]
    FieldNotFound {
        document: DocumentId,
        #[source]
        source: FieldNotFound,
    },

    /// Stored bytes did not parse as JSON.
    #[error("document {document} is not valid JSON: {source}")]
    MalformedDocument {
        document: DocumentId,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for parameter '{}'", .0.parameter)]
    ValidationRejected(Rejection),

    #[error("invalid regex pattern for parameter '{parameter}': {reason}")]
    InvalidValidatorPattern { parameter: String, reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
