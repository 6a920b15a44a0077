//! Request and outcome types for service operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{DocumentId, FieldPath};
use crate::validation::ValidationStatus;

/// Body of an update request. Both fields are required at runtime;
/// a JSON `null` value counts as missing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl UpdateRequest {
    pub fn new(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: Some(path.into()),
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    pub document: DocumentId,
    pub parameter: FieldPath,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub document: DocumentId,
    pub parameter: FieldPath,
    pub value: Value,
    pub validation: ValidationStatus,
}
