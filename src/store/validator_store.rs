//! Named validator documents.

use std::sync::Arc;

use serde_json::Value;

use crate::document::DocumentId;
use crate::error::{Result, StoreError};
use crate::storage::Storage;
use crate::store::JsonFormat;
use crate::validation::{compile_full_match, ValidatorMap};

/// Loads validator maps leniently and creates them strictly.
#[derive(Debug, Clone)]
pub struct ValidatorStore {
    storage: Arc<dyn Storage>,
    format: JsonFormat,
}

impl ValidatorStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            format: JsonFormat::default(),
        }
    }

    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Load the validator for `id`.
    ///
    /// Absent, unreadable and unparseable documents all yield `None`:
    /// a broken validator never blocks an update.
    pub fn load(&self, id: &DocumentId) -> Option<ValidatorMap> {
        let bytes = match self.storage.load(id) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::warn!(validator = %id, "Validator not found, validation skipped");
                return None;
            }
            Err(e) => {
                tracing::error!(validator = %id, error = %e, "Validator unreadable, validation skipped");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::error!(validator = %id, error = %e, "Validator malformed, validation skipped");
                None
            }
        }
    }

    /// Check every pattern compiles, then persist the map.
    ///
    /// Nothing is written if any entry is rejected.
    pub fn create(&self, id: &DocumentId, body: &Value) -> Result<ValidatorMap> {
        let entries = body.as_object().ok_or_else(|| StoreError::InvalidValidatorPattern {
            parameter: String::new(),
            reason: "validator must be an object of parameter to pattern".to_string(),
        })?;

        let mut map = ValidatorMap::new();
        for (parameter, pattern) in entries {
            let pattern = pattern.as_str().ok_or_else(|| StoreError::InvalidValidatorPattern {
                parameter: parameter.clone(),
                reason: "pattern must be a string".to_string(),
            })?;

            if let Err(e) = compile_full_match(pattern) {
                tracing::error!(validator = %id, parameter = %parameter, error = %e, "Invalid regex pattern");
                return Err(StoreError::InvalidValidatorPattern {
                    parameter: parameter.clone(),
                    reason: e.to_string(),
                });
            }
            map.insert(parameter.as_str(), pattern);
        }

        let bytes = self.format.encode(&map).map_err(std::io::Error::from)?;
        self.storage.save(id, &bytes)?;
        Ok(map)
    }
}
