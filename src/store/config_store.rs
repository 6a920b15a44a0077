//! Named JSON configuration documents.

use std::sync::Arc;

use serde_json::Value;

use crate::document::DocumentId;
use crate::error::{Result, StoreError};
use crate::storage::Storage;
use crate::store::JsonFormat;

/// Loads and saves whole documents through a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    storage: Arc<dyn Storage>,
    format: JsonFormat,
}

impl ConfigStore {
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

    /// Load and parse a document.
    pub fn load(&self, id: &DocumentId) -> Result<Value> {
        let bytes = self
            .storage
            .load(id)?
            .ok_or_else(|| StoreError::DocumentNotFound(id.clone()))?;

        serde_json::from_slice(&bytes).map_err(|source| StoreError::MalformedDocument {
            document: id.clone(),
            source,
        })
    }

    /// Serialize and persist, replacing any existing document.
    pub fn save(&self, id: &DocumentId, value: &Value) -> Result<()> {
        let bytes = self.format.encode(value).map_err(std::io::Error::from)?;
        self.storage.save(id, &bytes)?;
        Ok(())
    }

    /// Same as [`ConfigStore::save`]: creating an existing document overwrites it.
    pub fn create(&self, id: &DocumentId, value: &Value) -> Result<()> {
        self.save(id, value)
    }
}
