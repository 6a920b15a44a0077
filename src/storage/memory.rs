//! In-memory storage.

use std::io;
use std::sync::Arc;

use dashmap::DashMap;

use crate::document::DocumentId;
use crate::storage::Storage;

/// Concurrent map of document id to bytes. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: Arc<DashMap<DocumentId, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, id: &DocumentId) -> io::Result<Option<Vec<u8>>> {
        Ok(self.documents.get(id).map(|entry| entry.value().clone()))
    }

    fn save(&self, id: &DocumentId, bytes: &[u8]) -> io::Result<()> {
        self.documents.insert(id.clone(), bytes.to_vec());
        Ok(())
    }
}
