//! Storage backends.
//!
//! # Data Flow
//! ```text
//! ConfigStore / ValidatorStore
//!     → Storage::load(id) → Option<bytes>
//!     → Storage::save(id, bytes)
//!         fs.rs:     {dir}/{id}.json, temp file + rename
//!         memory.rs: concurrent map, for tests and ephemeral deployments
//! ```
//!
//! # Design Decisions
//! - Backends move opaque bytes; JSON encoding belongs to the stores
//! - A missing document is `Ok(None)`, not an error
//! - Saves replace the whole document atomically; readers never see a torn write
//! - No locking across load and save: concurrent writers can lose updates

pub mod fs;
pub mod memory;

use std::io;

use crate::document::DocumentId;

pub use fs::FsStorage;
pub use memory::MemoryStorage;

/// Byte-level persistence for one namespace of documents.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Read the document, or `None` if it was never saved.
    fn load(&self, id: &DocumentId) -> io::Result<Option<Vec<u8>>>;

    /// Create or replace the document.
    fn save(&self, id: &DocumentId, bytes: &[u8]) -> io::Result<()>;
}
