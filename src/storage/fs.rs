//! Filesystem storage: one JSON file per document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::document::DocumentId;
use crate::storage::Storage;

/// Stores each document as `{dir}/{id}.json`.
#[derive(Debug, Clone)]
pub struct FsStorage {
    dir: PathBuf,
}

impl FsStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(id.file_name())
    }
}

impl Storage for FsStorage {
    fn load(&self, id: &DocumentId) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(id)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, id: &DocumentId, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let target = self.path_for(id);
        // Unique per call so concurrent writers never share a temp file.
        let temp = self.dir.join(format!(".{}.{}.tmp", id, Uuid::new_v4()));

        let written = (|| {
            let mut file = fs::File::create(&temp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&temp, &target)
        })();

        if written.is_err() {
            let _ = fs::remove_file(&temp);
        }
        written?;

        tracing::trace!(path = %target.display(), bytes = bytes.len(), "Document written");
        Ok(())
    }
}
