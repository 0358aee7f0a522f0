use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{debug, info};

use crate::models::resume::ResumeRecord;
use crate::storage::{decode, validate_key, RecordStore, StorageError};

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates the directory if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        info!("File store ready at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

/// Writes `bytes` to a uniquely named temp file in `dir`, then renames it over
/// `path`. Readers see either the old or the new file; overlapping writers
/// each rename their own temp file and the last rename wins.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl RecordStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<ResumeRecord>, StorageError> {
        validate_key(key)?;
        let raw = match fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(key, &raw).map(Some)
    }

    async fn save(&self, key: &str, record: &ResumeRecord) -> Result<(), StorageError> {
        validate_key(key)?;
        let raw = serde_json::to_vec_pretty(record)?;

        let path = self.path_for(key);
        let dir = self.dir.clone();
        let len = raw.len();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &target, &raw))
            .await
            .map_err(|e| io::Error::new(ErrorKind::Other, e))??;

        debug!(bytes = len, path = %path.display(), "Wrote resume record");
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
