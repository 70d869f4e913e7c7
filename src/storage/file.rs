//! FileKeyValueStore - one file per key under a data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;

use super::{KeyValueStore, StorageError};

/// Distinguishes temp files of writes in flight at the same time.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Durable adapter storing each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling first, are flushed to disk, and are then
/// renamed into place, so a reader sees either the previous blob or the new
/// one, never a torn file. A failed write removes its temporary file.
/// Keys are limited to ASCII letters, digits, `.`, `_` and `-`, and may not
/// start with a dot.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Use `dir` as the data directory. The directory is created lazily by
    /// [`FileKeyValueStore::ensure_dir`] or on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the data directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Io {
                key: self.dir.display().to_string(),
                source,
            })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self.dir.join(format!(".{}.{}.tmp", key, seq));
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        self.ensure_dir().await?;
        let written = match write_synced(&tmp, value.as_bytes()).await {
            Ok(()) => tokio::fs::rename(&tmp, &path).await,
            Err(err) => Err(err),
        };
        if let Err(source) = written {
            if let Err(err) = tokio::fs::remove_file(&tmp).await {
                if err.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %tmp.display(), error = %err, "failed to remove temp file");
                }
            }
            return Err(io_err(source));
        }
        Ok(())
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
