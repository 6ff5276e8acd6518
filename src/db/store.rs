use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};

use crate::db::models::Database;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid database document in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed store holding the whole database as one pretty-printed JSON document.
///
/// Every read goes to disk. Writes replace the file through a temp file and a rename,
/// so readers always see a complete document.
pub struct Store {
    path: PathBuf,
    // Serializes read-modify-write sequences between requests.
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the database file with an empty user list if it does not exist yet.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if exists {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        self.write_all(&Database::default()).await?;
        tracing::info!("Created empty database at {:?}", self.path);
        Ok(())
    }

    pub async fn read_all(&self) -> Result<Database, StoreError> {
        let data = fs::read(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        serde_json::from_slice(&data).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub async fn write_all(&self, db: &Database) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(db).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.temp_path();
        let tmp_error = |source| StoreError::Io {
            path: tmp.clone(),
            source,
        };

        // Data must be on disk before the rename makes it visible.
        let mut file = fs::File::create(&tmp).await.map_err(tmp_error)?;
        file.write_all(json.as_bytes()).await.map_err(tmp_error)?;
        file.sync_all().await.map_err(tmp_error)?;
        drop(file);

        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        Ok(())
    }

    /// Held by writers for the whole read-modify-write sequence.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
