use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::repository::{SessionRecord, SessionStore, StorageError};

/// File-backed session store: one JSON document at a well-known path.
///
/// Saves write a sibling temp file and rename it over the target, so the
/// record on disk is always either the previous version or the new one in
/// full, never a torn mix. A missing or unparseable file loads as "no
/// session" rather than an error, because losing the cached identity is
/// recoverable (the fan signs in again) while refusing to start is not.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory (`fanpulse/session.json`).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` when the platform reports no data
    /// directory.
    pub fn at_default_location() -> Result<Self, StorageError> {
        let base = dirs::data_dir()
            .ok_or_else(|| StorageError::Io("no platform data directory".to_string()))?;
        Ok(Self::new(base.join("fanpulse").join("session.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };

        match serde_json::from_slice::<SessionRecord>(&bytes) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                log::warn!(
                    "discarding unparseable session record at {}: {err}",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::Io(err.to_string()))?;
        }

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, &bytes)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }
}
