use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use fanpulse_core::model::{DisplayName, Session, TeamName, UserId};

/// Errors surfaced by session storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage i/o error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the local session.
///
/// Every field is optional so that records written by older builds, or
/// damaged by a partial external edit, still deserialize; `into_session`
/// is where the all-or-nothing rule is enforced. This mirrors the domain
/// `Session` so adapters never leak storage concerns into the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionRecord {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub points: Option<u64>,
}

impl SessionRecord {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            user_id: Some(session.user_id().as_str().to_string()),
            display_name: Some(session.display_name().as_str().to_string()),
            team: Some(session.team().as_str().to_string()),
            points: Some(session.points()),
        }
    }

    /// Rehydrate the domain session, or `None` for anything less than a
    /// fully populated, valid record. A partial identity is treated as
    /// signed out, never surfaced.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        let user_id = self.user_id?;
        let display_name = DisplayName::new(self.display_name?).ok()?;
        let team = TeamName::new(self.team?).ok()?;
        let points = self.points?;
        Some(Session::from_parts(
            UserId::from_string(user_id),
            display_name,
            team,
            points,
        ))
    }
}

/// Contract for the single persisted session record.
///
/// `save` is a total replace of whatever was stored before; adapters must
/// never patch fields in place, so a reader can never observe a torn
/// record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the stored record, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for genuine i/o failures; an absent or
    /// unreadable record is `Ok(None)`.
    async fn load(&self) -> Result<Option<SessionRecord>, StorageError>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// Remove the stored record. Removing an absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record exists but cannot be removed.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    slot: Arc<Mutex<Option<SessionRecord>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-seeded record, as if a previous run had saved it.
    #[must_use]
    pub fn seeded(record: SessionRecord) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(record))),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        let guard = self.slot.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let mut guard = self.slot.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.slot.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
