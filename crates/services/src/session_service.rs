use std::sync::Arc;

use fanpulse_core::model::{DisplayName, Session, TeamName, UserId};
use storage::{SessionRecord, SessionStore};

use crate::api::{FanApi, NewFanProfile};
use crate::error::SessionServiceError;

/// Single source of truth for who is using this client, durable across
/// restarts.
///
/// Network-backed operations write storage only after the backend has
/// confirmed, and every write is a full replacement of the persisted
/// record, so a failure at any point leaves both the in-memory session and
/// the stored copy exactly as they were.
pub struct SessionService {
    api: Arc<dyn FanApi>,
    store: Arc<dyn SessionStore>,
    current: Option<Session>,
}

impl SessionService {
    #[must_use]
    pub fn new(api: Arc<dyn FanApi>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            current: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Restore the persisted session, if a valid one exists.
    ///
    /// Never fails: a missing, malformed, or partial stored record means
    /// signed out; the worst case is asking the fan to sign in again.
    pub async fn restore(&mut self) -> Option<&Session> {
        match self.store.load().await {
            Ok(Some(record)) => match record.into_session() {
                Some(session) => self.current = Some(session),
                None => log::warn!("stored session record is incomplete; treating as signed out"),
            },
            Ok(None) => {}
            Err(err) => log::warn!("could not read stored session: {err}"),
        }
        self.current.as_ref()
    }

    /// Register a new profile with the backend and adopt it as the current
    /// session.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty display name or unknown
    /// team without touching the network. Backend and storage failures
    /// leave the previous session (in memory and on disk) untouched.
    pub async fn establish(
        &mut self,
        display_name: &str,
        team: &str,
    ) -> Result<&Session, SessionServiceError> {
        let display_name = DisplayName::new(display_name)?;
        let team = TeamName::new(team)?;
        let user_id = UserId::mint();

        let profile = NewFanProfile {
            user_id: user_id.as_str().to_string(),
            display_name: display_name.as_str().to_string(),
            team: team.as_str().to_string(),
        };
        self.api.register(&profile).await?;

        let session = Session::new(user_id, display_name, team);
        self.store
            .save(&SessionRecord::from_session(&session))
            .await?;
        Ok(self.current.insert(session))
    }

    /// Drop the current identity and remove the persisted copy.
    ///
    /// The in-memory session is gone even if removing the stored copy
    /// fails; signing out is not allowed to be blocked by storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Storage` when the persisted copy could
    /// not be removed.
    pub async fn clear(&mut self) -> Result<(), SessionServiceError> {
        self.current = None;
        self.store.clear().await?;
        Ok(())
    }

    /// Re-fetch the authoritative point total and overwrite the local one.
    ///
    /// Point totals are eventually consistent by design: whatever the
    /// backend reported most recently wins, with no ordering guarantee
    /// between refreshes.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::SignedOut` with no session, and
    /// propagates API/storage failures without touching the session.
    pub async fn refresh_points(&mut self) -> Result<u64, SessionServiceError> {
        let Some(session) = self.current.as_ref() else {
            return Err(SessionServiceError::SignedOut);
        };
        let issued_for = session.user_id().clone();
        let summary = self.api.fetch_user(&issued_for).await?;
        self.apply_points(&issued_for, summary.points).await
    }

    /// Apply a fetched point total, provided `issued_for` is still the
    /// signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Superseded` when the session was
    /// replaced or cleared after the request was issued; the stale total is
    /// dropped instead of overwriting the newer identity's state.
    pub async fn apply_points(
        &mut self,
        issued_for: &UserId,
        points: u64,
    ) -> Result<u64, SessionServiceError> {
        let Some(session) = self.current.as_ref() else {
            log::debug!("dropping points refresh for {issued_for}: signed out");
            return Err(SessionServiceError::Superseded);
        };
        if session.user_id() != issued_for {
            log::debug!("dropping points refresh for {issued_for}: session replaced");
            return Err(SessionServiceError::Superseded);
        }

        let mut updated = session.clone();
        updated.set_points(points);
        self.store
            .save(&SessionRecord::from_session(&updated))
            .await?;
        self.current = Some(updated);
        Ok(points)
    }

    /// Switch the declared team affinity and persist the change.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown team,
    /// `SessionServiceError::SignedOut` with no session, or a storage
    /// error; in every case the previous session stands.
    pub async fn adopt_team(&mut self, team: &str) -> Result<(), SessionServiceError> {
        let team = TeamName::new(team)?;
        let Some(session) = self.current.as_ref() else {
            return Err(SessionServiceError::SignedOut);
        };

        let mut updated = session.clone();
        updated.set_team(team);
        self.store
            .save(&SessionRecord::from_session(&updated))
            .await?;
        self.current = Some(updated);
        Ok(())
    }
}
