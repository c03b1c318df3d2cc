use std::fmt;
use thiserror::Error;

use crate::model::{TeamName, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("display name cannot be empty")]
    EmptyDisplayName,
}

/// Validated display name (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a validated display name.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyDisplayName` if the name is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The locally known identity of the signed-in fan.
///
/// A session either exists with every field populated or does not exist at
/// all; partial identities never escape the storage layer. `points` is the
/// one eventually-consistent field: it is overwritten with whatever the
/// backend most recently reported, never computed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    display_name: DisplayName,
    team: TeamName,
    points: u64,
}

impl Session {
    /// A freshly registered session starts with zero points.
    #[must_use]
    pub fn new(user_id: UserId, display_name: DisplayName, team: TeamName) -> Self {
        Self {
            user_id,
            display_name,
            team,
            points: 0,
        }
    }

    /// Rehydrate a session restored from storage.
    #[must_use]
    pub fn from_parts(
        user_id: UserId,
        display_name: DisplayName,
        team: TeamName,
        points: u64,
    ) -> Self {
        Self {
            user_id,
            display_name,
            team,
            points,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    #[must_use]
    pub fn team(&self) -> &TeamName {
        &self.team
    }

    #[must_use]
    pub fn points(&self) -> u64 {
        self.points
    }

    /// Overwrite the point total with the backend's latest word.
    pub fn set_points(&mut self, points: u64) {
        self.points = points;
    }

    /// Switch the declared team affinity.
    pub fn set_team(&mut self, team: TeamName) {
        self.team = team;
    }
}
