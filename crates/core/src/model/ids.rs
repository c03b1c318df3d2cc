use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a fan profile.
///
/// Minted on the client right before registration and treated as
/// externally assigned from then on.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Mint a fresh id for a profile about to be registered.
    #[must_use]
    pub fn mint() -> Self {
        Self(format!("user_{}", Uuid::new_v4().simple()))
    }

    /// Wrap an id restored from storage or received from the backend.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_unique_and_prefixed() {
        let a = UserId::mint();
        let b = UserId::mint();
        assert!(a.as_str().starts_with("user_"));
        assert_ne!(a, b);
    }
}
