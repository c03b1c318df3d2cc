//! Shared error types for the services crate.
//!
//! The split mirrors how failures reach the fan: validation errors are
//! synchronous and local (no request ever leaves the client), while
//! network, timeout, and server-reported failures are all recoverable
//! notices that leave client state untouched.

use reqwest::StatusCode;
use thiserror::Error;

use fanpulse_core::model::{ActiveView, PickError, QuizError, SessionError, TeamError};
use storage::StorageError;

/// Errors talking to the backend.
///
/// Always recoverable: the triggering action can simply be re-issued, and
/// no variant ever corresponds to mutated client state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    Transport(reqwest::Error),

    #[error("backend rejected the request ({status}): {reason}")]
    Rejected { status: StatusCode, reason: String },

    #[error("could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend url: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err)
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidBaseUrl(err.to_string())
    }
}

/// Errors from the session lifecycle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionServiceError {
    #[error(transparent)]
    Invalid(#[from] SessionError),

    #[error(transparent)]
    Team(#[from] TeamError),

    #[error("no fan is signed in")]
    SignedOut,

    #[error("response discarded: the session has changed since the request")]
    Superseded,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from the quiz flow state machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error("{action} is not available while the quiz flow is {state}")]
    WrongState {
        action: &'static str,
        state: &'static str,
    },

    #[error("the completed difficulty is already the maximum")]
    AtMaxDifficulty,

    #[error("no fan is signed in")]
    SignedOut,

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("response discarded: the quiz flow has moved on")]
    Superseded,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors entering a view.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ViewError {
    #[error("no initializer registered for the {0} view")]
    Unregistered(ActiveView),

    #[error("no fan is signed in")]
    SignedOut,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from the assistant chat exchange.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("no fan is signed in")]
    SignedOut,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors submitting a match pick.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PredictionError {
    #[error(transparent)]
    Pick(#[from] PickError),

    #[error("no fan is signed in")]
    SignedOut,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors bootstrapping the client against a live backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BootstrapError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
