use thiserror::Error;

use crate::model::{PickError, QuizError, SessionError, TeamError};

/// Umbrella error for core model validation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Team(#[from] TeamError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Pick(#[from] PickError),
}
