//! Typed client for the fan-engagement backend.
//!
//! Every non-trivial decision (question generation, scoring, outcome
//! resolution, badge awards, persistence) lives behind this interface.
//! The client consumes it through `FanApi` so the whole service layer can
//! run against the scripted in-memory backend in tests.

pub mod http;
pub mod scripted;
mod types;

pub use http::HttpFanApi;
pub use scripted::{RecordedCall, ScriptedFanApi};
pub use types::{
    ChatReply, LeaderboardEntry, NewFanProfile, PoolResetReceipt, PredictionReceipt,
    PredictionRecord, PredictionStats, PredictionSubmission, QuestionReview, QuizBatch,
    QuizHistoryEntry, QuizScore, QuizSubmission, TeamProgress, UserSummary,
};

use async_trait::async_trait;

use fanpulse_core::model::{Difficulty, TeamName, UserId};

use crate::error::ApiError;

/// The backend operations this client depends on.
///
/// Every method is a suspension point: it either yields the typed payload
/// or a recoverable [`ApiError`], and never mutates client state itself.
#[async_trait]
pub trait FanApi: Send + Sync {
    /// Mint and persist a new fan profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend cannot be reached or rejects
    /// the profile.
    async fn register(&self, profile: &NewFanProfile) -> Result<(), ApiError>;

    /// Refresh the authoritative profile summary (points, badges, team).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn fetch_user(&self, user: &UserId) -> Result<UserSummary, ApiError>;

    /// Completed quiz attempts, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn quiz_history(&self, user: &UserId) -> Result<Vec<QuizHistoryEntry>, ApiError>;

    /// Recorded picks, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn prediction_history(&self, user: &UserId) -> Result<Vec<PredictionRecord>, ApiError>;

    /// Saved progress for one team (resume state).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn team_progress(&self, user: &UserId, team: &TeamName)
    -> Result<TeamProgress, ApiError>;

    /// Fetch a question set, or learn the pool has run dry.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure; a drained pool
    /// is the `QuizBatch::QuestionsExhausted` variant, not an error.
    async fn generate_quiz(
        &self,
        user: &UserId,
        team: &TeamName,
        difficulty: Difficulty,
    ) -> Result<QuizBatch, ApiError>;

    /// Score a completed attempt.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure; the attempt is
    /// preserved client-side for a retry.
    async fn submit_quiz(&self, submission: &QuizSubmission) -> Result<QuizScore, ApiError>;

    /// Clear a drained question pool so the team can be replayed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn reset_question_pool(
        &self,
        user: &UserId,
        team: &TeamName,
    ) -> Result<PoolResetReceipt, ApiError>;

    /// Record a match pick.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn submit_prediction(
        &self,
        submission: &PredictionSubmission,
    ) -> Result<PredictionReceipt, ApiError>;

    /// Aggregate pick accuracy for one fan.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn prediction_stats(&self, user: &UserId) -> Result<PredictionStats, ApiError>;

    /// The ranking, capped at `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ApiError>;

    /// One free-text assistant exchange.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    async fn chat(&self, user: &UserId, message: &str) -> Result<ChatReply, ApiError>;
}
