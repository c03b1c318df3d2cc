use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use fanpulse_core::model::{Difficulty, Question};

/// Registration payload for a brand-new fan profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFanProfile {
    pub user_id: String,
    #[serde(rename = "username")]
    pub display_name: String,
    #[serde(rename = "favorite_team")]
    pub team: String,
}

/// Authoritative profile summary, re-fetched whenever the header or
/// dashboard needs fresh numbers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "total_points", default)]
    pub points: u64,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(rename = "favorite_team", default)]
    pub team: Option<String>,
}

/// One completed quiz attempt, as the dashboard lists them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizHistoryEntry {
    pub team: String,
    #[serde(rename = "level")]
    pub difficulty: Difficulty,
    pub correct: u32,
    pub total: u32,
}

/// One recorded pick, resolved or still pending.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PredictionRecord {
    pub team1: String,
    pub team2: String,
    #[serde(rename = "user_prediction")]
    pub pick: String,
    #[serde(rename = "system_outcome", default)]
    pub outcome: Option<String>,
    #[serde(rename = "is_correct", default)]
    pub correct: Option<bool>,
    #[serde(default)]
    pub points_earned: u64,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PredictionRecord {
    /// A pick is pending until the backend reports an outcome for it.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.outcome.as_deref().is_some_and(|o| !o.is_empty())
    }
}

/// Saved quiz progress for one team.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TeamProgress {
    #[serde(default)]
    pub has_progress: bool,
    #[serde(default)]
    pub current_level: Option<Difficulty>,
    #[serde(default)]
    pub team_points: u64,
}

/// Outcome of a quiz generation request.
///
/// A drained pool is an expected outcome with its own recovery path (the
/// pool reset), so it is a variant here rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizBatch {
    Success {
        questions: Vec<Question>,
    },
    QuestionsExhausted {
        #[serde(default)]
        total_asked: u32,
        #[serde(default)]
        total_available: u32,
    },
}

/// A completed attempt, as sent for scoring.
///
/// The full question set rides along so the server can correlate each
/// answer without any client-side question ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSubmission {
    pub user_id: String,
    pub team: String,
    #[serde(rename = "level")]
    pub difficulty: Difficulty,
    pub answers: BTreeMap<usize, String>,
    pub questions: Vec<Question>,
}

/// The server's verdict on a single question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionReview {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// The server's verdict on a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizScore {
    #[serde(rename = "level")]
    pub difficulty: Difficulty,
    pub correct: u32,
    pub total: u32,
    pub points_earned: u64,
    #[serde(default)]
    pub points_per_question: u64,
    #[serde(default)]
    pub total_points: u64,
    pub results: Vec<QuestionReview>,
    #[serde(default)]
    pub next_level: Option<Difficulty>,
}

/// Confirmation that a drained question pool was reset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoolResetReceipt {
    pub message: String,
}

/// A validated pick, flattened to the wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionSubmission {
    pub user_id: String,
    pub sport: String,
    pub team1: String,
    pub team2: String,
    #[serde(rename = "user_prediction")]
    pub pick: String,
}

/// The backend's response to a recorded pick. The outcome may already be
/// known, or still pending resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PredictionReceipt {
    #[serde(rename = "user_prediction", default)]
    pub pick: Option<String>,
    #[serde(rename = "system_outcome", default)]
    pub outcome: Option<String>,
    #[serde(rename = "is_correct", default)]
    pub correct: Option<bool>,
    #[serde(default)]
    pub points_earned: u64,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Aggregate pick accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct PredictionStats {
    #[serde(default)]
    pub total_predictions: u64,
    #[serde(default)]
    pub correct_predictions: u64,
    #[serde(default)]
    pub total_points: u64,
}

impl PredictionStats {
    /// Accuracy as a percentage; zero when nothing has been predicted yet.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_predictions == 0 {
            return 0.0;
        }
        self.correct_predictions as f64 / self.total_predictions as f64 * 100.0
    }
}

/// One raw ranking row. `badge_count` is optional on the wire; the client
/// derives a medal count from points when the backend omits it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    #[serde(rename = "username")]
    pub display_name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub badge_count: Option<u32>,
}

/// The assistant's answer to a free-text message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}
