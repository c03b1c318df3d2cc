use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;

use fanpulse_core::model::{Difficulty, TeamName, UserId};

use crate::api::types::{
    ChatReply, LeaderboardEntry, NewFanProfile, PoolResetReceipt, PredictionReceipt,
    PredictionRecord, PredictionStats, PredictionSubmission, QuizBatch, QuizHistoryEntry,
    QuizScore, QuizSubmission, TeamProgress, UserSummary,
};
use crate::api::FanApi;
use crate::error::ApiError;

/// Calls observed by a [`ScriptedFanApi`], in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Register(NewFanProfile),
    FetchUser(String),
    QuizHistory(String),
    PredictionHistory(String),
    TeamProgress {
        user: String,
        team: String,
    },
    GenerateQuiz {
        user: String,
        team: String,
        difficulty: Difficulty,
    },
    SubmitQuiz(QuizSubmission),
    ResetQuestionPool {
        user: String,
        team: String,
    },
    SubmitPrediction(PredictionSubmission),
    PredictionStats(String),
    Leaderboard {
        limit: usize,
    },
    Chat {
        user: String,
        message: String,
    },
}

#[derive(Default)]
struct Script {
    register: VecDeque<Result<(), ApiError>>,
    fetch_user: VecDeque<Result<UserSummary, ApiError>>,
    quiz_history: VecDeque<Result<Vec<QuizHistoryEntry>, ApiError>>,
    prediction_history: VecDeque<Result<Vec<PredictionRecord>, ApiError>>,
    team_progress: VecDeque<Result<TeamProgress, ApiError>>,
    generate_quiz: VecDeque<Result<QuizBatch, ApiError>>,
    submit_quiz: VecDeque<Result<QuizScore, ApiError>>,
    reset_pool: VecDeque<Result<PoolResetReceipt, ApiError>>,
    submit_prediction: VecDeque<Result<PredictionReceipt, ApiError>>,
    prediction_stats: VecDeque<Result<PredictionStats, ApiError>>,
    leaderboard: VecDeque<Result<Vec<LeaderboardEntry>, ApiError>>,
    chat: VecDeque<Result<ChatReply, ApiError>>,
}

/// Scripted in-memory backend for tests and prototyping.
///
/// Responses are queued per operation and consumed in order. When a queue
/// is empty, read operations fall back to an empty/default payload,
/// `register` succeeds, and `chat` echoes; the quiz mutations
/// (`generate_quiz`, `submit_quiz`, `reset_question_pool`) and
/// `submit_prediction` must be scripted explicitly and reject otherwise.
/// Every call is recorded so tests can assert exactly what did (and did
/// not) go over the wire.
#[derive(Default)]
pub struct ScriptedFanApi {
    script: Mutex<Script>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedFanApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call observed so far, in issue order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls observed so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn script_register(&self, result: Result<(), ApiError>) {
        self.push(|s| s.register.push_back(result));
    }

    pub fn script_fetch_user(&self, result: Result<UserSummary, ApiError>) {
        self.push(|s| s.fetch_user.push_back(result));
    }

    pub fn script_quiz_history(&self, result: Result<Vec<QuizHistoryEntry>, ApiError>) {
        self.push(|s| s.quiz_history.push_back(result));
    }

    pub fn script_prediction_history(&self, result: Result<Vec<PredictionRecord>, ApiError>) {
        self.push(|s| s.prediction_history.push_back(result));
    }

    pub fn script_team_progress(&self, result: Result<TeamProgress, ApiError>) {
        self.push(|s| s.team_progress.push_back(result));
    }

    pub fn script_generate_quiz(&self, result: Result<QuizBatch, ApiError>) {
        self.push(|s| s.generate_quiz.push_back(result));
    }

    pub fn script_submit_quiz(&self, result: Result<QuizScore, ApiError>) {
        self.push(|s| s.submit_quiz.push_back(result));
    }

    pub fn script_reset_pool(&self, result: Result<PoolResetReceipt, ApiError>) {
        self.push(|s| s.reset_pool.push_back(result));
    }

    pub fn script_submit_prediction(&self, result: Result<PredictionReceipt, ApiError>) {
        self.push(|s| s.submit_prediction.push_back(result));
    }

    pub fn script_prediction_stats(&self, result: Result<PredictionStats, ApiError>) {
        self.push(|s| s.prediction_stats.push_back(result));
    }

    pub fn script_leaderboard(&self, result: Result<Vec<LeaderboardEntry>, ApiError>) {
        self.push(|s| s.leaderboard.push_back(result));
    }

    pub fn script_chat(&self, result: Result<ChatReply, ApiError>) {
        self.push(|s| s.chat.push_back(result));
    }

    fn push(&self, apply: impl FnOnce(&mut Script)) {
        if let Ok(mut script) = self.script.lock() {
            apply(&mut script);
        }
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn take<T>(
        &self,
        pick: impl FnOnce(&mut Script) -> Option<Result<T, ApiError>>,
    ) -> Option<Result<T, ApiError>> {
        match self.script.lock() {
            Ok(mut script) => pick(&mut script),
            Err(poisoned) => Some(Err(ApiError::Rejected {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                reason: poisoned.to_string(),
            })),
        }
    }

    fn not_scripted(operation: &'static str) -> ApiError {
        ApiError::Rejected {
            status: StatusCode::NOT_IMPLEMENTED,
            reason: format!("no scripted response for {operation}"),
        }
    }
}

#[async_trait]
impl FanApi for ScriptedFanApi {
    async fn register(&self, profile: &NewFanProfile) -> Result<(), ApiError> {
        self.record(RecordedCall::Register(profile.clone()));
        self.take(|s| s.register.pop_front()).unwrap_or(Ok(()))
    }

    async fn fetch_user(&self, user: &UserId) -> Result<UserSummary, ApiError> {
        self.record(RecordedCall::FetchUser(user.as_str().to_string()));
        self.take(|s| s.fetch_user.pop_front())
            .unwrap_or_else(|| Ok(UserSummary::default()))
    }

    async fn quiz_history(&self, user: &UserId) -> Result<Vec<QuizHistoryEntry>, ApiError> {
        self.record(RecordedCall::QuizHistory(user.as_str().to_string()));
        self.take(|s| s.quiz_history.pop_front())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn prediction_history(&self, user: &UserId) -> Result<Vec<PredictionRecord>, ApiError> {
        self.record(RecordedCall::PredictionHistory(user.as_str().to_string()));
        self.take(|s| s.prediction_history.pop_front())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn team_progress(
        &self,
        user: &UserId,
        team: &TeamName,
    ) -> Result<TeamProgress, ApiError> {
        self.record(RecordedCall::TeamProgress {
            user: user.as_str().to_string(),
            team: team.as_str().to_string(),
        });
        self.take(|s| s.team_progress.pop_front())
            .unwrap_or_else(|| Ok(TeamProgress::default()))
    }

    async fn generate_quiz(
        &self,
        user: &UserId,
        team: &TeamName,
        difficulty: Difficulty,
    ) -> Result<QuizBatch, ApiError> {
        self.record(RecordedCall::GenerateQuiz {
            user: user.as_str().to_string(),
            team: team.as_str().to_string(),
            difficulty,
        });
        self.take(|s| s.generate_quiz.pop_front())
            .unwrap_or_else(|| Err(Self::not_scripted("generate_quiz")))
    }

    async fn submit_quiz(&self, submission: &QuizSubmission) -> Result<QuizScore, ApiError> {
        self.record(RecordedCall::SubmitQuiz(submission.clone()));
        self.take(|s| s.submit_quiz.pop_front())
            .unwrap_or_else(|| Err(Self::not_scripted("submit_quiz")))
    }

    async fn reset_question_pool(
        &self,
        user: &UserId,
        team: &TeamName,
    ) -> Result<PoolResetReceipt, ApiError> {
        self.record(RecordedCall::ResetQuestionPool {
            user: user.as_str().to_string(),
            team: team.as_str().to_string(),
        });
        self.take(|s| s.reset_pool.pop_front())
            .unwrap_or_else(|| Err(Self::not_scripted("reset_question_pool")))
    }

    async fn submit_prediction(
        &self,
        submission: &PredictionSubmission,
    ) -> Result<PredictionReceipt, ApiError> {
        self.record(RecordedCall::SubmitPrediction(submission.clone()));
        self.take(|s| s.submit_prediction.pop_front())
            .unwrap_or_else(|| Err(Self::not_scripted("submit_prediction")))
    }

    async fn prediction_stats(&self, user: &UserId) -> Result<PredictionStats, ApiError> {
        self.record(RecordedCall::PredictionStats(user.as_str().to_string()));
        self.take(|s| s.prediction_stats.pop_front())
            .unwrap_or_else(|| Ok(PredictionStats::default()))
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.record(RecordedCall::Leaderboard { limit });
        self.take(|s| s.leaderboard.pop_front())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn chat(&self, user: &UserId, message: &str) -> Result<ChatReply, ApiError> {
        self.record(RecordedCall::Chat {
            user: user.as_str().to_string(),
            message: message.to_string(),
        });
        self.take(|s| s.chat.pop_front()).unwrap_or_else(|| {
            Ok(ChatReply {
                response: format!("(echo) {message}"),
            })
        })
    }
}
