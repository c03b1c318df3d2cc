use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use fanpulse_core::model::{Difficulty, TeamName, UserId};

use crate::api::types::{
    ChatReply, LeaderboardEntry, NewFanProfile, PoolResetReceipt, PredictionReceipt,
    PredictionRecord, PredictionStats, PredictionSubmission, QuizBatch, QuizHistoryEntry,
    QuizScore, QuizSubmission, TeamProgress, UserSummary,
};
use crate::api::FanApi;
use crate::error::ApiError;

/// Bound on any single backend call. A request that exceeds it surfaces as
/// `ApiError::Timeout` and is handled like any other network failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `FanApi` over HTTP, matching the backend's REST routes.
pub struct HttpFanApi {
    client: Client,
    base_url: Url,
}

impl HttpFanApi {
    /// Connect to the backend at `base_url` (scheme and host, no trailing
    /// path required).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` for an unparseable or non-base
    /// URL, and `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(format!(
                "'{base_url}' cannot be used as a base url"
            )));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode_error(response: Response) -> ApiError {
        let status = response.status();
        let reason = match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                detail: Some(detail),
            }) => detail,
            _ => status.to_string(),
        };
        ApiError::Rejected { status, reason }
    }

    async fn checked(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::decode_error(response).await)
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    user_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct QuizHistoryEnvelope {
    #[serde(default)]
    quiz_history: Vec<QuizHistoryEntry>,
}

#[derive(Debug, Deserialize)]
struct PredictionHistoryEnvelope {
    #[serde(default)]
    prediction_history: Vec<PredictionRecord>,
}

#[derive(Debug, Deserialize)]
struct LeaderboardEnvelope {
    #[serde(default)]
    leaderboard: Vec<LeaderboardEntry>,
}

#[async_trait]
impl FanApi for HttpFanApi {
    async fn register(&self, profile: &NewFanProfile) -> Result<(), ApiError> {
        let url = self.endpoint(["api", "user", "create"])?;
        let response = self.client.post(url).json(profile).send().await?;
        Self::checked(response).await?;
        Ok(())
    }

    async fn fetch_user(&self, user: &UserId) -> Result<UserSummary, ApiError> {
        let url = self.endpoint(["api", "user", user.as_str()])?;
        self.get_json(url).await
    }

    async fn quiz_history(&self, user: &UserId) -> Result<Vec<QuizHistoryEntry>, ApiError> {
        let url = self.endpoint(["api", "user", user.as_str(), "history", "quizzes"])?;
        let envelope: QuizHistoryEnvelope = self.get_json(url).await?;
        Ok(envelope.quiz_history)
    }

    async fn prediction_history(&self, user: &UserId) -> Result<Vec<PredictionRecord>, ApiError> {
        let url = self.endpoint(["api", "user", user.as_str(), "history", "predictions"])?;
        let envelope: PredictionHistoryEnvelope = self.get_json(url).await?;
        Ok(envelope.prediction_history)
    }

    async fn team_progress(
        &self,
        user: &UserId,
        team: &TeamName,
    ) -> Result<TeamProgress, ApiError> {
        let url = self.endpoint(["api", "user", user.as_str(), "progress", team.as_str()])?;
        self.get_json(url).await
    }

    async fn generate_quiz(
        &self,
        user: &UserId,
        team: &TeamName,
        difficulty: Difficulty,
    ) -> Result<QuizBatch, ApiError> {
        let url = self.endpoint([
            "api",
            "quiz",
            "generate",
            user.as_str(),
            team.as_str(),
            difficulty.name(),
        ])?;
        self.get_json(url).await
    }

    async fn submit_quiz(&self, submission: &QuizSubmission) -> Result<QuizScore, ApiError> {
        let url = self.endpoint(["api", "quiz", "submit"])?;
        let response = self.client.post(url).json(submission).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    async fn reset_question_pool(
        &self,
        user: &UserId,
        team: &TeamName,
    ) -> Result<PoolResetReceipt, ApiError> {
        let url = self.endpoint(["api", "quiz", "reset-pool", user.as_str(), team.as_str()])?;
        let response = self.client.post(url).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    async fn submit_prediction(
        &self,
        submission: &PredictionSubmission,
    ) -> Result<PredictionReceipt, ApiError> {
        let url = self.endpoint(["api", "predictions", "submit"])?;
        let response = self.client.post(url).json(submission).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    async fn prediction_stats(&self, user: &UserId) -> Result<PredictionStats, ApiError> {
        let url = self.endpoint(["api", "predictions", "stats", user.as_str()])?;
        // The backend has shipped both `{...stats fields...}` and
        // `{"stats": {...}}`; accept either.
        let value: serde_json::Value = self.get_json(url).await?;
        let stats = match value.get("stats") {
            Some(inner) => serde_json::from_value(inner.clone())?,
            None => serde_json::from_value(value)?,
        };
        Ok(stats)
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let mut url = self.endpoint(["api", "leaderboard"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let envelope: LeaderboardEnvelope = self.get_json(url).await?;
        Ok(envelope.leaderboard)
    }

    async fn chat(&self, user: &UserId, message: &str) -> Result<ChatReply, ApiError> {
        let url = self.endpoint(["api", "chat"])?;
        let body = ChatRequest {
            user_id: user.as_str(),
            message,
        };
        let response = self.client.post(url).json(&body).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }
}
