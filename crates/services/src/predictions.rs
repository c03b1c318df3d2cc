use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use fanpulse_core::model::{MatchPick, Session};

use crate::api::{
    FanApi, PredictionReceipt, PredictionRecord, PredictionStats, PredictionSubmission,
};
use crate::error::{ApiError, PredictionError, ViewError};
use crate::view_router::ViewInitializer;

/// View data for the predictions screen: past picks plus aggregates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionDesk {
    pub history: Vec<PredictionRecord>,
    pub stats: PredictionStats,
}

/// Submits validated picks and serves the predictions view data.
///
/// Pick validation lives in [`MatchPick`]; by the time a pick reaches this
/// service it is already known to be well-formed, so the only failures
/// left are network ones.
pub struct PredictionService {
    api: Arc<dyn FanApi>,
    latest: Mutex<Option<PredictionDesk>>,
}

impl PredictionService {
    #[must_use]
    pub fn new(api: Arc<dyn FanApi>) -> Self {
        Self {
            api,
            latest: Mutex::new(None),
        }
    }

    /// The desk from the most recent refresh, if any.
    #[must_use]
    pub fn latest(&self) -> Option<PredictionDesk> {
        self.latest.lock().ok().and_then(|guard| guard.clone())
    }

    /// Record a validated pick with the backend.
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::Api` on transport or backend failure; the
    /// pick can be re-submitted as-is.
    pub async fn submit(
        &self,
        session: &Session,
        pick: &MatchPick,
    ) -> Result<PredictionReceipt, PredictionError> {
        let submission = PredictionSubmission {
            user_id: session.user_id().as_str().to_string(),
            sport: pick.sport().name().to_string(),
            team1: pick.team_one().as_str().to_string(),
            team2: pick.team_two().as_str().to_string(),
            pick: pick.pick_label().to_string(),
        };
        Ok(self.api.submit_prediction(&submission).await?)
    }

    /// Recorded picks, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    pub async fn history(&self, session: &Session) -> Result<Vec<PredictionRecord>, ApiError> {
        self.api.prediction_history(session.user_id()).await
    }

    /// Aggregate accuracy for the signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    pub async fn stats(&self, session: &Session) -> Result<PredictionStats, ApiError> {
        self.api.prediction_stats(session.user_id()).await
    }

    /// Fetch history and stats together for the predictions view.
    ///
    /// # Errors
    ///
    /// Returns `ViewError` when either fetch fails; the previous desk stays
    /// in place.
    pub async fn refresh(&self, session: &Session) -> Result<PredictionDesk, ViewError> {
        let history = self.history(session).await?;
        let stats = self.stats(session).await?;
        let desk = PredictionDesk { history, stats };

        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(desk.clone());
        }
        Ok(desk)
    }
}

#[async_trait]
impl ViewInitializer for PredictionService {
    async fn enter(&self, session: &Session) -> Result<(), ViewError> {
        self.refresh(session).await.map(|_| ())
    }
}
