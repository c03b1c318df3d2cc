use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use fanpulse_core::model::{Session, medal_count};

use crate::api::{FanApi, PredictionRecord, QuizHistoryEntry};
use crate::error::ViewError;
use crate::view_router::ViewInitializer;

/// How many recent rows the dashboard keeps per section.
const RECENT_QUIZZES: usize = 5;
const RECENT_PREDICTIONS: usize = 3;

/// Everything the dashboard shows, assembled in one refresh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub points: u64,
    pub badges: Vec<String>,
    pub medal_count: usize,
    pub quiz_count: usize,
    pub prediction_count: usize,
    pub recent_quizzes: Vec<QuizHistoryEntry>,
    pub recent_predictions: Vec<PredictionRecord>,
}

/// Assembles the dashboard summary on view entry.
pub struct DashboardService {
    api: Arc<dyn FanApi>,
    latest: Mutex<Option<DashboardSnapshot>>,
}

impl DashboardService {
    #[must_use]
    pub fn new(api: Arc<dyn FanApi>) -> Self {
        Self {
            api,
            latest: Mutex::new(None),
        }
    }

    /// The snapshot from the most recent refresh, if any.
    #[must_use]
    pub fn latest(&self) -> Option<DashboardSnapshot> {
        self.latest.lock().ok().and_then(|guard| guard.clone())
    }

    /// Fetch histories and profile summary and assemble a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ViewError` when any of the underlying fetches fails; the
    /// previous snapshot stays in place.
    pub async fn refresh(&self, session: &Session) -> Result<DashboardSnapshot, ViewError> {
        let user = session.user_id();
        let quizzes = self.api.quiz_history(user).await?;
        let predictions = self.api.prediction_history(user).await?;
        let summary = self.api.fetch_user(user).await?;

        let snapshot = DashboardSnapshot {
            points: summary.points,
            medal_count: medal_count(summary.points),
            badges: summary.badges,
            quiz_count: quizzes.len(),
            prediction_count: predictions.len(),
            recent_quizzes: quizzes.into_iter().take(RECENT_QUIZZES).collect(),
            recent_predictions: predictions.into_iter().take(RECENT_PREDICTIONS).collect(),
        };

        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(snapshot.clone());
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl ViewInitializer for DashboardService {
    async fn enter(&self, session: &Session) -> Result<(), ViewError> {
        self.refresh(session).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ScriptedFanApi, UserSummary};
    use crate::error::ApiError;
    use fanpulse_core::model::{Difficulty, DisplayName, TeamName, UserId};

    fn session() -> Session {
        Session::new(
            UserId::from_string("user_1"),
            DisplayName::new("Dana").unwrap(),
            TeamName::new("Arsenal").unwrap(),
        )
    }

    fn quiz_rows(count: usize) -> Vec<QuizHistoryEntry> {
        (0..count)
            .map(|n| QuizHistoryEntry {
                team: "Arsenal".into(),
                difficulty: Difficulty::Easy,
                correct: n as u32,
                total: 5,
            })
            .collect()
    }

    #[tokio::test]
    async fn snapshot_counts_everything_and_caps_recents() {
        let api = Arc::new(ScriptedFanApi::new());
        api.script_quiz_history(Ok(quiz_rows(8)));
        api.script_fetch_user(Ok(UserSummary {
            points: 400,
            badges: vec!["quiz_rookie".into()],
            team: Some("Arsenal".into()),
        }));
        let service = DashboardService::new(Arc::clone(&api) as Arc<dyn FanApi>);

        let snapshot = service.refresh(&session()).await.unwrap();
        assert_eq!(snapshot.quiz_count, 8);
        assert_eq!(snapshot.recent_quizzes.len(), 5);
        assert_eq!(snapshot.prediction_count, 0);
        assert_eq!(snapshot.points, 400);
        assert_eq!(snapshot.medal_count, 3); // bronze, silver, gold at 400
        assert_eq!(snapshot.badges, vec!["quiz_rookie".to_string()]);

        assert_eq!(service.latest(), Some(snapshot));
    }

    #[tokio::test]
    async fn a_failed_fetch_keeps_the_previous_snapshot() {
        let api = Arc::new(ScriptedFanApi::new());
        let service = DashboardService::new(Arc::clone(&api) as Arc<dyn FanApi>);
        service.refresh(&session()).await.unwrap();
        let before = service.latest();

        api.script_quiz_history(Err(ApiError::Timeout));
        let err = service.refresh(&session()).await.unwrap_err();
        assert!(matches!(err, ViewError::Api(ApiError::Timeout)));
        assert_eq!(service.latest(), before);
    }
}
