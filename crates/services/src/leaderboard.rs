use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use fanpulse_core::model::{Session, medal_count};

use crate::api::FanApi;
use crate::error::ViewError;
use crate::view_router::ViewInitializer;

/// Default row count requested, matching the backend's cap.
pub const DEFAULT_LIMIT: usize = 50;

/// One rendered ranking row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub display_name: String,
    pub team: Option<String>,
    pub points: u64,
    pub badge_count: usize,
    /// Marks the signed-in fan's own row.
    pub is_you: bool,
}

/// Fetches and ranks the leaderboard on view entry.
pub struct LeaderboardService {
    api: Arc<dyn FanApi>,
    limit: usize,
    latest: Mutex<Vec<LeaderboardRow>>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(api: Arc<dyn FanApi>) -> Self {
        Self {
            api,
            limit: DEFAULT_LIMIT,
            latest: Mutex::new(Vec::new()),
        }
    }

    /// Override the number of rows requested per refresh.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The rows from the most recent refresh.
    #[must_use]
    pub fn latest(&self) -> Vec<LeaderboardRow> {
        self.latest.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    /// Fetch the ranking and annotate it for display.
    ///
    /// Rank is the server's ordering, one-based. The badge count comes
    /// from the backend when present and is otherwise derived from the
    /// row's point total.
    ///
    /// # Errors
    ///
    /// Returns `ViewError` when the fetch fails; the previous rows stay in
    /// place.
    pub async fn refresh(&self, session: &Session) -> Result<Vec<LeaderboardRow>, ViewError> {
        let entries = self.api.leaderboard(self.limit).await?;
        let you = session.user_id().as_str();

        let rows: Vec<LeaderboardRow> = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| LeaderboardRow {
                rank: index + 1,
                is_you: entry.user_id == you,
                badge_count: entry
                    .badge_count
                    .map_or_else(|| medal_count(entry.points), |count| count as usize),
                display_name: entry.display_name,
                team: entry.team,
                points: entry.points,
            })
            .collect();

        if let Ok(mut latest) = self.latest.lock() {
            latest.clone_from(&rows);
        }
        Ok(rows)
    }
}

#[async_trait]
impl ViewInitializer for LeaderboardService {
    async fn enter(&self, session: &Session) -> Result<(), ViewError> {
        self.refresh(session).await.map(|_| ())
    }
}
