use std::sync::Arc;

use fanpulse_core::Clock;
use fanpulse_core::model::{ActiveView, Difficulty, MatchPick, TeamName};
use storage::{JsonFileStore, SessionStore};

use crate::api::{FanApi, HttpFanApi, PredictionReceipt};
use crate::chat::ChatService;
use crate::dashboard::DashboardService;
use crate::error::{
    BootstrapError, ChatError, PredictionError, QuizFlowError, SessionServiceError, ViewError,
};
use crate::leaderboard::LeaderboardService;
use crate::predictions::PredictionService;
use crate::quiz_flow::{QuizFlowController, QuizFlowState, QuizSelectionService};
use crate::session_service::SessionService;
use crate::view_router::ViewRouter;

/// Assembles the client services over one backend connection and one
/// session store, and owns the signed-in lifecycle.
///
/// The session service initializes first (everything else needs the
/// identity), the router owns which screen is showing, and the quiz flow
/// controller carries the only multi-step protocol. The per-view services
/// hang off the router as initializers.
pub struct AppServices {
    session: SessionService,
    router: ViewRouter,
    quiz: QuizFlowController,
    quiz_selection: Arc<QuizSelectionService>,
    dashboard: Arc<DashboardService>,
    leaderboard: Arc<LeaderboardService>,
    predictions: Arc<PredictionService>,
    chat: ChatService,
}

impl AppServices {
    #[must_use]
    pub fn new(api: Arc<dyn FanApi>, store: Arc<dyn SessionStore>, clock: Clock) -> Self {
        let dashboard = Arc::new(DashboardService::new(Arc::clone(&api)));
        let quiz_selection = Arc::new(QuizSelectionService::new(Arc::clone(&api)));
        let leaderboard = Arc::new(LeaderboardService::new(Arc::clone(&api)));
        let predictions = Arc::new(PredictionService::new(Arc::clone(&api)));

        let mut router = ViewRouter::new();
        router.register(ActiveView::Dashboard, dashboard.clone());
        router.register(ActiveView::Quiz, quiz_selection.clone());
        router.register(ActiveView::Leaderboard, leaderboard.clone());
        router.register(ActiveView::Predictions, predictions.clone());

        Self {
            session: SessionService::new(Arc::clone(&api), store),
            router,
            quiz: QuizFlowController::new(Arc::clone(&api)),
            quiz_selection,
            dashboard,
            leaderboard,
            predictions,
            chat: ChatService::new(api, clock),
        }
    }

    /// Connect to a live backend and the default on-disk session store.
    ///
    /// # Errors
    ///
    /// Returns `BootstrapError` for an invalid backend URL or an
    /// unavailable data directory.
    pub fn with_backend(base_url: &str) -> Result<Self, BootstrapError> {
        let api: Arc<dyn FanApi> = Arc::new(HttpFanApi::new(base_url)?);
        let store: Arc<dyn SessionStore> = Arc::new(JsonFileStore::at_default_location()?);
        Ok(Self::new(api, store, Clock::System))
    }

    /// Restore the persisted session; with one present, land on the
    /// dashboard. Returns the active view, or `None` when the fan must
    /// sign in first.
    pub async fn bootstrap(&mut self) -> Option<ActiveView> {
        self.session.restore().await?;
        if let Err(err) = self.show(ActiveView::Dashboard).await {
            log::warn!("dashboard refresh failed during bootstrap: {err}");
        }
        self.router.active()
    }

    /// Register a brand-new fan and land on the dashboard.
    ///
    /// # Errors
    ///
    /// Returns the session service's validation or backend error; a failed
    /// dashboard refresh afterwards is only a warning, not a failure of
    /// the sign-in itself.
    pub async fn sign_in(
        &mut self,
        display_name: &str,
        team: &str,
    ) -> Result<(), SessionServiceError> {
        self.session.establish(display_name, team).await?;
        if let Err(err) = self.show(ActiveView::Dashboard).await {
            log::warn!("dashboard refresh failed after sign-in: {err}");
        }
        Ok(())
    }

    /// Sign out: drop the cached identity, remove the persisted copy, and
    /// leave the signed-in area.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Storage` when the persisted copy
    /// could not be removed; the in-memory sign-out happens regardless.
    pub async fn sign_out(&mut self) -> Result<(), SessionServiceError> {
        self.quiz.reset();
        self.router.deactivate_all();
        self.session.clear().await
    }

    /// Navigate to a view, running its entry refresh.
    ///
    /// Entering the quiz view also returns the quiz flow to the selection
    /// state, discarding any leftover attempt. Entering the dashboard first
    /// refreshes the header's point total, tolerating failure with a
    /// warning the way a header refresh should.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::SignedOut` without a session, or the view's own
    /// refresh error (the view stays active).
    pub async fn show(&mut self, view: ActiveView) -> Result<u64, ViewError> {
        if !self.session.is_signed_in() {
            return Err(ViewError::SignedOut);
        }

        if view == ActiveView::Quiz {
            self.quiz.reset();
        }
        if view == ActiveView::Dashboard {
            if let Err(err) = self.session.refresh_points().await {
                log::warn!("points refresh on dashboard entry failed: {err}");
            }
        }

        let Some(session) = self.session.current() else {
            return Err(ViewError::SignedOut);
        };
        self.router.activate(view, session).await
    }

    /// Begin a quiz attempt for the signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::SignedOut` without a session, otherwise the
    /// controller's own error.
    pub async fn start_quiz(
        &mut self,
        team: TeamName,
        difficulty: Difficulty,
    ) -> Result<&QuizFlowState, QuizFlowError> {
        let user = self.signed_in_user()?;
        self.quiz.start(&user, team, difficulty).await
    }

    /// Submit the running attempt for the signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::SignedOut` without a session, otherwise the
    /// controller's own error.
    pub async fn submit_quiz(&mut self) -> Result<&QuizFlowState, QuizFlowError> {
        let user = self.signed_in_user()?;
        self.quiz.submit(&user).await
    }

    /// Continue to the next difficulty for the signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::SignedOut` without a session, otherwise the
    /// controller's own error.
    pub async fn advance_quiz(&mut self) -> Result<&QuizFlowState, QuizFlowError> {
        let user = self.signed_in_user()?;
        self.quiz.advance(&user).await
    }

    /// Reset the drained question pool for the signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::SignedOut` without a session, otherwise the
    /// controller's own error.
    pub async fn reset_quiz_pool(&mut self) -> Result<String, QuizFlowError> {
        let user = self.signed_in_user()?;
        self.quiz.reset_pool(&user).await
    }

    /// Record a validated pick for the signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::SignedOut` without a session, otherwise
    /// the prediction service's own error.
    pub async fn submit_prediction(
        &self,
        pick: &MatchPick,
    ) -> Result<PredictionReceipt, PredictionError> {
        let Some(session) = self.session.current() else {
            return Err(PredictionError::SignedOut);
        };
        self.predictions.submit(session, pick).await
    }

    /// One assistant exchange for the signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::SignedOut` without a session, otherwise the
    /// chat service's own error.
    pub async fn send_chat(&mut self, text: &str) -> Result<String, ChatError> {
        let Some(session) = self.session.current() else {
            return Err(ChatError::SignedOut);
        };
        self.chat.send(session, text).await
    }

    fn signed_in_user(&self) -> Result<fanpulse_core::model::UserId, QuizFlowError> {
        self.session
            .current()
            .map(|session| session.user_id().clone())
            .ok_or(QuizFlowError::SignedOut)
    }

    #[must_use]
    pub fn session(&self) -> &SessionService {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionService {
        &mut self.session
    }

    #[must_use]
    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizFlowController {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut QuizFlowController {
        &mut self.quiz
    }

    #[must_use]
    pub fn quiz_selection(&self) -> &QuizSelectionService {
        &self.quiz_selection
    }

    #[must_use]
    pub fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }

    #[must_use]
    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.leaderboard
    }

    #[must_use]
    pub fn predictions(&self) -> &PredictionService {
        &self.predictions
    }

    #[must_use]
    pub fn chat(&self) -> &ChatService {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatService {
        &mut self.chat
    }
}
