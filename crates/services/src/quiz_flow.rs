use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use fanpulse_core::model::{
    Difficulty, QuizSession, Session, Sport, TeamName, UserId, teams_for,
};

use crate::api::{FanApi, QuizBatch, QuizScore, QuizSubmission, TeamProgress};
use crate::error::{ApiError, QuizFlowError, ViewError};
use crate::view_router::ViewInitializer;

/// A scored attempt, as carried into the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub team: TeamName,
    pub difficulty: Difficulty,
    pub score: QuizScore,
}

impl QuizOutcome {
    /// The difficulty a follow-up attempt would target, when one exists.
    ///
    /// Prefers the backend's word; falls back to the local progression when
    /// the response omits it.
    #[must_use]
    pub fn next_difficulty(&self) -> Option<Difficulty> {
        self.score.next_level.or_else(|| self.difficulty.next())
    }
}

/// The backend ran out of unseen questions for a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolExhausted {
    pub team: TeamName,
    pub total_asked: u32,
    pub total_available: u32,
}

/// The quiz flow's current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizFlowState {
    /// No attempt underway; the fan is on the selection screen.
    Idle,
    /// An attempt with a live answer map.
    InProgress(QuizSession),
    /// A scored attempt awaiting the continue/stop choice.
    Results(QuizOutcome),
    /// The question pool ran dry; only a pool reset (or stopping) leads out.
    Exhausted(PoolExhausted),
}

impl QuizFlowState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuizFlowState::Idle => "idle",
            QuizFlowState::InProgress(_) => "in progress",
            QuizFlowState::Results(_) => "showing results",
            QuizFlowState::Exhausted(_) => "exhausted",
        }
    }
}

/// Drives the answer/submit/progress protocol for quiz attempts.
///
/// All transitions happen here, and every transition bumps a generation
/// counter. Responses come back through the `apply_*` methods, which
/// discard anything issued under an older generation: the defense against
/// a slow response landing after the fan has cancelled, navigated away, or
/// started something newer.
pub struct QuizFlowController {
    api: Arc<dyn FanApi>,
    state: QuizFlowState,
    generation: u64,
}

impl QuizFlowController {
    #[must_use]
    pub fn new(api: Arc<dyn FanApi>) -> Self {
        Self {
            api,
            state: QuizFlowState::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &QuizFlowState {
        &self.state
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn transition(&mut self, state: QuizFlowState) -> &QuizFlowState {
        self.generation += 1;
        self.state = state;
        &self.state
    }

    fn wrong_state(&self, action: &'static str) -> QuizFlowError {
        QuizFlowError::WrongState {
            action,
            state: self.state.name(),
        }
    }

    /// Return to the selection screen, discarding whatever was underway.
    pub fn reset(&mut self) {
        self.transition(QuizFlowState::Idle);
    }

    /// Begin an attempt at the given team and difficulty.
    ///
    /// On success the flow is `InProgress` with a fresh, empty answer map;
    /// a drained pool lands in `Exhausted`; a backend failure leaves the
    /// flow in `Idle` so the fan can simply try again.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::WrongState` outside `Idle` and propagates
    /// backend failures.
    pub async fn start(
        &mut self,
        user: &UserId,
        team: TeamName,
        difficulty: Difficulty,
    ) -> Result<&QuizFlowState, QuizFlowError> {
        if !matches!(self.state, QuizFlowState::Idle) {
            return Err(self.wrong_state("start"));
        }
        let issued = self.generation;
        let batch = self.api.generate_quiz(user, &team, difficulty).await?;
        self.apply_batch(issued, team, difficulty, batch)
    }

    /// Apply a question batch for a request issued under `issued`.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Superseded` when the flow has moved on since
    /// the request was issued; the batch is dropped unapplied.
    pub fn apply_batch(
        &mut self,
        issued: u64,
        team: TeamName,
        difficulty: Difficulty,
        batch: QuizBatch,
    ) -> Result<&QuizFlowState, QuizFlowError> {
        if issued != self.generation {
            log::debug!("dropping {difficulty} batch for {team}: superseded");
            return Err(QuizFlowError::Superseded);
        }
        match batch {
            QuizBatch::Success { questions } => {
                let session = QuizSession::new(team, difficulty, questions)?;
                Ok(self.transition(QuizFlowState::InProgress(session)))
            }
            QuizBatch::QuestionsExhausted {
                total_asked,
                total_available,
            } => Ok(self.transition(QuizFlowState::Exhausted(PoolExhausted {
                team,
                total_asked,
                total_available,
            }))),
        }
    }

    /// Record the selected option for a question of the running attempt.
    ///
    /// Re-selection overwrites the earlier choice; no transition happens
    /// and no history of prior selections is kept.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::WrongState` outside `InProgress`, or the
    /// session's own index validation error.
    pub fn select_answer(&mut self, index: usize, option: usize) -> Result<(), QuizFlowError> {
        let state = self.state.name();
        let QuizFlowState::InProgress(session) = &mut self.state else {
            return Err(QuizFlowError::WrongState {
                action: "select_answer",
                state,
            });
        };
        session.select_answer(index, option)?;
        Ok(())
    }

    /// Abandon the running attempt without submitting anything.
    ///
    /// Callers confirm with the fan first; nothing goes over the wire and
    /// the answers are gone for good.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::WrongState` outside `InProgress`.
    pub fn cancel(&mut self) -> Result<(), QuizFlowError> {
        if !matches!(self.state, QuizFlowState::InProgress(_)) {
            return Err(self.wrong_state("cancel"));
        }
        self.transition(QuizFlowState::Idle);
        Ok(())
    }

    /// Submit the completed attempt for scoring.
    ///
    /// Rejected locally, with no network call, unless every question is
    /// answered. On a backend failure the attempt stays `InProgress` with
    /// its answers intact, ready for a retry of the same action.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Quiz(QuizError::Incomplete)` for a partial
    /// answer map, `QuizFlowError::WrongState` outside `InProgress`, and
    /// propagates backend failures.
    pub async fn submit(&mut self, user: &UserId) -> Result<&QuizFlowState, QuizFlowError> {
        let QuizFlowState::InProgress(session) = &self.state else {
            return Err(self.wrong_state("submit"));
        };
        let answers = session.answer_sheet()?;
        let submission = QuizSubmission {
            user_id: user.as_str().to_string(),
            team: session.team().as_str().to_string(),
            difficulty: session.difficulty(),
            answers,
            questions: session.questions().to_vec(),
        };

        let issued = self.generation;
        let score = self.api.submit_quiz(&submission).await?;
        self.apply_score(issued, score)
    }

    /// Apply a scoring response for a submission issued under `issued`.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Superseded` when the flow has moved on since
    /// the submission was issued; the score is dropped unapplied.
    pub fn apply_score(
        &mut self,
        issued: u64,
        score: QuizScore,
    ) -> Result<&QuizFlowState, QuizFlowError> {
        if issued != self.generation {
            log::debug!("dropping quiz score: superseded");
            return Err(QuizFlowError::Superseded);
        }
        let QuizFlowState::InProgress(session) = &self.state else {
            return Err(self.wrong_state("apply_score"));
        };
        let outcome = QuizOutcome {
            team: session.team().clone(),
            difficulty: session.difficulty(),
            score,
        };
        Ok(self.transition(QuizFlowState::Results(outcome)))
    }

    /// Continue to the next difficulty after a scored attempt.
    ///
    /// Only offered while the completed difficulty has a next step; the
    /// previous attempt's answers are discarded and a fresh session begins.
    /// A backend failure leaves the results on screen for a retry.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::WrongState` outside `Results`,
    /// `QuizFlowError::AtMaxDifficulty` at the top of the progression, and
    /// propagates backend failures.
    pub async fn advance(&mut self, user: &UserId) -> Result<&QuizFlowState, QuizFlowError> {
        let QuizFlowState::Results(outcome) = &self.state else {
            return Err(self.wrong_state("advance"));
        };
        let Some(next) = outcome.next_difficulty() else {
            return Err(QuizFlowError::AtMaxDifficulty);
        };
        let team = outcome.team.clone();

        let issued = self.generation;
        let batch = self.api.generate_quiz(user, &team, next).await?;
        self.apply_batch(issued, team, next, batch)
    }

    /// Stop after results or a drained pool and return to selection.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::WrongState` outside `Results`/`Exhausted`.
    pub fn stop(&mut self) -> Result<(), QuizFlowError> {
        match self.state {
            QuizFlowState::Results(_) | QuizFlowState::Exhausted(_) => {
                self.transition(QuizFlowState::Idle);
                Ok(())
            }
            _ => Err(self.wrong_state("stop")),
        }
    }

    /// Clear the drained question pool so the team can be replayed.
    ///
    /// Only offered from `Exhausted`, after the fan confirms. On success
    /// the flow returns to selection carrying the server's confirmation
    /// message; on failure it stays `Exhausted` for a retry.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::WrongState` outside `Exhausted` and
    /// propagates backend failures.
    pub async fn reset_pool(&mut self, user: &UserId) -> Result<String, QuizFlowError> {
        let QuizFlowState::Exhausted(exhausted) = &self.state else {
            return Err(self.wrong_state("reset_pool"));
        };
        let team = exhausted.team.clone();
        let receipt = self.api.reset_question_pool(user, &team).await?;
        self.transition(QuizFlowState::Idle);
        Ok(receipt.message)
    }
}

/// One league's worth of selectable teams for the quiz entry screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSelection {
    pub sport: Sport,
    pub teams: Vec<&'static str>,
}

/// Serves the quiz entry screen: the catalog grouped by league, plus the
/// per-team resume overview.
pub struct QuizSelectionService {
    api: Arc<dyn FanApi>,
    latest: Mutex<Vec<QuizSelection>>,
}

impl QuizSelectionService {
    #[must_use]
    pub fn new(api: Arc<dyn FanApi>) -> Self {
        Self {
            api,
            latest: Mutex::new(Vec::new()),
        }
    }

    /// The team catalog grouped by league.
    #[must_use]
    pub fn catalog() -> Vec<QuizSelection> {
        Sport::ALL
            .into_iter()
            .map(|sport| QuizSelection {
                sport,
                teams: teams_for(sport).to_vec(),
            })
            .collect()
    }

    /// The grouping from the most recent view entry.
    #[must_use]
    pub fn latest(&self) -> Vec<QuizSelection> {
        self.latest.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Saved progress for one team: suggested difficulty and team points.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or backend failure.
    pub async fn team_overview(
        &self,
        session: &Session,
        team: &TeamName,
    ) -> Result<TeamProgress, ApiError> {
        self.api.team_progress(session.user_id(), team).await
    }
}

#[async_trait]
impl ViewInitializer for QuizSelectionService {
    async fn enter(&self, _session: &Session) -> Result<(), ViewError> {
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Self::catalog();
        }
        Ok(())
    }
}
