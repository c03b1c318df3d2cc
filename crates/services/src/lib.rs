#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod chat;
pub mod dashboard;
pub mod error;
pub mod leaderboard;
pub mod predictions;
pub mod quiz_flow;
pub mod session_service;
pub mod view_router;

pub use fanpulse_core::Clock;

pub use app_services::AppServices;
pub use error::{
    ApiError, BootstrapError, ChatError, PredictionError, QuizFlowError, SessionServiceError,
    ViewError,
};
pub use quiz_flow::{
    PoolExhausted, QuizFlowController, QuizFlowState, QuizOutcome, QuizSelectionService,
};
pub use session_service::SessionService;
pub use view_router::{ViewInitializer, ViewRouter};
