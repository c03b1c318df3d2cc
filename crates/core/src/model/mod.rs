mod ids;
mod prediction;
mod quiz;
mod rewards;
mod session;
mod team;
mod view;

pub use ids::UserId;
pub use prediction::{MatchPick, Pick, PickError};
pub use quiz::{Difficulty, Question, QuizError, QuizSession};
pub use rewards::{MedalTier, medal_count};
pub use session::{DisplayName, Session, SessionError};
pub use team::{Sport, TeamError, TeamName, teams_for};
pub use view::ActiveView;
