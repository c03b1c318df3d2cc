use thiserror::Error;

use crate::model::{Sport, TeamName};

/// A fan's call on a match outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Winner(TeamName),
    Draw,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PickError {
    #[error("a match needs two different teams")]
    SameTeam,

    #[error("{team} does not play {sport}")]
    WrongSport { team: String, sport: Sport },

    #[error("picked winner '{pick}' is not part of this match")]
    OutsideMatch { pick: String },

    #[error("a draw is only a valid outcome in soccer")]
    DrawNotAllowed,
}

/// A fully validated match pick, ready for submission.
///
/// Validation happens here, synchronously, so a malformed pick never
/// reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPick {
    sport: Sport,
    team_one: TeamName,
    team_two: TeamName,
    pick: Pick,
}

impl MatchPick {
    /// Build a validated pick for a `team_one` vs `team_two` match.
    ///
    /// # Errors
    ///
    /// Returns `PickError::SameTeam` when both sides are the same team,
    /// `PickError::WrongSport` when either team is outside the chosen
    /// league's catalog, `PickError::OutsideMatch` when the picked winner is
    /// neither side, and `PickError::DrawNotAllowed` for a draw outside
    /// soccer.
    pub fn new(
        sport: Sport,
        team_one: TeamName,
        team_two: TeamName,
        pick: Pick,
    ) -> Result<Self, PickError> {
        if team_one == team_two {
            return Err(PickError::SameTeam);
        }
        for team in [&team_one, &team_two] {
            if team.sport() != sport {
                return Err(PickError::WrongSport {
                    team: team.as_str().to_string(),
                    sport,
                });
            }
        }
        match &pick {
            Pick::Winner(winner) => {
                if winner != &team_one && winner != &team_two {
                    return Err(PickError::OutsideMatch {
                        pick: winner.as_str().to_string(),
                    });
                }
            }
            Pick::Draw => {
                if sport != Sport::Soccer {
                    return Err(PickError::DrawNotAllowed);
                }
            }
        }
        Ok(Self {
            sport,
            team_one,
            team_two,
            pick,
        })
    }

    #[must_use]
    pub fn sport(&self) -> Sport {
        self.sport
    }

    #[must_use]
    pub fn team_one(&self) -> &TeamName {
        &self.team_one
    }

    #[must_use]
    pub fn team_two(&self) -> &TeamName {
        &self.team_two
    }

    #[must_use]
    pub fn pick(&self) -> &Pick {
        &self.pick
    }

    /// Wire value of the pick: the winner's name, or `"Draw"`.
    #[must_use]
    pub fn pick_label(&self) -> &str {
        match &self.pick {
            Pick::Winner(team) => team.as_str(),
            Pick::Draw => "Draw",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str) -> TeamName {
        TeamName::new(name).unwrap()
    }

    #[test]
    fn winner_must_be_one_of_the_two_teams() {
        let err = MatchPick::new(
            Sport::Soccer,
            team("Arsenal"),
            team("Chelsea"),
            Pick::Winner(team("Liverpool")),
        )
        .unwrap_err();
        assert!(matches!(err, PickError::OutsideMatch { .. }));

        let pick = MatchPick::new(
            Sport::Soccer,
            team("Arsenal"),
            team("Chelsea"),
            Pick::Winner(team("Chelsea")),
        )
        .unwrap();
        assert_eq!(pick.pick_label(), "Chelsea");
    }

    #[test]
    fn identical_teams_are_rejected() {
        let err = MatchPick::new(
            Sport::Nba,
            team("Lakers"),
            team("Lakers"),
            Pick::Winner(team("Lakers")),
        )
        .unwrap_err();
        assert_eq!(err, PickError::SameTeam);
    }

    #[test]
    fn draw_is_soccer_only() {
        let pick = MatchPick::new(Sport::Soccer, team("Arsenal"), team("Chelsea"), Pick::Draw);
        assert!(pick.is_ok());
        assert_eq!(pick.unwrap().pick_label(), "Draw");

        let err = MatchPick::new(
            Sport::Nfl,
            team("Buffalo Bills"),
            team("Chicago Bears"),
            Pick::Draw,
        )
        .unwrap_err();
        assert_eq!(err, PickError::DrawNotAllowed);
    }

    #[test]
    fn teams_must_match_the_chosen_sport() {
        let err = MatchPick::new(
            Sport::Nba,
            team("Lakers"),
            team("Arsenal"),
            Pick::Winner(team("Lakers")),
        )
        .unwrap_err();
        assert!(matches!(err, PickError::WrongSport { sport: Sport::Nba, .. }));
    }
}
