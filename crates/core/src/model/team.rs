use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Leagues the backend serves content for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Soccer,
    Nba,
    Nfl,
}

impl Sport {
    pub const ALL: [Sport; 3] = [Sport::Soccer, Sport::Nba, Sport::Nfl];

    /// Wire name, as the backend expects it.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Sport::Soccer => "soccer",
            Sport::Nba => "nba",
            Sport::Nfl => "nfl",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const SOCCER_TEAMS: &[&str] = &[
    "AC Milan",
    "AS Roma",
    "Arsenal",
    "Aston Villa",
    "Atletico Madrid",
    "Barcelona",
    "Bayer Leverkusen",
    "Bayern Munich",
    "Borussia Dortmund",
    "Bournemouth",
    "Brentford",
    "Brighton",
    "Celta Vigo",
    "Chelsea",
    "Crystal Palace",
    "Eintracht Frankfurt",
    "Everton",
    "Fiorentina",
    "Fulham",
    "Girona",
    "Inter Milan",
    "Ipswich Town",
    "Juventus",
    "Lazio",
    "Leicester City",
    "Liverpool",
    "Lyon",
    "Manchester City",
    "Manchester United",
    "Marseille",
    "Monaco",
    "Napoli",
    "Newcastle United",
    "Nice",
    "Nottingham Forest",
    "Paris Saint-Germain",
    "RB Leipzig",
    "Real Betis",
    "Real Madrid",
    "Real Sociedad",
    "Saint-Étienne",
    "Schalke",
    "Sevilla",
    "Southampton",
    "Torino",
    "Tottenham",
    "Valencia",
    "Villarreal",
    "West Ham",
    "Wolverhampton",
];

const NBA_TEAMS: &[&str] = &[
    "Boston Celtics",
    "Chicago Bulls",
    "Dallas Mavericks",
    "Denver Nuggets",
    "Golden State Warriors",
    "Houston Rockets",
    "Lakers",
    "Los Angeles Clippers",
    "Miami Heat",
    "Milwaukee Bucks",
    "New York Knicks",
    "Philadelphia 76ers",
    "Phoenix Suns",
    "Portland Trail Blazers",
    "San Antonio Spurs",
];

const NFL_TEAMS: &[&str] = &[
    "Baltimore Ravens",
    "Buffalo Bills",
    "Chicago Bears",
    "Cincinnati Bengals",
    "Cleveland Browns",
    "Dallas Cowboys",
    "Denver Broncos",
    "Green Bay Packers",
    "Kansas City Chiefs",
    "Las Vegas Raiders",
    "Los Angeles Rams",
    "Miami Dolphins",
    "Minnesota Vikings",
    "New England Patriots",
    "New Orleans Saints",
    "New York Giants",
    "Philadelphia Eagles",
    "Pittsburgh Steelers",
    "San Francisco 49ers",
    "Seattle Seahawks",
];

/// The catalog of teams served for a league.
#[must_use]
pub fn teams_for(sport: Sport) -> &'static [&'static str] {
    match sport {
        Sport::Soccer => SOCCER_TEAMS,
        Sport::Nba => NBA_TEAMS,
        Sport::Nfl => NFL_TEAMS,
    }
}

fn sport_of(name: &str) -> Option<Sport> {
    Sport::ALL
        .into_iter()
        .find(|sport| teams_for(*sport).contains(&name))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TeamError {
    #[error("'{0}' is not a recognized team")]
    Unknown(String),
}

/// A team from the closed catalog, validated at construction.
///
/// Backend payloads that merely mention a team (history rows, leaderboard
/// entries) stay plain strings; `TeamName` is for choices the client makes.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TeamName {
    name: String,
    sport: Sport,
}

impl TeamName {
    /// Create a validated team name.
    ///
    /// # Errors
    ///
    /// Returns `TeamError::Unknown` if the trimmed value is not in the
    /// catalog of any league.
    pub fn new(value: impl Into<String>) -> Result<Self, TeamError> {
        let raw = value.into();
        let trimmed = raw.trim();
        match sport_of(trimmed) {
            Some(sport) => Ok(Self {
                name: trimmed.to_string(),
                sport,
            }),
            None => Err(TeamError::Unknown(trimmed.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The league this team plays in.
    #[must_use]
    pub fn sport(&self) -> Sport {
        self.sport
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_teams_validate_with_their_league() {
        let team = TeamName::new("Bayern Munich").unwrap();
        assert_eq!(team.as_str(), "Bayern Munich");
        assert_eq!(team.sport(), Sport::Soccer);

        let team = TeamName::new("  Lakers  ").unwrap();
        assert_eq!(team.as_str(), "Lakers");
        assert_eq!(team.sport(), Sport::Nba);
    }

    #[test]
    fn unknown_team_is_rejected() {
        let err = TeamName::new("Springfield Isotopes").unwrap_err();
        assert_eq!(err, TeamError::Unknown("Springfield Isotopes".into()));
    }

    #[test]
    fn catalogs_do_not_overlap() {
        for soccer in teams_for(Sport::Soccer) {
            assert!(!teams_for(Sport::Nba).contains(soccer));
            assert!(!teams_for(Sport::Nfl).contains(soccer));
        }
    }
}
