pub mod calendar;
pub mod client;
pub mod odds;
pub mod statsapi;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the upstream wire formats
// ---------------------------------------------------------------------------

/// One scheduled MLB game as listed by the schedule API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub home_team: String, // "New York Yankees"
    pub away_team: String,
    pub home_score: Option<u32>, // None until the game starts
    pub away_score: Option<u32>,
}

impl Game {
    /// Both scores, as `(away, home)`, once the game has started.
    pub fn score(&self) -> Option<(u32, u32)> {
        self.away_score.zip(self.home_score)
    }

    /// Replace both team names through `rename`, keeping scores untouched.
    pub fn map_teams(self, rename: impl Fn(&str) -> String) -> Self {
        Self {
            home_team: rename(&self.home_team),
            away_team: rename(&self.away_team),
            ..self
        }
    }
}

/// A listed event from the odds API with its point spreads, if any bookmaker
/// offered them.
#[derive(Debug, Clone, PartialEq)]
pub struct OddsEvent {
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
    pub home_spread: Option<f64>,
    pub away_spread: Option<f64>,
}

impl OddsEvent {
    /// Both spreads, as `(away, home)`. An event with only one side is
    /// treated as having no data.
    pub fn spreads(&self) -> Option<(f64, f64)> {
        self.away_spread.zip(self.home_spread)
    }

    pub fn map_teams(self, rename: impl Fn(&str) -> String) -> Self {
        Self {
            home_team: rename(&self.home_team),
            away_team: rename(&self.away_team),
            ..self
        }
    }
}
