/// The Odds API raw wire types.
/// Endpoint: https://api.the-odds-api.com/v4/sports/baseball_mlb/odds
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Market key carrying point spreads.
pub const SPREADS_MARKET: &str = "spreads";

#[derive(Debug, Deserialize, Clone)]
pub struct OddsApiEvent {
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

impl OddsApiEvent {
    /// First spreads market across all bookmakers, in listing order, with
    /// the bookmaker offering it.
    pub fn first_spreads_market(&self) -> Option<(&Bookmaker, &Market)> {
        self.bookmakers.iter().find_map(|b| {
            b.markets
                .iter()
                .find(|m| m.key == SPREADS_MARKET)
                .map(|m| (b, m))
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Bookmaker {
    pub key: Option<String>,
    #[serde(default)]
    pub markets: Vec<Market>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Market {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Market {
    /// Point for the outcome named `team`.
    pub fn point_for(&self, team: &str) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.name == team)
            .and_then(|o| o.point)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Outcome {
    pub name: String,
    pub point: Option<f64>,
}
