use crate::calendar::CivilZone;
use crate::odds::OddsApiEvent;
use crate::statsapi::ScheduleResponse;
use crate::{Game, OddsEvent};
use chrono::NaiveDate;
use log::debug;
use reqwest::{Client, Url};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const MLB_SCHEDULE: &str = "https://statsapi.mlb.com/api/v1/schedule";
pub const ODDS_API_MLB: &str = "https://api.the-odds-api.com/v4/sports/baseball_mlb/odds";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the MLB schedule and odds endpoints.
///
/// Every request carries `timeout`; there are no retries.
#[derive(Debug, Clone)]
pub struct MlbApi {
    client: Client,
    timeout: Duration,
    schedule_url: String,
    odds_url: String,
}

impl Default for MlbApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("mlbbot/0.1 (chat schedule responder)")
                .build()
                .unwrap_or_default(),
            timeout: DEFAULT_TIMEOUT,
            schedule_url: MLB_SCHEDULE.to_string(),
            odds_url: ODDS_API_MLB.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// No odds API key configured; not a transient failure.
    MissingApiKey,
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::MissingApiKey => write!(f, "odds API key is not configured"),
            ApiError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
            ApiError::MissingApiKey | ApiError::Other(_) => None,
        }
    }
}

impl MlbApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_schedule_url(mut self, url: impl Into<String>) -> Self {
        self.schedule_url = url.into();
        self
    }

    pub fn with_odds_url(mut self, url: impl Into<String>) -> Self {
        self.odds_url = url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the games scheduled on `date` (US schedule date as the API
    /// partitions it). An empty schedule is `Ok(vec![])`, not an error.
    pub async fn fetch_games(&self, date: NaiveDate) -> ApiResult<Vec<Game>> {
        let date = date.format("%Y-%m-%d").to_string();
        let raw: ScheduleResponse = self
            .get(&self.schedule_url, &[("sportId", "1"), ("date", date.as_str())])
            .await?;
        Ok(map_schedule(raw))
    }

    /// Fetch point spreads for every event starting on `date` in `zone`.
    ///
    /// The odds endpoint can't be filtered by date, so all listed events are
    /// requested and filtered here. Events without a spreads market are kept
    /// with empty spreads.
    pub async fn fetch_odds(
        &self,
        date: NaiveDate,
        zone: &CivilZone,
        api_key: Option<&str>,
    ) -> ApiResult<Vec<OddsEvent>> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ApiError::MissingApiKey)?;

        let raw: Vec<OddsApiEvent> = self
            .get(
                &self.odds_url,
                &[
                    ("regions", "us"),
                    ("markets", "spreads"),
                    ("oddsFormat", "decimal"),
                    ("apiKey", api_key),
                ],
            )
            .await?;
        debug!("odds API listed {} events", raw.len());

        Ok(events_on(raw, date, zone))
    }

    /// GET `base` with `query` and decode the JSON body. Errors carry `base`
    /// only, so credentials in the query never reach the logs.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        base: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = Url::parse_with_params(base, query)
            .map_err(|e| ApiError::Other(format!("invalid URL {base}: {e}")))?;

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.without_url(), base.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e.without_url(), base.to_owned())),
            Err(e) => Err(ApiError::Api(e.without_url(), base.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

/// Games of the first listed date; a response without dates has no games.
fn map_schedule(raw: ScheduleResponse) -> Vec<Game> {
    raw.dates
        .into_iter()
        .next()
        .map(|d| d.games)
        .unwrap_or_default()
        .into_iter()
        .map(|g| Game {
            home_team: g.teams.home.team.name,
            away_team: g.teams.away.team.name,
            home_score: g.teams.home.score,
            away_score: g.teams.away.score,
        })
        .collect()
}

fn map_odds_event(event: OddsApiEvent) -> OddsEvent {
    let market = event.first_spreads_market().map(|(bookmaker, market)| {
        debug!(
            "{} @ {}: spreads from {}",
            event.away_team,
            event.home_team,
            bookmaker.key.as_deref().unwrap_or("unnamed bookmaker")
        );
        market
    });
    let home_spread = market.and_then(|m| m.point_for(&event.home_team));
    let away_spread = market.and_then(|m| m.point_for(&event.away_team));

    OddsEvent {
        home_spread,
        away_spread,
        commence_time: event.commence_time,
        home_team: event.home_team,
        away_team: event.away_team,
    }
}

/// Keep events whose start falls on `date` in `zone`, in listing order.
pub fn events_on(raw: Vec<OddsApiEvent>, date: NaiveDate, zone: &CivilZone) -> Vec<OddsEvent> {
    raw.into_iter()
        .filter(|e| zone.civil_date(e.commence_time) == date)
        .map(map_odds_event)
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
