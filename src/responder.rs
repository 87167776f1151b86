use crate::commands::{Command, dispatch};
use crate::reply;
use crate::teams::TeamNames;
use chrono::NaiveDate;
use log::{debug, error, info};
use mlb_api::calendar::{CivilZone, next_day};
use mlb_api::client::{ApiError, ApiResult, MlbApi};
use mlb_api::{Game, OddsEvent};
use std::time::Duration;

/// Turns one inbound message into the reply text: dispatch, fetch, translate,
/// compose. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct Responder {
    api: MlbApi,
    teams: TeamNames,
    zone: CivilZone,
    odds_api_key: Option<String>,
}

impl Responder {
    pub fn new(api: MlbApi, teams: TeamNames, zone: CivilZone, odds_api_key: Option<String>) -> Self {
        Self { api, teams, zone, odds_api_key }
    }

    pub fn zone(&self) -> &CivilZone {
        &self.zone
    }

    pub fn upstream_timeout(&self) -> Duration {
        self.api.timeout()
    }

    pub async fn respond(&self, text: &str) -> String {
        self.respond_on(text, self.zone.today()).await
    }

    /// Like `respond`, with "today" pinned to `today`.
    pub async fn respond_on(&self, text: &str, today: NaiveDate) -> String {
        let command = dispatch(text);
        debug!("dispatching {command:?}");

        match command {
            Command::TodayGames => {
                let result = self.api.fetch_games(today).await;
                log_failure("today's games", &result);
                reply::today_games(&result)
            }
            Command::TomorrowGames => {
                let date = next_day(today);
                let result: ApiResult<Vec<Game>> = self
                    .api
                    .fetch_games(date)
                    .await
                    .map(|games| {
                        games
                            .into_iter()
                            .map(|g| g.map_teams(|name| self.teams.translate(name)))
                            .collect()
                    });
                log_failure("tomorrow's games", &result);
                reply::tomorrow_games(date, &result)
            }
            Command::TomorrowOdds => {
                let date = next_day(today);
                let result: ApiResult<Vec<OddsEvent>> = self
                    .api
                    .fetch_odds(date, &self.zone, self.odds_api_key.as_deref())
                    .await
                    .map(|events| {
                        events
                            .into_iter()
                            .map(|e| e.map_teams(|name| self.teams.translate(name)))
                            .collect()
                    });
                log_failure("tomorrow's odds", &result);
                reply::tomorrow_odds(date, &result)
            }
            Command::Echo(text) => reply::echo(&text),
        }
    }
}

fn log_failure<T>(what: &str, result: &ApiResult<T>) {
    match result {
        Ok(_) => {}
        Err(ApiError::MissingApiKey) => info!("{what} requested but ODDS_API_KEY is not set"),
        Err(e) => error!("failed to fetch {what}: {e}"),
    }
}
