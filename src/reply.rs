//! Plain-text replies, one composer per command outcome.
//!
//! Team names arrive already translated (or deliberately left in English for
//! today's scoreboard); nothing here looks names up.

use chrono::{Datelike, NaiveDate};
use mlb_api::client::{ApiError, ApiResult};
use mlb_api::{Game, OddsEvent};

pub const DIVIDER: &str = "──────────";

pub const TODAY_HEADER: &str = "今日賽事比分：";
pub const TODAY_EMPTY: &str = "今天沒有 MLB 賽事";
pub const TODAY_FAILED: &str = "無法取得今日賽事，請稍後再試";
pub const TOMORROW_FAILED: &str = "無法取得明日賽事，請稍後再試";
pub const ODDS_FAILED: &str = "無法取得明日賠率，請稍後再試";
pub const ODDS_UNCONFIGURED: &str = "尚未設定賠率 API 金鑰，暫時無法查詢賠率";

/// "8月7日"
fn month_day(date: NaiveDate) -> String {
    format!("{}月{}日", date.month(), date.day())
}

/// Scoreboard style: `"{away} {awayScore} - {home} {homeScore}"`.
fn scoreboard_line(game: &Game) -> String {
    match game.score() {
        Some((away, home)) => {
            format!("{} {away} - {} {home}", game.away_team, game.home_team)
        }
        None => format!("{} vs {}", game.away_team, game.home_team),
    }
}

/// Matchup style: `"{away} vs {home} {awayScore}-{homeScore}"`.
fn matchup_line(game: &Game) -> String {
    match game.score() {
        Some((away, home)) => {
            format!("{} vs {} {away}-{home}", game.away_team, game.home_team)
        }
        None => format!("{} vs {}", game.away_team, game.home_team),
    }
}

/// Spreads always carry a sign: `+1.5`, `-1.5`.
pub fn signed(point: f64) -> String {
    format!("{point:+}")
}

fn odds_line(event: &OddsEvent) -> String {
    match event.spreads() {
        Some((away, home)) => format!(
            "{} {} vs {} {}",
            event.away_team,
            signed(away),
            event.home_team,
            signed(home)
        ),
        None => format!("{} vs {}：暫無讓分資料", event.away_team, event.home_team),
    }
}

fn divided(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join(&format!("\n{DIVIDER}\n"))
}

pub fn today_games(result: &ApiResult<Vec<Game>>) -> String {
    match result {
        Ok(games) if games.is_empty() => TODAY_EMPTY.to_string(),
        Ok(games) => {
            let lines: Vec<String> = games.iter().map(scoreboard_line).collect();
            format!("{TODAY_HEADER}\n{}", lines.join("\n"))
        }
        Err(_) => TODAY_FAILED.to_string(),
    }
}

pub fn tomorrow_games(date: NaiveDate, result: &ApiResult<Vec<Game>>) -> String {
    match result {
        Ok(games) if games.is_empty() => format!("{}沒有 MLB 賽事", month_day(date)),
        Ok(games) => format!(
            "{}賽事：\n{}",
            month_day(date),
            divided(games.iter().map(matchup_line))
        ),
        Err(_) => TOMORROW_FAILED.to_string(),
    }
}

pub fn tomorrow_odds(date: NaiveDate, result: &ApiResult<Vec<OddsEvent>>) -> String {
    match result {
        Ok(events) if events.is_empty() => format!("{}沒有可查詢的讓分盤", month_day(date)),
        Ok(events) => format!(
            "{}讓分盤：\n{}",
            month_day(date),
            divided(events.iter().map(odds_line))
        ),
        Err(ApiError::MissingApiKey) => ODDS_UNCONFIGURED.to_string(),
        Err(ApiError::Network(..) | ApiError::Api(..) | ApiError::Parsing(..) | ApiError::Other(_)) => {
            ODDS_FAILED.to_string()
        }
    }
}

pub fn echo(text: &str) -> String {
    format!("你輸入的是：{text}")
}
