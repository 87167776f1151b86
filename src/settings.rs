use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use mlb_api::calendar::DEFAULT_ZONE;
use mlb_api::client::{MLB_SCHEDULE, ODDS_API_MLB};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::line::LINE_API;

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Clone)]
pub struct Settings {
    pub channel_access_token: String,
    pub channel_secret: String,
    /// `None` makes the odds command answer with the "not configured" reply.
    pub odds_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    pub time_zone: String,
    pub http_timeout: Duration,
    pub schedule_url: String,
    pub odds_url: String,
    pub line_api_url: String,
    pub log_level: LevelFilter,
}

// Secrets stay out of debug output.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("odds_api_key", &self.odds_api_key.as_ref().map(|_| "<set>"))
            .field("bind_addr", &self.bind_addr)
            .field("time_zone", &self.time_zone)
            .field("http_timeout", &self.http_timeout)
            .field("schedule_url", &self.schedule_url)
            .field("odds_url", &self.odds_url)
            .field("line_api_url", &self.line_api_url)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key → value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| {
            get(key).with_context(|| format!("{key} must be set"))
        };

        let channel_access_token = required("CHANNEL_ACCESS_TOKEN")?;
        let channel_secret = required("CHANNEL_SECRET")?;
        let odds_api_key = get("ODDS_API_KEY");

        let host = get("BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let host = IpAddr::from_str(&host)
            .with_context(|| format!("Invalid BIND_HOST: {host} (expected an IP address)"))?;
        let port = parse_or("PORT", get("PORT"), 8000u16)?;

        let timeout_secs = parse_or("MLBBOT_HTTP_TIMEOUT_SECS", get("MLBBOT_HTTP_TIMEOUT_SECS"), 10u64)?;
        if timeout_secs == 0 {
            return Err(anyhow!("MLBBOT_HTTP_TIMEOUT_SECS must be at least 1"));
        }

        let log_level = parse_or("MLBBOT_LOG", get("MLBBOT_LOG"), LevelFilter::Info)?;

        Ok(Self {
            channel_access_token,
            channel_secret,
            odds_api_key,
            bind_addr: SocketAddr::new(host, port),
            time_zone: get("MLBBOT_TIMEZONE").unwrap_or_else(|| DEFAULT_ZONE.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
            schedule_url: get("MLB_SCHEDULE_URL").unwrap_or_else(|| MLB_SCHEDULE.to_string()),
            odds_url: get("ODDS_API_URL").unwrap_or_else(|| ODDS_API_MLB.to_string()),
            line_api_url: get("LINE_API_URL").unwrap_or_else(|| LINE_API.to_string()),
            log_level,
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid {key}: {raw} ({e})")),
    }
}
