use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use log::warn;
use std::str::FromStr;

/// Zone the schedule and odds APIs partition games by.
pub const DEFAULT_ZONE: &str = "Asia/Taipei";

/// The time zone that decides which calendar day "today" and "tomorrow" are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CivilZone {
    Named(Tz),
    /// Degraded mode: the named zone could not be resolved.
    HostLocal,
}

impl Default for CivilZone {
    fn default() -> Self {
        CivilZone::Named(chrono_tz::Asia::Taipei)
    }
}

/// Resolve an IANA zone name, falling back to the host's local zone.
///
/// The fallback only happens when the name is unknown to the bundled zone
/// database. It is logged, since dates will then follow the server clock.
pub fn resolve_zone(name: &str) -> CivilZone {
    match Tz::from_str(name.trim()) {
        Ok(tz) => CivilZone::Named(tz),
        Err(e) => {
            warn!("time zone {name:?} unavailable ({e}); falling back to host local time");
            CivilZone::HostLocal
        }
    }
}

impl CivilZone {
    /// Calendar date of `instant` in this zone.
    pub fn civil_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            CivilZone::Named(tz) => instant.with_timezone(tz).date_naive(),
            CivilZone::HostLocal => instant.with_timezone(&Local).date_naive(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.civil_date(Utc::now())
    }

    pub fn tomorrow(&self) -> NaiveDate {
        next_day(self.today())
    }

    pub fn name(&self) -> String {
        match self {
            CivilZone::Named(tz) => tz.name().to_string(),
            CivilZone::HostLocal => "host local".to_string(),
        }
    }
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}
