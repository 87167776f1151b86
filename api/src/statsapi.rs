/// MLB Stats API raw wire types — serde shapes for the schedule endpoint.
/// Endpoint: https://statsapi.mlb.com/api/v1/schedule?sportId=1&date=YYYY-MM-DD
/// These map to the clean `Game` type in client.rs.
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    /// Empty on days without games; otherwise one entry per requested date.
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleDate {
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleGame {
    pub teams: ScheduleTeams,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleTeams {
    pub away: ScheduleSide,
    pub home: ScheduleSide,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleSide {
    pub team: ScheduleTeam,
    /// Absent until first pitch.
    pub score: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleTeam {
    pub name: String,
}
