/// What the bot should answer with, decided from the message text alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TodayGames,
    TomorrowGames,
    TomorrowOdds,
    /// Anything unrecognized, carrying the trimmed text.
    Echo(String),
}

// Traditional and simplified spellings of each command.
const TODAY_GAMES: [&str; 2] = ["今日賽事", "今日赛事"];
const TOMORROW_GAMES: [&str; 2] = ["明日賽事", "明日赛事"];
const TOMORROW_ODDS: [&str; 2] = ["明日賠率", "明日赔率"];

/// Map message text to a command. Exact match after trimming; never fails.
pub fn dispatch(text: &str) -> Command {
    let text = text.trim();
    match text {
        t if TODAY_GAMES.contains(&t) => Command::TodayGames,
        t if TOMORROW_GAMES.contains(&t) => Command::TomorrowGames,
        t if TOMORROW_ODDS.contains(&t) => Command::TomorrowOdds,
        t => Command::Echo(t.to_string()),
    }
}
