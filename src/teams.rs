use std::collections::HashMap;

/// Full English team names as the schedule and odds APIs spell them, with the
/// names Taiwanese broadcasts use.
const MLB_TEAMS: &[(&str, &str)] = &[
    ("Arizona Diamondbacks", "響尾蛇"),
    ("Athletics", "運動家"),
    ("Oakland Athletics", "運動家"),
    ("Atlanta Braves", "勇士"),
    ("Baltimore Orioles", "金鶯"),
    ("Boston Red Sox", "紅襪"),
    ("Chicago Cubs", "小熊"),
    ("Chicago White Sox", "白襪"),
    ("Cincinnati Reds", "紅人"),
    ("Cleveland Guardians", "守護者"),
    ("Colorado Rockies", "洛磯"),
    ("Detroit Tigers", "老虎"),
    ("Houston Astros", "太空人"),
    ("Kansas City Royals", "皇家"),
    ("Los Angeles Angels", "天使"),
    ("Los Angeles Dodgers", "道奇"),
    ("Miami Marlins", "馬林魚"),
    ("Milwaukee Brewers", "釀酒人"),
    ("Minnesota Twins", "雙城"),
    ("New York Mets", "大都會"),
    ("New York Yankees", "洋基"),
    ("Philadelphia Phillies", "費城人"),
    ("Pittsburgh Pirates", "海盜"),
    ("San Diego Padres", "教士"),
    ("San Francisco Giants", "巨人"),
    ("Seattle Mariners", "水手"),
    ("St. Louis Cardinals", "紅雀"),
    ("Tampa Bay Rays", "光芒"),
    ("Texas Rangers", "遊騎兵"),
    ("Toronto Blue Jays", "藍鳥"),
    ("Washington Nationals", "國民"),
];

/// Read-only English → localized team name table, built once at startup.
#[derive(Debug, Clone)]
pub struct TeamNames {
    names: HashMap<&'static str, &'static str>,
}

impl Default for TeamNames {
    fn default() -> Self {
        Self::mlb()
    }
}

impl TeamNames {
    pub fn mlb() -> Self {
        Self { names: MLB_TEAMS.iter().copied().collect() }
    }

    /// Exact-match lookup; unknown names pass through unchanged.
    pub fn translate(&self, name: &str) -> String {
        self.names.get(name).map_or_else(|| name.to_string(), |n| n.to_string())
    }
}
