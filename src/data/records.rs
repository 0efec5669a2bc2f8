use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

use super::catalog::DatasetKey;
use super::ids::{clean_text, id_from_value};
use super::model::{Row, Table, Value};

// ---------------------------------------------------------------------------
// Typed records – one struct per dataset, optional columns as Option
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("{dataset} is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        dataset: DatasetKey,
        columns: Vec<String>,
    },
}

fn require(table: &Table, dataset: DatasetKey, required: &[&str]) -> Result<(), RecordError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RecordError::MissingColumns {
            dataset,
            columns: missing,
        })
    }
}

fn text(row: &Row<'_>, col: &str) -> Option<String> {
    Some(clean_text(row.get(col))).filter(|s| !s.is_empty())
}

fn float(row: &Row<'_>, col: &str) -> Option<f64> {
    row.get(col).and_then(Value::as_f64)
}

/// Which side of the fixture a club played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClubSide {
    Home,
    Away,
}

impl ClubSide {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Some(ClubSide::Home),
            "away" => Some(ClubSide::Away),
            _ => None,
        }
    }
}

impl fmt::Display for ClubSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClubSide::Home => f.write_str("home"),
            ClubSide::Away => f.write_str("away"),
        }
    }
}

/// One row of `matchday_overview_gold`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOverview {
    pub match_id: String,
    pub matchday: Option<i64>,
    pub home_club_id: Option<String>,
    pub away_club_id: Option<String>,
    pub home_club_name: String,
    pub away_club_name: String,
    pub match_date: Option<NaiveDateTime>,
    pub kickoff_time: Option<String>,
    pub result_string: Option<String>,
    pub season: Option<String>,
    pub competition: Option<String>,
}

impl MatchOverview {
    pub const REQUIRED: [&'static str; 4] =
        ["match_id", "matchday", "home_club_name", "away_club_name"];

    pub fn from_table(table: &Table) -> Result<Vec<Self>, RecordError> {
        require(table, DatasetKey::MatchdayOverview, &Self::REQUIRED)?;
        Ok(table
            .rows()
            .map(|row| MatchOverview {
                match_id: id_from_value(row.get("match_id")),
                matchday: row.get("matchday").and_then(Value::as_i64),
                home_club_id: Some(id_from_value(row.get("home_club_id")))
                    .filter(|s| !s.is_empty()),
                away_club_id: Some(id_from_value(row.get("away_club_id")))
                    .filter(|s| !s.is_empty()),
                home_club_name: text(&row, "home_club_name").unwrap_or_else(|| "Home".into()),
                away_club_name: text(&row, "away_club_name").unwrap_or_else(|| "Away".into()),
                match_date: row.get("match_date").and_then(Value::as_datetime),
                kickoff_time: text(&row, "kickoff_time"),
                result_string: text(&row, "result_string"),
                season: text(&row, "season"),
                competition: text(&row, "competition"),
            })
            .collect())
    }
}

/// All of `matchday_overview_gold`, plus which optional filter columns
/// the table carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schedule {
    pub matches: Vec<MatchOverview>,
    /// A `season` column exists, even if every cell in it is null.
    pub has_season: bool,
}

impl Schedule {
    pub fn from_table(table: &Table) -> Result<Self, RecordError> {
        Ok(Schedule {
            matches: MatchOverview::from_table(table)?,
            has_season: table.has_column("season"),
        })
    }
}

/// One row of `club_match_kpis_gold`: a club's squad metrics in one match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClubMatchKpis {
    pub match_id: String,
    pub club_side: Option<ClubSide>,
    pub club_id: Option<String>,
    pub club_name: Option<String>,
    pub players_total_squad: Option<f64>,
    pub players_available: Option<f64>,
    pub players_used: Option<f64>,
    pub usage_rate: Option<f64>,
    pub pct_available: Option<f64>,
    pub pct_matchday: Option<f64>,
    pub pct_deployed: Option<f64>,
    pub avg_age_used: Option<f64>,
    pub weighted_age_used: Option<f64>,
    pub avg_market_value_used: Option<f64>,
    pub weighted_market_value_used: Option<f64>,
    pub deployed_squad_market_value: Option<f64>,
}

impl ClubMatchKpis {
    pub const REQUIRED: [&'static str; 2] = ["match_id", "club_side"];

    pub fn from_table(table: &Table) -> Result<Vec<Self>, RecordError> {
        require(table, DatasetKey::ClubMatchKpis, &Self::REQUIRED)?;
        Ok(table
            .rows()
            .map(|row| ClubMatchKpis {
                match_id: id_from_value(row.get("match_id")),
                club_side: text(&row, "club_side").and_then(|s| ClubSide::parse(&s)),
                club_id: Some(id_from_value(row.get("club_id"))).filter(|s| !s.is_empty()),
                club_name: text(&row, "club_name"),
                players_total_squad: float(&row, "players_total_squad"),
                players_available: float(&row, "players_available"),
                players_used: float(&row, "players_used"),
                usage_rate: float(&row, "usage_rate"),
                pct_available: float(&row, "pct_available"),
                pct_matchday: float(&row, "pct_matchday"),
                pct_deployed: float(&row, "pct_deployed"),
                avg_age_used: float(&row, "avg_age_used"),
                weighted_age_used: float(&row, "weighted_age_used"),
                avg_market_value_used: float(&row, "avg_market_value_used"),
                weighted_market_value_used: float(&row, "weighted_market_value_used"),
                deployed_squad_market_value: float(&row, "deployed_squad_market_value"),
            })
            .collect())
    }

    /// Squad utilization shares, each a fraction of the registered squad.
    pub fn shares(&self) -> [(&'static str, Option<f64>); 3] {
        [
            ("Share of squad available", self.pct_available),
            ("Share of squad in matchday squad", self.pct_matchday),
            ("Share of squad deployed", self.pct_deployed),
        ]
    }
}

/// One row of `clubs_silver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub club_id: String,
    pub club_name: Option<String>,
}

impl Club {
    pub fn from_table(table: &Table) -> Result<Vec<Self>, RecordError> {
        require(table, DatasetKey::Clubs, &["club_id"])?;
        Ok(table
            .rows()
            .map(|row| Club {
                club_id: id_from_value(row.get("club_id")),
                club_name: text(&row, "club_name"),
            })
            .collect())
    }
}
