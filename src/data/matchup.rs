use thiserror::Error;

use super::records::{ClubMatchKpis, ClubSide, MatchOverview};

// ---------------------------------------------------------------------------
// One fixture with both clubs' KPI rows side by side
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchupError {
    #[error("No match selected. Please go back to the Matchday page.")]
    NoSelection,
    #[error("match_id not found in matchday_overview_gold: '{0}'")]
    FixtureNotFound(String),
    #[error("match_id not found in club_match_kpis_gold: '{0}'")]
    KpisNotFound(String),
    #[error("Expected one home row and one away row for match_id = '{0}'")]
    MissingSide(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matchup<'a> {
    pub fixture: &'a MatchOverview,
    pub home: &'a ClubMatchKpis,
    pub away: &'a ClubMatchKpis,
}

impl<'a> Matchup<'a> {
    /// Pair the fixture `match_id` with its home and away KPI rows. The
    /// first row wins when a side appears more than once.
    pub fn find(
        matches: &'a [MatchOverview],
        kpis: &'a [ClubMatchKpis],
        match_id: &str,
    ) -> Result<Self, MatchupError> {
        if match_id.is_empty() {
            return Err(MatchupError::NoSelection);
        }
        let fixture = matches
            .iter()
            .find(|m| m.match_id == match_id)
            .ok_or_else(|| MatchupError::FixtureNotFound(match_id.to_string()))?;

        let rows: Vec<&ClubMatchKpis> = kpis.iter().filter(|k| k.match_id == match_id).collect();
        if rows.is_empty() {
            return Err(MatchupError::KpisNotFound(match_id.to_string()));
        }
        let side = |side: ClubSide| {
            rows.iter()
                .copied()
                .find(|k| k.club_side == Some(side))
                .ok_or_else(|| MatchupError::MissingSide(match_id.to_string()))
        };

        Ok(Matchup {
            fixture,
            home: side(ClubSide::Home)?,
            away: side(ClubSide::Away)?,
        })
    }

    pub fn kpis(&self, side: ClubSide) -> &'a ClubMatchKpis {
        match side {
            ClubSide::Home => self.home,
            ClubSide::Away => self.away,
        }
    }

    /// KPI club name, else the fixture's name for that side.
    pub fn club_name(&self, side: ClubSide) -> &'a str {
        let fallback = match side {
            ClubSide::Home => self.fixture.home_club_name.as_str(),
            ClubSide::Away => self.fixture.away_club_name.as_str(),
        };
        self.kpis(side).club_name.as_deref().unwrap_or(fallback)
    }

    pub fn club_id(&self, side: ClubSide) -> Option<&'a str> {
        match side {
            ClubSide::Home => self.fixture.home_club_id.as_deref(),
            ClubSide::Away => self.fixture.away_club_id.as_deref(),
        }
    }

    /// Final score, or `-` before kickoff.
    pub fn score(&self) -> &'a str {
        self.fixture.result_string.as_deref().unwrap_or("-")
    }

    /// "15 Aug 2025 , 21:00" with absent parts left out.
    pub fn meta_line(&self) -> String {
        let date = self
            .fixture
            .match_date
            .map(|d| d.format("%d %b %Y").to_string());
        [date, self.fixture.kickoff_time.clone()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" , ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn fixture() -> MatchOverview {
        MatchOverview {
            match_id: "4601".into(),
            matchday: Some(1),
            home_club_id: Some("368".into()),
            away_club_id: Some("621".into()),
            home_club_name: "Sevilla FC".into(),
            away_club_name: "Athletic Club".into(),
            match_date: NaiveDate::from_ymd_opt(2025, 8, 15).and_then(|d| d.and_hms_opt(0, 0, 0)),
            kickoff_time: Some("21:00".into()),
            result_string: Some("2:1".into()),
            season: None,
            competition: None,
        }
    }

    fn kpi(match_id: &str, side: ClubSide, name: Option<&str>, used: f64) -> ClubMatchKpis {
        ClubMatchKpis {
            match_id: match_id.into(),
            club_side: Some(side),
            club_name: name.map(Into::into),
            players_used: Some(used),
            ..Default::default()
        }
    }

    #[test]
    fn pairs_home_and_away_rows() {
        let matches = vec![fixture()];
        let kpis = vec![
            kpi("4600", ClubSide::Home, None, 1.0),
            kpi("4601", ClubSide::Away, Some("Athletic"), 15.0),
            kpi("4601", ClubSide::Home, None, 16.0),
            kpi("4601", ClubSide::Home, None, 99.0),
        ];
        let m = Matchup::find(&matches, &kpis, "4601").unwrap();
        assert_eq!(m.home.players_used, Some(16.0));
        assert_eq!(m.away.players_used, Some(15.0));
        assert_eq!(m.club_name(ClubSide::Home), "Sevilla FC");
        assert_eq!(m.club_name(ClubSide::Away), "Athletic");
        assert_eq!(m.club_id(ClubSide::Away), Some("621"));
        assert_eq!(m.score(), "2:1");
        assert_eq!(m.meta_line(), "15 Aug 2025 , 21:00");
    }

    #[test]
    fn each_lookup_failure_is_distinct() {
        let matches = vec![fixture()];
        let kpis = vec![kpi("4601", ClubSide::Home, None, 16.0)];

        assert_eq!(
            Matchup::find(&matches, &kpis, "").unwrap_err(),
            MatchupError::NoSelection
        );
        assert_eq!(
            Matchup::find(&matches, &kpis, "1").unwrap_err(),
            MatchupError::FixtureNotFound("1".into())
        );
        assert_eq!(
            Matchup::find(&matches, &[], "4601").unwrap_err(),
            MatchupError::KpisNotFound("4601".into())
        );
        assert_eq!(
            Matchup::find(&matches, &kpis, "4601").unwrap_err(),
            MatchupError::MissingSide("4601".into())
        );
    }
}
