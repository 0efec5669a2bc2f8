use std::collections::BTreeSet;

use thiserror::Error;

use super::records::{MatchOverview, Schedule};

// ---------------------------------------------------------------------------
// Matchday selection: season → competition → matchday
// ---------------------------------------------------------------------------

/// What the user picked in the sidebar. `None` means "use the default":
/// the latest season, all competitions, the latest matchday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchdaySelection {
    pub season: Option<String>,
    pub competition: Option<String>,
    pub matchday: Option<i64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("No matchdays found after filters.")]
pub struct NoMatchdays;

/// The fixtures of one matchday plus the options that led there.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchdayView<'a> {
    pub seasons: Vec<String>,
    pub season: Option<String>,
    pub competitions: Vec<String>,
    pub competition: Option<String>,
    pub matchdays: Vec<i64>,
    pub matchday: i64,
    /// Sorted by date, then kickoff time; missing values last.
    pub fixtures: Vec<&'a MatchOverview>,
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a String>>) -> Vec<String> {
    values
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl<'a> MatchdayView<'a> {
    /// Apply `selection` to the schedule. Selections that are no longer
    /// available fall back to the defaults. With a `season` column present
    /// only rows of the chosen season remain, none if no season is set.
    pub fn build(
        schedule: &'a Schedule,
        selection: &MatchdaySelection,
    ) -> Result<Self, NoMatchdays> {
        let matches = &schedule.matches;
        let seasons = distinct(matches.iter().map(|m| m.season.as_ref()));
        let season = selection
            .season
            .clone()
            .filter(|s| seasons.contains(s))
            .or_else(|| seasons.last().cloned());
        let in_season: Vec<&MatchOverview> = matches
            .iter()
            .filter(|m| !schedule.has_season || (season.is_some() && m.season == season))
            .collect();

        let competitions = distinct(in_season.iter().map(|m| m.competition.as_ref()));
        let competition = selection
            .competition
            .clone()
            .filter(|c| competitions.contains(c));
        let selected: Vec<&MatchOverview> = in_season
            .into_iter()
            .filter(|m| competition.is_none() || m.competition == competition)
            .collect();

        let matchdays: Vec<i64> = selected
            .iter()
            .filter_map(|m| m.matchday)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let matchday = selection
            .matchday
            .filter(|md| matchdays.contains(md))
            .or_else(|| matchdays.last().copied())
            .ok_or(NoMatchdays)?;

        let mut fixtures: Vec<&MatchOverview> = selected
            .into_iter()
            .filter(|m| m.matchday == Some(matchday))
            .collect();
        fixtures.sort_by(|a, b| {
            (a.match_date.is_none(), a.match_date, a.kickoff_time.is_none(), &a.kickoff_time).cmp(&(
                b.match_date.is_none(),
                b.match_date,
                b.kickoff_time.is_none(),
                &b.kickoff_time,
            ))
        });

        Ok(MatchdayView {
            seasons,
            season,
            competitions,
            competition,
            matchdays,
            matchday,
            fixtures,
        })
    }

    /// "2025-26 , Matchday 3 , LaLiga" with absent parts left out.
    pub fn title(&self) -> String {
        let mut bits = Vec::new();
        if let Some(season) = &self.season {
            bits.push(season.clone());
        }
        bits.push(format!("Matchday {}", self.matchday));
        if let Some(competition) = &self.competition {
            bits.push(competition.clone());
        }
        bits.join(" , ")
    }

    /// KPI chip for the dates covered: `("Date", day)` when every dated
    /// fixture is on the same day, else `("Dates", "first to last")`.
    pub fn date_span(&self) -> Option<(&'static str, String)> {
        let dates = self.fixtures.iter().filter_map(|m| m.match_date);
        let first = dates.clone().min()?;
        let last = dates.max()?;
        if first.date() == last.date() {
            Some(("Date", first.format("%Y-%m-%d").to_string()))
        } else {
            Some((
                "Dates",
                format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d")),
            ))
        }
    }

    /// Whether any fixture carries club ids for logos.
    pub fn has_logo_ids(&self) -> bool {
        self.fixtures
            .iter()
            .any(|m| m.home_club_id.is_some() || m.away_club_id.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2025, 8, day).and_then(|d| d.and_hms_opt(hour, 0, 0))
    }

    fn fixture(id: &str, season: &str, comp: &str, md: i64, date: Option<NaiveDateTime>) -> MatchOverview {
        MatchOverview {
            match_id: id.into(),
            matchday: Some(md),
            home_club_id: None,
            away_club_id: None,
            home_club_name: format!("Home {id}"),
            away_club_name: format!("Away {id}"),
            match_date: date,
            kickoff_time: None,
            result_string: None,
            season: Some(season.into()),
            competition: Some(comp.into()),
        }
    }

    fn season() -> Schedule {
        let matches = vec![
            fixture("1", "2024-25", "LaLiga", 38, at(1, 18)),
            fixture("2", "2025-26", "LaLiga", 1, at(15, 21)),
            fixture("3", "2025-26", "LaLiga", 1, None),
            fixture("4", "2025-26", "LaLiga", 1, at(15, 19)),
            fixture("5", "2025-26", "LaLiga", 2, at(23, 17)),
            fixture("6", "2025-26", "Copa", 1, at(3, 20)),
        ];
        Schedule {
            matches,
            has_season: true,
        }
    }

    #[test]
    fn defaults_to_latest_season_and_matchday() {
        let schedule = season();
        let view = MatchdayView::build(&schedule, &MatchdaySelection::default()).unwrap();
        assert_eq!(view.seasons, vec!["2024-25", "2025-26"]);
        assert_eq!(view.season.as_deref(), Some("2025-26"));
        assert_eq!(view.competitions, vec!["Copa", "LaLiga"]);
        assert_eq!(view.competition, None);
        assert_eq!(view.matchdays, vec![1, 2]);
        assert_eq!(view.matchday, 2);
        assert_eq!(view.title(), "2025-26 , Matchday 2");
    }

    #[test]
    fn fixtures_sort_by_date_with_missing_dates_last() {
        let schedule = season();
        let selection = MatchdaySelection {
            competition: Some("LaLiga".into()),
            matchday: Some(1),
            ..Default::default()
        };
        let view = MatchdayView::build(&schedule, &selection).unwrap();
        let ids: Vec<&str> = view.fixtures.iter().map(|m| m.match_id.as_str()).collect();
        assert_eq!(ids, vec!["4", "2", "3"]);
        assert_eq!(view.title(), "2025-26 , Matchday 1 , LaLiga");
        assert_eq!(view.date_span(), Some(("Date", "2025-08-15".to_string())));
    }

    #[test]
    fn span_over_several_days() {
        let schedule = season();
        let selection = MatchdaySelection {
            matchday: Some(1),
            ..Default::default()
        };
        let view = MatchdayView::build(&schedule, &selection).unwrap();
        assert_eq!(view.fixtures.len(), 4);
        assert_eq!(
            view.date_span(),
            Some(("Dates", "2025-08-03 to 2025-08-15".to_string()))
        );
    }

    #[test]
    fn stale_selection_falls_back_to_defaults() {
        let schedule = season();
        let selection = MatchdaySelection {
            season: Some("1999-00".into()),
            competition: Some("Supercopa".into()),
            matchday: Some(40),
        };
        let view = MatchdayView::build(&schedule, &selection).unwrap();
        assert_eq!(view.season.as_deref(), Some("2025-26"));
        assert_eq!(view.competition, None);
        assert_eq!(view.matchday, 2);
    }

    #[test]
    fn no_matchdays_is_an_error() {
        let mut schedule = season();
        for m in &mut schedule.matches {
            m.matchday = None;
        }
        assert_eq!(
            MatchdayView::build(&schedule, &MatchdaySelection::default()).unwrap_err(),
            NoMatchdays
        );
    }

    #[test]
    fn season_column_without_values_leaves_no_matchdays() {
        let mut schedule = season();
        for m in &mut schedule.matches {
            m.season = None;
        }
        assert_eq!(
            MatchdayView::build(&schedule, &MatchdaySelection::default()).unwrap_err(),
            NoMatchdays
        );

        // without the column the season filter is skipped
        schedule.has_season = false;
        let view = MatchdayView::build(&schedule, &MatchdaySelection::default()).unwrap();
        assert_eq!(view.season, None);
        assert_eq!(view.matchdays, vec![1, 2, 38]);
        assert_eq!(view.matchday, 38);
    }
}
