use std::fmt;

// ---------------------------------------------------------------------------
// Dataset keys and their candidate file names
// ---------------------------------------------------------------------------

/// Datasets the dashboard pages know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKey {
    MatchdayOverview,
    ClubMatchKpis,
    Clubs,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 3] = [
        DatasetKey::MatchdayOverview,
        DatasetKey::ClubMatchKpis,
        DatasetKey::Clubs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKey::MatchdayOverview => "matchday_overview_gold",
            DatasetKey::ClubMatchKpis => "club_match_kpis_gold",
            DatasetKey::Clubs => "clubs_silver",
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate set: dataset key → acceptable file names, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for Catalog {
    /// Every [`DatasetKey`] as `<key>.parquet`, then `<key>.csv`.
    fn default() -> Self {
        Catalog::new(DatasetKey::ALL.iter().map(|key| {
            let name = key.as_str();
            (name, vec![format!("{name}.parquet"), format!("{name}.csv")])
        }))
    }
}

impl Catalog {
    pub fn new<K, F>(entries: impl IntoIterator<Item = (K, Vec<F>)>) -> Self
    where
        K: Into<String>,
        F: Into<String>,
    {
        Catalog {
            entries: entries
                .into_iter()
                .map(|(k, files)| (k.into(), files.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    pub fn candidates(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, files)| files.as_slice())
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_prefers_parquet() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.candidates("clubs_silver").unwrap(),
            &["clubs_silver.parquet".to_string(), "clubs_silver.csv".to_string()]
        );
        assert_eq!(catalog.keys().len(), 3);
        assert!(catalog.candidates("players_bronze").is_none());
    }
}
