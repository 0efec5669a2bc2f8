use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::assets::LogoStore;
use crate::config::SearchDirs;
use crate::data::cache::DatasetCache;
use crate::data::catalog::{Catalog, DatasetKey};
use crate::data::filter::MatchdaySelection;
use crate::data::ids::normalize_id;
use crate::data::locator::Locator;
use crate::data::model::Table;
use crate::data::records::{Club, ClubMatchKpis, RecordError, Schedule};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    MatchdayOverview,
    MatchAnalysis,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::MatchdayOverview, Page::MatchAnalysis];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Homepage",
            Page::MatchdayOverview => "Matchday overview",
            Page::MatchAnalysis => "Match analysis",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Page shown in the central panel.
    pub page: Page,

    /// Read-through cache of the gold/silver tables.
    pub cache: DatasetCache,

    /// Data root picked at runtime, overriding `DATA_ROOT`.
    pub data_root: Option<PathBuf>,

    /// Club logo lookup.
    pub logos: LogoStore,

    /// Sidebar filters of the matchday page.
    pub selection: MatchdaySelection,

    /// Match opened on the analysis page (normalized id).
    pub selected_match_id: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Typed records built from the current cache, errors included.
    records: Records,
}

/// Outcome of building one record set, kept until the cache is replaced.
type Memo<T> = Option<Result<Arc<T>, String>>;

#[derive(Default)]
struct Records {
    schedule: Memo<Schedule>,
    kpis: Memo<Vec<ClubMatchKpis>>,
    clubs: Memo<Vec<Club>>,
}

/// Build the records for `key` once per cache; later calls, failed ones
/// too, are answered from `memo` without touching the disk.
fn memoized<T>(
    memo: &mut Memo<T>,
    cache: &DatasetCache,
    key: DatasetKey,
    parse: impl FnOnce(&Table) -> Result<T, RecordError>,
) -> Result<Arc<T>> {
    let outcome = memo.get_or_insert_with(|| {
        let table = cache
            .load(key.as_str())
            .with_context(|| format!("loading {key}"))
            .map_err(|e| format!("{e:#}"))?;
        let records = parse(table.as_ref()).map_err(|e| e.to_string())?;
        log::debug!("Built records for '{key}'");
        Ok(Arc::new(records))
    });
    outcome.clone().map_err(anyhow::Error::msg)
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchDirs::from_env())
    }
}

impl AppState {
    pub fn new(dirs: SearchDirs) -> Self {
        Self {
            page: Page::Home,
            cache: Self::fresh_cache(dirs),
            data_root: None,
            logos: LogoStore::default(),
            selection: MatchdaySelection::default(),
            selected_match_id: None,
            status_message: None,
            records: Records::default(),
        }
    }

    fn fresh_cache(dirs: SearchDirs) -> DatasetCache {
        log::info!("Searching datasets in {:?}", dirs.dirs());
        DatasetCache::new(Locator::new(dirs, Catalog::default()))
    }

    pub fn load_schedule(&mut self) -> Result<Arc<Schedule>> {
        memoized(
            &mut self.records.schedule,
            &self.cache,
            DatasetKey::MatchdayOverview,
            Schedule::from_table,
        )
    }

    pub fn load_kpis(&mut self) -> Result<Arc<Vec<ClubMatchKpis>>> {
        memoized(
            &mut self.records.kpis,
            &self.cache,
            DatasetKey::ClubMatchKpis,
            ClubMatchKpis::from_table,
        )
    }

    pub fn load_clubs(&mut self) -> Result<Arc<Vec<Club>>> {
        memoized(
            &mut self.records.clubs,
            &self.cache,
            DatasetKey::Clubs,
            Club::from_table,
        )
    }

    /// Replace the cache; records built from the old one are dropped.
    fn replace_cache(&mut self, dirs: SearchDirs) {
        self.cache = Self::fresh_cache(dirs);
        self.records = Records::default();
        self.status_message = None;
    }

    /// Switch to the analysis page for `match_id`.
    pub fn open_match(&mut self, match_id: &str) {
        self.selected_match_id = Some(normalize_id(match_id));
        self.page = Page::MatchAnalysis;
    }

    /// Leave the analysis page and clear the selected match.
    pub fn back_to_matchday(&mut self) {
        self.selected_match_id = None;
        self.page = Page::MatchdayOverview;
    }

    /// Search only below `root` from now on, with an empty cache.
    pub fn set_data_root(&mut self, root: PathBuf) {
        log::info!("Data root set to {}", root.display());
        self.replace_cache(SearchDirs::rooted_at(&root));
        self.data_root = Some(root);
        self.selection = MatchdaySelection::default();
    }

    /// Drop every cached table so the next page render re-reads the files.
    pub fn reload(&mut self) {
        let dirs = self.cache.locator().search_dirs().clone();
        self.replace_cache(dirs);
    }

    /// Dataset keys currently held in memory.
    pub fn cached_keys(&self) -> Vec<DatasetKey> {
        DatasetKey::ALL
            .into_iter()
            .filter(|key| self.cache.is_cached(key.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_clubs(root: &std::path::Path) {
        std::fs::write(root.join("clubs_silver.csv"), "club_id,club_name\n418,Real Madrid\n131.0,\n")
            .unwrap();
    }

    #[test]
    fn open_match_normalizes_the_id() {
        let mut state = AppState::new(SearchDirs::from_dirs(Vec::new()));
        state.open_match("4601.0");
        assert_eq!(state.page, Page::MatchAnalysis);
        assert_eq!(state.selected_match_id.as_deref(), Some("4601"));

        state.back_to_matchday();
        assert_eq!(state.page, Page::MatchdayOverview);
        assert_eq!(state.selected_match_id, None);
    }

    #[test]
    fn reload_starts_from_an_empty_cache() {
        let tmp = tempfile::tempdir().unwrap();
        write_clubs(tmp.path());
        let mut state = AppState::new(SearchDirs::rooted_at(tmp.path()));

        state.cache.load("clubs_silver").unwrap();
        assert_eq!(state.cached_keys(), vec![DatasetKey::Clubs]);

        state.reload();
        assert!(state.cached_keys().is_empty());
        assert!(state.cache.load("clubs_silver").is_ok());
    }

    #[test]
    fn data_root_replaces_search_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        write_clubs(tmp.path());
        let mut state = AppState::new(SearchDirs::from_dirs(Vec::new()));
        assert!(state.cache.load("clubs_silver").is_err());

        state.set_data_root(tmp.path().to_path_buf());
        assert_eq!(
            state.cache.locator().search_dirs(),
            &SearchDirs::rooted_at(tmp.path())
        );
        assert!(state.cache.load("clubs_silver").is_ok());
    }

    #[test]
    fn clubs_load_as_records() {
        let tmp = tempfile::tempdir().unwrap();
        write_clubs(tmp.path());
        let mut state = AppState::new(SearchDirs::rooted_at(tmp.path()));
        let clubs = state.load_clubs().unwrap();
        assert_eq!(clubs.len(), 2);
        assert_eq!(clubs[1].club_id, "131");
        assert_eq!(clubs[1].club_name, None);
        assert!(Arc::ptr_eq(&clubs, &state.load_clubs().unwrap()));
    }

    #[test]
    fn missing_dataset_surfaces_as_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = AppState::new(SearchDirs::rooted_at(tmp.path()));
        let err = state.load_schedule().unwrap_err();
        assert!(format!("{err:#}").contains("could not find dataset 'matchday_overview_gold'"));
    }

    #[test]
    fn load_errors_are_kept_until_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = AppState::new(SearchDirs::rooted_at(tmp.path()));
        assert!(state.load_clubs().is_err());

        // the file appearing later is only seen after a reload
        write_clubs(tmp.path());
        let err = state.load_clubs().unwrap_err();
        assert!(err.to_string().contains("could not find dataset 'clubs_silver'"));
        assert!(state.cached_keys().is_empty());

        state.reload();
        assert_eq!(state.load_clubs().unwrap().len(), 2);
    }
}
