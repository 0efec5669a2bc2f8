use std::path::{Path, PathBuf};

use crate::config::{SearchDirs, PRESENT_SAMPLE_LIMIT};

use super::catalog::Catalog;
use super::error::DataError;

// ---------------------------------------------------------------------------
// Dataset locator: key → first existing file
// ---------------------------------------------------------------------------

/// Finds the file backing a dataset key.
#[derive(Debug, Clone)]
pub struct Locator {
    dirs: SearchDirs,
    catalog: Catalog,
}

impl Locator {
    pub fn new(dirs: SearchDirs, catalog: Catalog) -> Self {
        Locator { dirs, catalog }
    }

    pub fn search_dirs(&self) -> &SearchDirs {
        &self.dirs
    }

    /// Fail with [`DataError::UnknownKey`] unless `key` is in the catalog.
    pub fn check_key(&self, key: &str) -> Result<&[String], DataError> {
        self.catalog
            .candidates(key)
            .ok_or_else(|| DataError::UnknownKey {
                key: key.to_string(),
                valid: self.catalog.keys(),
            })
    }

    /// Return the first existing `dir/file`, directories in the outer loop
    /// and candidate file names in the inner loop.
    pub fn resolve(&self, key: &str) -> Result<PathBuf, DataError> {
        let candidates = self.check_key(key)?;

        for dir in self.dirs.dirs() {
            for file in candidates {
                let path = dir.join(file);
                if path.is_file() {
                    log::debug!("Resolved '{key}' to {}", path.display());
                    return Ok(path);
                }
            }
        }

        let attempted: Vec<PathBuf> = self
            .dirs
            .dirs()
            .iter()
            .flat_map(|dir| candidates.iter().map(move |file| dir.join(file)))
            .collect();
        let present = self
            .dirs
            .dirs()
            .iter()
            .filter(|dir| dir.is_dir())
            .map(|dir| (dir.clone(), sample_files(dir, PRESENT_SAMPLE_LIMIT)))
            .collect();

        Err(DataError::NotFound {
            key: key.to_string(),
            attempted,
            present,
        })
    }
}

/// Sorted sample of at most `limit` file names in `dir`; unreadable entries
/// are skipped.
fn sample_files(dir: &Path, limit: usize) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names.truncate(limit);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"club_id\n1\n").unwrap();
    }

    fn clubs_catalog() -> Catalog {
        Catalog::new([("clubs_silver", vec!["clubs_silver.parquet", "clubs_silver.csv"])])
    }

    #[test]
    fn unknown_key_lists_valid_keys() {
        let locator = Locator::new(
            SearchDirs::from_dirs(vec![PathBuf::from("/definitely/not/here")]),
            Catalog::default(),
        );
        let err = locator.resolve("players_bronze").unwrap_err();
        match &err {
            DataError::UnknownKey { key, valid } => {
                assert_eq!(key, "players_bronze");
                assert_eq!(valid.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("matchday_overview_gold"));
    }

    #[test]
    fn directory_priority_beats_file_priority() {
        let tmp = tempfile::tempdir().unwrap();
        let processed = tmp.path().join("processed");
        // csv in the first directory, parquet in the second
        touch(&processed.join("clubs_silver.csv"));
        touch(&tmp.path().join("clubs_silver.parquet"));

        let locator = Locator::new(SearchDirs::rooted_at(tmp.path()), clubs_catalog());
        assert_eq!(
            locator.resolve("clubs_silver").unwrap(),
            processed.join("clubs_silver.csv")
        );
    }

    #[test]
    fn first_filename_wins_within_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("clubs_silver.parquet"));
        touch(&tmp.path().join("clubs_silver.csv"));

        let locator = Locator::new(SearchDirs::rooted_at(tmp.path()), clubs_catalog());
        assert_eq!(
            locator.resolve("clubs_silver").unwrap(),
            tmp.path().join("clubs_silver.parquet")
        );
    }

    #[test]
    fn override_root_is_searched_before_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("clubs_silver.csv"));

        let root = tmp.path().to_str().unwrap();
        let locator = Locator::new(SearchDirs::with_override(Some(root)), clubs_catalog());
        assert_eq!(
            locator.resolve("clubs_silver").unwrap(),
            tmp.path().join("clubs_silver.csv")
        );
    }

    #[test]
    fn only_csv_in_data_dir_resolves_to_it() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("data");
        touch(&data.join("clubs_silver.csv"));

        let dirs = SearchDirs::from_dirs(vec![data.join("processed"), data.clone()]);
        let locator = Locator::new(dirs, clubs_catalog());
        assert_eq!(
            locator.resolve("clubs_silver").unwrap(),
            data.join("clubs_silver.csv")
        );
    }

    #[test]
    fn not_found_lists_every_attempt_and_a_capped_sample() {
        let tmp = tempfile::tempdir().unwrap();
        for i in 0..15 {
            touch(&tmp.path().join(format!("other_{i:02}.csv")));
        }

        let locator = Locator::new(SearchDirs::rooted_at(tmp.path()), clubs_catalog());
        let err = locator.resolve("clubs_silver").unwrap_err();
        let message = err.to_string();
        match err {
            DataError::NotFound {
                attempted, present, ..
            } => {
                // 2 directories × 2 file names
                assert_eq!(attempted.len(), 4);
                for path in &attempted {
                    assert!(message.contains(&path.display().to_string()));
                }
                // processed/ does not exist, so only the root is sampled
                assert_eq!(present.len(), 1);
                assert_eq!(present[0].1.len(), PRESENT_SAMPLE_LIMIT);
                assert_eq!(present[0].1[0], "other_00.csv");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
