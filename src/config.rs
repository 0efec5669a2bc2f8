use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Static configuration: where data and assets live
// ---------------------------------------------------------------------------

/// Environment variable that overrides the default data directories.
pub const DATA_ROOT_ENV: &str = "DATA_ROOT";

/// Sub-directory of a data root holding the published gold/silver files.
pub const PROCESSED_SUBDIR: &str = "processed";

/// Directory with club logos, named `{club_id}.png`.
pub const CLUB_LOGO_DIR: &str = "assets/clubs";

/// Upper bound on the file names listed per directory in not-found errors.
pub const PRESENT_SAMPLE_LIMIT: usize = 10;

/// Ordered list of directories searched for dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDirs {
    dirs: Vec<PathBuf>,
}

impl SearchDirs {
    /// Read `DATA_ROOT` from the environment.
    pub fn from_env() -> Self {
        let root = std::env::var(DATA_ROOT_ENV).ok();
        Self::with_override(root.as_deref())
    }

    /// `{root}/processed` then `{root}` when `root` is non-empty, otherwise
    /// the conventional defaults.
    pub fn with_override(root: Option<&str>) -> Self {
        match root.map(str::trim).filter(|r| !r.is_empty()) {
            Some(root) => Self::rooted_at(Path::new(root)),
            None => Self::defaults(),
        }
    }

    /// Search only below `root`.
    pub fn rooted_at(root: &Path) -> Self {
        SearchDirs {
            dirs: vec![root.join(PROCESSED_SUBDIR), root.to_path_buf()],
        }
    }

    /// `data/processed`, `data`, then the same pair next to the executable.
    pub fn defaults() -> Self {
        let mut dirs = vec![PathBuf::from("data").join(PROCESSED_SUBDIR), PathBuf::from("data")];
        let app_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        if let Some(app_dir) = app_dir {
            let app_data = app_dir.join("data");
            dirs.push(app_data.join(PROCESSED_SUBDIR));
            dirs.push(app_data);
        }
        SearchDirs { dirs }
    }

    pub fn from_dirs(dirs: Vec<PathBuf>) -> Self {
        SearchDirs { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_root_comes_first_and_replaces_defaults() {
        let dirs = SearchDirs::with_override(Some("/srv/football"));
        assert_eq!(
            dirs.dirs(),
            &[
                PathBuf::from("/srv/football/processed"),
                PathBuf::from("/srv/football")
            ]
        );
    }

    #[test]
    fn empty_override_falls_back_to_defaults() {
        for root in [None, Some(""), Some("   ")] {
            let dirs = SearchDirs::with_override(root);
            assert_eq!(dirs.dirs()[0], PathBuf::from("data/processed"));
            assert_eq!(dirs.dirs()[1], PathBuf::from("data"));
            assert!(dirs.dirs().len() <= 4);
        }
    }

    #[test]
    fn data_root_is_read_from_the_environment() {
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var(DATA_ROOT_ENV, tmp.path());
        let dirs = SearchDirs::from_env();
        std::env::remove_var(DATA_ROOT_ENV);

        assert_eq!(
            dirs.dirs(),
            &[tmp.path().join(PROCESSED_SUBDIR), tmp.path().to_path_buf()]
        );
    }
}
