use std::path::{Path, PathBuf};

use crate::config::CLUB_LOGO_DIR;
use crate::data::ids::normalize_id;

/// Club logos stored as `{dir}/{club_id}.png`.
#[derive(Debug, Clone)]
pub struct LogoStore {
    dir: PathBuf,
}

impl Default for LogoStore {
    fn default() -> Self {
        LogoStore::new(CLUB_LOGO_DIR)
    }
}

impl LogoStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        LogoStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the logo for `club_id` if the file exists.
    pub fn logo_path(&self, club_id: &str) -> Option<PathBuf> {
        let id = normalize_id(club_id);
        if id.is_empty() {
            return None;
        }
        let path = self.dir.join(format!("{id}.png"));
        path.is_file().then_some(path)
    }

    /// `file://` URI for the egui image loaders.
    pub fn logo_uri(&self, club_id: &str) -> Option<String> {
        let path = self.logo_path(club_id)?;
        let path = path.canonicalize().unwrap_or(path);
        Some(format!("file://{}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_logos_by_normalized_id() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("418.png"), b"png").unwrap();
        let store = LogoStore::new(tmp.path());

        assert_eq!(store.logo_path("418.0"), Some(tmp.path().join("418.png")));
        assert_eq!(store.logo_path(" 418 "), Some(tmp.path().join("418.png")));
        assert_eq!(store.logo_path("131"), None);
        assert_eq!(store.logo_path(""), None);
        assert!(store.logo_uri("418").unwrap().starts_with("file://"));
    }
}
