use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures of the dataset locator and loader.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown dataset key '{key}' (valid keys: {})", .valid.join(", "))]
    UnknownKey { key: String, valid: Vec<String> },

    #[error(
        "could not find dataset '{key}'. Searched: [{}]{}",
        join_paths(.attempted),
        describe_present(.present)
    )]
    NotFound {
        key: String,
        attempted: Vec<PathBuf>,
        /// Sample of files present in each searched directory that exists.
        present: Vec<(PathBuf, Vec<String>)>,
    },

    #[error("unsupported file type '.{extension}' for {}", .path.display())]
    UnsupportedType { path: PathBuf, extension: String },

    #[error("failed to read {}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Parser-native failures, passed through untouched.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_present(present: &[(PathBuf, Vec<String>)]) -> String {
    present
        .iter()
        .map(|(dir, files)| format!("; {} contains [{}]", dir.display(), files.join(", ")))
        .collect()
}

impl DataError {
    pub(crate) fn malformed(path: &Path, source: impl Into<ParseError>) -> Self {
        DataError::Malformed {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
