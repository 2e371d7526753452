//! The (absolute, relative) path pair that every manifest row describes.

use std::fmt;
use std::path::{Component, Path};

use serde::Serialize;

use crate::error::DatecrawlError;

/// One acquired asset: its resolved location and its location under the
/// dataset root.
///
/// Pairs are immutable once built. Both fields are non-empty and the relative
/// path never climbs out of the root.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AssetPathPair {
    absolute_path: String,
    relative_path: String,
}

impl AssetPathPair {
    /// Creates a pair, rejecting empty fields and relative paths that escape
    /// the dataset root (`..`, a leading `/`, or a drive prefix).
    pub fn new(
        absolute_path: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Result<Self, DatecrawlError> {
        let absolute_path = absolute_path.into();
        let relative_path = relative_path.into();

        if absolute_path.is_empty() {
            return Err(DatecrawlError::InvalidPair {
                message: "absolute path is empty".to_string(),
            });
        }
        if relative_path.is_empty() {
            return Err(DatecrawlError::InvalidPair {
                message: format!("relative path for '{}' is empty", absolute_path),
            });
        }
        if escapes_root(&relative_path) {
            return Err(DatecrawlError::InvalidPair {
                message: format!("relative path '{}' escapes the dataset root", relative_path),
            });
        }

        Ok(Self {
            absolute_path,
            relative_path,
        })
    }

    pub fn absolute_path(&self) -> &str {
        &self.absolute_path
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// The absolute path as a filesystem path.
    pub fn absolute(&self) -> &Path {
        Path::new(&self.absolute_path)
    }

    /// The relative path as a filesystem path.
    pub fn relative(&self) -> &Path {
        Path::new(&self.relative_path)
    }
}

impl fmt::Display for AssetPathPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.absolute_path, self.relative_path)
    }
}

fn escapes_root(relative: &str) -> bool {
    Path::new(relative).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
