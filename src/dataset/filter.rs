//! Decides which filesystem entries count as image assets.

use std::path::Path;

use crate::error::DatecrawlError;

/// Extensions recognized by default.
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Default extensions plus WebP.
pub const EXTENDED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// A set of recognized file extensions, compared case-insensitively.
///
/// Extensions are stored lower-cased and without the leading dot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetFilter {
    extensions: Vec<String>,
}

impl Default for AssetFilter {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl AssetFilter {
    /// Builds a filter from user-supplied extensions such as `"jpg"`, `".PNG"`.
    pub fn new<I, S>(extensions: I) -> Result<Self, DatecrawlError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();

        for raw in extensions {
            let raw = raw.as_ref();
            let ext = raw.trim().trim_start_matches('.').to_ascii_lowercase();
            if ext.is_empty() {
                return Err(DatecrawlError::InvalidExtension {
                    extension: raw.to_string(),
                    message: "extension is empty".to_string(),
                });
            }
            if ext.contains(['.', '/', '\\']) {
                return Err(DatecrawlError::InvalidExtension {
                    extension: raw.to_string(),
                    message: "extension must be a single suffix".to_string(),
                });
            }
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }

        if normalized.is_empty() {
            return Err(DatecrawlError::InvalidExtension {
                extension: String::new(),
                message: "at least one extension is required".to_string(),
            });
        }

        Ok(Self {
            extensions: normalized,
        })
    }

    /// The default set plus `webp`.
    pub fn with_webp() -> Self {
        Self {
            extensions: EXTENDED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Suffix-only check; does not touch the filesystem.
    pub fn has_asset_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };

        self.accepts_extension(ext)
    }

    /// True iff `ext` (without the dot) is recognized, in any letter case.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    }

    /// True iff `path` is a regular file with a recognized extension.
    pub fn is_asset(&self, path: &Path) -> bool {
        path.is_file() && self.has_asset_extension(path)
    }
}
