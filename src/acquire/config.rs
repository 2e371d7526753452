//! Acquisition run configuration.

use std::path::{Path, PathBuf};

use super::DateWindow;
use crate::dataset::AssetFilter;
use crate::error::DatecrawlError;

/// Smallest accepted per-window cap.
pub const MIN_PER_WINDOW_CAP: usize = 50;

/// Largest accepted per-window cap.
pub const MAX_PER_WINDOW_CAP: usize = 1000;

/// Search keyword used when none is given.
pub const DEFAULT_KEYWORD: &str = "bear";

/// Per-window subdirectory names are `{prefix}{index}`.
pub const WINDOW_DIR_PREFIX: &str = "range_";

/// Everything an acquisition run needs.
#[derive(Clone, Debug)]
pub struct AcquisitionConfig {
    pub keyword: String,
    pub windows: Vec<DateWindow>,
    pub per_window_cap: usize,
    /// Parent of every per-window subdirectory; also the manifest's root.
    pub output_root: PathBuf,
    pub manifest_path: PathBuf,
    /// Extensions that count as assets when building the manifest.
    pub filter: AssetFilter,
    /// Number given to the first window's subdirectory.
    pub index_base: usize,
}

impl AcquisitionConfig {
    /// Creates a config with the default filter and an index base of 0.
    pub fn new(
        keyword: impl Into<String>,
        windows: Vec<DateWindow>,
        per_window_cap: usize,
        output_root: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            windows,
            per_window_cap,
            output_root: output_root.into(),
            manifest_path: manifest_path.into(),
            filter: AssetFilter::default(),
            index_base: 0,
        }
    }

    pub fn with_filter(mut self, filter: AssetFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_index_base(mut self, index_base: usize) -> Self {
        self.index_base = index_base;
        self
    }

    /// Checks every invariant. Touches neither the filesystem nor the network.
    pub fn validate(&self) -> Result<(), DatecrawlError> {
        if self.keyword.trim().is_empty() {
            return Err(DatecrawlError::InvalidKeyword {
                message: "keyword must not be empty".to_string(),
            });
        }
        check_per_window_cap(self.per_window_cap)?;
        if self.windows.is_empty() {
            return Err(DatecrawlError::NoDateWindows);
        }
        Ok(())
    }

    /// Output subdirectory for the window at position `index`.
    pub fn window_dir(&self, index: usize) -> PathBuf {
        window_dir(&self.output_root, self.index_base + index)
    }
}

/// Fails unless `cap` lies in `[MIN_PER_WINDOW_CAP, MAX_PER_WINDOW_CAP]`.
pub fn check_per_window_cap(cap: usize) -> Result<(), DatecrawlError> {
    if (MIN_PER_WINDOW_CAP..=MAX_PER_WINDOW_CAP).contains(&cap) {
        Ok(())
    } else {
        Err(DatecrawlError::InvalidPerWindowCap {
            value: cap,
            min: MIN_PER_WINDOW_CAP,
            max: MAX_PER_WINDOW_CAP,
        })
    }
}

fn window_dir(root: &Path, number: usize) -> PathBuf {
    root.join(format!("{}{}", WINDOW_DIR_PREFIX, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cap: usize, windows: &[&str]) -> AcquisitionConfig {
        AcquisitionConfig::new(
            DEFAULT_KEYWORD,
            windows.iter().map(|w| w.parse().unwrap()).collect(),
            cap,
            "out",
            "out.csv",
        )
    }

    #[test]
    fn cap_bounds_are_inclusive() {
        assert!(check_per_window_cap(50).is_ok());
        assert!(check_per_window_cap(1000).is_ok());
        assert!(check_per_window_cap(49).is_err());
        assert!(check_per_window_cap(1001).is_err());
        assert!(check_per_window_cap(0).is_err());
    }

    #[test]
    fn validate_rejects_empty_windows() {
        let err = config(100, &[]).validate().unwrap_err();
        assert!(matches!(err, DatecrawlError::NoDateWindows));
    }

    #[test]
    fn validate_rejects_blank_keyword() {
        let mut cfg = config(100, &["2020-01-01:2020-02-01"]);
        cfg.keyword = "   ".to_string();
        assert!(cfg.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn validate_accepts_good_config() {
        assert!(config(100, &["2020-01-01:2020-02-01"]).validate().is_ok());
    }

    #[test]
    fn window_dirs_follow_index_base() {
        let cfg = config(100, &["2020-01-01:2020-02-01"]);
        assert_eq!(cfg.window_dir(0), Path::new("out/range_0"));
        assert_eq!(cfg.window_dir(1), Path::new("out/range_1"));

        let cfg = cfg.with_index_base(1);
        assert_eq!(cfg.window_dir(0), Path::new("out/range_1"));
    }
}
