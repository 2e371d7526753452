//! Runs every configured window, then builds the manifest.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::{fetch_range, AcquisitionConfig, DateWindow, ImageFetcher};
use crate::dataset::{scan, write_manifest};
use crate::error::DatecrawlError;

/// What happened to one window.
#[derive(Clone, Debug, Serialize)]
pub struct WindowOutcome {
    pub window: DateWindow,
    pub directory: PathBuf,
    /// Count reported by the fetcher, not a verified file count. A fetcher
    /// that saves types outside the run's filter reports more than the
    /// manifest lists for this window.
    pub fetched: usize,
}

/// Summary of a completed acquisition run.
#[derive(Clone, Debug, Serialize)]
pub struct AcquisitionReport {
    pub windows: Vec<WindowOutcome>,
    pub manifest_path: PathBuf,
    /// Rows written to the manifest, across all windows and any files
    /// already present under the output root.
    pub asset_count: usize,
}

impl fmt::Display for AcquisitionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Acquired {} window(s):", self.windows.len())?;
        for outcome in &self.windows {
            writeln!(
                f,
                "  {} -> {} ({} fetched)",
                outcome.window,
                outcome.directory.display(),
                outcome.fetched
            )?;
        }
        writeln!(
            f,
            "Manifest: {} ({} asset(s))",
            self.manifest_path.display(),
            self.asset_count
        )
    }
}

/// Runs an acquisition.
///
/// Windows are fetched strictly in order, each into its own numbered
/// subdirectory of `config.output_root`. Only after every window succeeds is
/// the output root scanned and the manifest written, so a failing window
/// aborts the run and leaves no new manifest behind. Re-running the same
/// config writes into the same subdirectories.
pub fn run_acquisition(
    config: &AcquisitionConfig,
    fetcher: &dyn ImageFetcher,
) -> Result<AcquisitionReport, DatecrawlError> {
    config.validate()?;

    let mut windows = Vec::with_capacity(config.windows.len());
    for (index, window) in config.windows.iter().enumerate() {
        let directory = config.window_dir(index);
        let fetched = fetch_range(
            fetcher,
            &config.keyword,
            window,
            &directory,
            config.per_window_cap,
        )?;
        windows.push(WindowOutcome {
            window: *window,
            directory,
            fetched,
        });
    }

    let pairs = scan(&config.output_root, &config.filter)?;
    write_manifest(&config.manifest_path, &pairs)?;

    Ok(AcquisitionReport {
        windows,
        manifest_path: config.manifest_path.clone(),
        asset_count: pairs.len(),
    })
}
