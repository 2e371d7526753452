//! The external fetch contract and the per-window fetch step.

use std::fs;
use std::path::Path;

use super::{DateTriple, DateWindow};
use crate::error::DatecrawlError;

/// Parameters for one fetch: keyword, inclusive date bounds and a cap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub keyword: String,
    pub start: DateTriple,
    pub end: DateTriple,
    pub max_count: usize,
}

impl FetchRequest {
    pub fn new(keyword: impl Into<String>, window: &DateWindow, max_count: usize) -> Self {
        Self {
            keyword: keyword.into(),
            start: window.start_triple(),
            end: window.end_triple(),
            max_count,
        }
    }

    /// `YYYY-MM-DD:YYYY-MM-DD`, for logs and errors.
    pub fn window_label(&self) -> String {
        let (sy, sm, sd) = self.start;
        let (ey, em, ed) = self.end;
        format!("{sy:04}-{sm:02}-{sd:02}:{ey:04}-{em:02}-{ed:02}")
    }

    /// Builds a [`DatecrawlError::Fetch`] for this request.
    pub fn error(&self, message: impl Into<String>) -> DatecrawlError {
        DatecrawlError::Fetch {
            keyword: self.keyword.clone(),
            window: self.window_label(),
            message: message.into(),
        }
    }
}

/// Something that can populate a directory with images.
///
/// Implementations are best effort: they may write fewer than
/// `request.max_count` files, and the count they return is informational.
/// Errors propagate to the caller unchanged and are never retried.
pub trait ImageFetcher {
    fn fetch(&self, request: &FetchRequest, destination: &Path) -> Result<usize, DatecrawlError>;
}

impl<F: ImageFetcher + ?Sized> ImageFetcher for &F {
    fn fetch(&self, request: &FetchRequest, destination: &Path) -> Result<usize, DatecrawlError> {
        (**self).fetch(request, destination)
    }
}

/// Fetches one window into `out_dir`, creating the directory first.
///
/// Nothing written by the fetcher is inspected here.
pub fn fetch_range(
    fetcher: &dyn ImageFetcher,
    keyword: &str,
    window: &DateWindow,
    out_dir: &Path,
    cap: usize,
) -> Result<usize, DatecrawlError> {
    fs::create_dir_all(out_dir)?;

    let request = FetchRequest::new(keyword, window, cap);
    tracing::info!(
        keyword,
        window = %window,
        dir = %out_dir.display(),
        cap,
        "fetching window"
    );

    let fetched = fetcher.fetch(&request, out_dir)?;
    tracing::info!(window = %window, fetched, "window fetched");
    Ok(fetched)
}
