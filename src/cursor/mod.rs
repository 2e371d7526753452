//! Restartable sequential access to a dataset.
//!
//! A [`DatasetCursor`] snapshots the asset list once, from a manifest file or
//! by scanning a directory, and then hands out pairs one at a time. Running
//! past the end wraps back to the first pair instead of signalling the end,
//! which is what "next image" style consumers want. Callers that need a
//! single finite pass should use [`DatasetCursor::iter`] or check
//! [`DatasetCursor::len`].
//!
//! # Example
//!
//! ```
//! use datecrawl::cursor::DatasetCursor;
//! use datecrawl::dataset::AssetPathPair;
//!
//! let mut cursor = DatasetCursor::from_pairs(vec![
//!     AssetPathPair::new("/a/x.png", "x.png")?,
//!     AssetPathPair::new("/a/sub/y.jpg", "sub/y.jpg")?,
//! ]);
//! assert_eq!(cursor.next_pair()?.relative_path(), "x.png");
//! assert_eq!(cursor.next_pair()?.relative_path(), "sub/y.jpg");
//! assert_eq!(cursor.next_pair()?.relative_path(), "x.png");
//! # Ok::<(), datecrawl::DatecrawlError>(())
//! ```

mod browse;

pub use browse::browse;

use std::path::Path;

use crate::dataset::{is_manifest_path, read_manifest, scan_with_root, AssetFilter, AssetPathPair};
use crate::error::DatecrawlError;

/// A fixed snapshot of pairs plus a mutable read position.
///
/// Not meant for concurrent use; give each consumer its own cursor.
#[derive(Clone, Debug)]
pub struct DatasetCursor {
    items: Vec<AssetPathPair>,
    position: usize,
}

impl DatasetCursor {
    /// Opens a cursor with the default asset filter.
    ///
    /// See [`DatasetCursor::open_with_filter`].
    pub fn open(source: &Path, root: Option<&Path>) -> Result<Self, DatecrawlError> {
        Self::open_with_filter(source, root, &AssetFilter::default())
    }

    /// Opens a cursor over `source`.
    ///
    /// - A regular file with a `.csv` extension (any case) is read as a
    ///   manifest; `root` and `filter` are unused.
    /// - A directory is scanned with `filter`, relative paths taken against
    ///   `root` when given and against `source` otherwise.
    ///
    /// # Errors
    /// [`DatecrawlError::InvalidSource`] if `source` is neither, including
    /// any file without the manifest extension.
    pub fn open_with_filter(
        source: &Path,
        root: Option<&Path>,
        filter: &AssetFilter,
    ) -> Result<Self, DatecrawlError> {
        let items = if source.is_file() && is_manifest_path(source) {
            read_manifest(source)?
        } else if source.is_dir() {
            scan_with_root(source, root.unwrap_or(source), filter)?
        } else {
            return Err(DatecrawlError::InvalidSource {
                path: source.to_path_buf(),
            });
        };

        tracing::debug!(source = %source.display(), items = items.len(), "opened cursor");
        Ok(Self::from_pairs(items))
    }

    pub fn from_pairs(items: Vec<AssetPathPair>) -> Self {
        Self { items, position: 0 }
    }

    /// Returns the pair at the current position and advances.
    ///
    /// Once every pair has been handed out the position resets to 0 and the
    /// first pair is returned again.
    ///
    /// # Errors
    /// [`DatecrawlError::ExhaustedEmptySource`] if the snapshot is empty.
    pub fn next_pair(&mut self) -> Result<&AssetPathPair, DatecrawlError> {
        if self.items.is_empty() {
            return Err(DatecrawlError::ExhaustedEmptySource);
        }
        if self.position >= self.items.len() {
            tracing::debug!(len = self.items.len(), "cursor exhausted; wrapping to start");
            self.position = 0;
        }

        let item = &self.items[self.position];
        self.position += 1;
        Ok(item)
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Index of the pair the next call to [`next_pair`](Self::next_pair)
    /// returns, before wraparound.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True once every pair of the current pass has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[AssetPathPair] {
        &self.items
    }

    /// One finite pass over the snapshot; does not move the cursor.
    pub fn iter(&self) -> std::slice::Iter<'_, AssetPathPair> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a DatasetCursor {
    type Item = &'a AssetPathPair;
    type IntoIter = std::slice::Iter<'a, AssetPathPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
