#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use datecrawl::acquire::{FetchRequest, ImageFetcher};
use datecrawl::DatecrawlError;

/// Bytes of a 1x1 PNG; only the extension matters to datecrawl.
pub const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bytes).expect("write file");
}

/// Creates each relative path under `root` and returns the absolute paths.
pub fn build_tree(root: &Path, relative_paths: &[&str]) -> Vec<PathBuf> {
    relative_paths
        .iter()
        .map(|rel| {
            let path = root.join(rel);
            write_file(&path, &PNG_BYTES);
            path
        })
        .collect()
}

/// Offline stand-in for the network fetcher.
///
/// Writes `min(per_window, max_count)` numbered images per call and one
/// non-image sidecar file, mirroring what a real crawler leaves behind.
pub struct FakeFetcher {
    pub per_window: usize,
}

impl ImageFetcher for FakeFetcher {
    fn fetch(&self, request: &FetchRequest, destination: &Path) -> Result<usize, DatecrawlError> {
        let count = self.per_window.min(request.max_count);
        for i in 1..=count {
            let ext = if i % 2 == 0 { "png" } else { "jpg" };
            write_file(&destination.join(format!("{i:06}.{ext}")), &PNG_BYTES);
        }
        write_file(&destination.join("crawl.log"), request.keyword.as_bytes());
        Ok(count)
    }
}
