//! Recursive discovery of image assets under a directory.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{AssetFilter, AssetPathPair};
use crate::error::DatecrawlError;

/// Scans `root` and returns one pair per asset, relative to `root` itself.
///
/// Entries are visited depth-first with siblings sorted by file name; that
/// order is the canonical order for manifests and cursors. Entries that
/// cannot be read, such as dangling symlinks or links back to an ancestor,
/// are logged and skipped.
pub fn scan(root: &Path, filter: &AssetFilter) -> Result<Vec<AssetPathPair>, DatecrawlError> {
    scan_with_root(root, root, filter)
}

/// Scans `dir` but derives relative paths from `root`.
///
/// Both directories are canonicalized first, so the relative paths do not
/// depend on the working directory. Every asset found must lie under `root`.
pub fn scan_with_root(
    dir: &Path,
    root: &Path,
    filter: &AssetFilter,
) -> Result<Vec<AssetPathPair>, DatecrawlError> {
    let dir = canonical_dir(dir)?;
    let root = canonical_dir(root)?;

    let mut pairs = Vec::new();

    for entry in WalkDir::new(&dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            // The scan directory itself must be readable.
            Err(source) if source.depth() == 0 => {
                return Err(DatecrawlError::DirectoryTraversal {
                    path: dir.clone(),
                    message: source.to_string(),
                });
            }
            Err(source) => {
                tracing::warn!(
                    path = ?source.path(),
                    error = %source,
                    "skipping unreadable entry"
                );
                continue;
            }
        };

        if !entry.file_type().is_file() || !filter.has_asset_extension(entry.path()) {
            continue;
        }

        let absolute = fs::canonicalize(entry.path())?;
        let relative = relative_to(&absolute, entry.path(), &root).ok_or_else(|| {
            DatecrawlError::PathOutsideRoot {
                path: entry.path().to_path_buf(),
                root: root.clone(),
            }
        })?;

        pairs.push(AssetPathPair::new(path_string(&absolute), relative)?);
    }

    tracing::debug!(dir = %dir.display(), assets = pairs.len(), "scanned directory");
    Ok(pairs)
}

fn canonical_dir(path: &Path) -> Result<PathBuf, DatecrawlError> {
    if !path.is_dir() {
        return Err(DatecrawlError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::canonicalize(path)?)
}

// A symlinked asset resolves outside the tree; fall back to the walked path,
// which always sits under the canonical scan directory.
fn relative_to(absolute: &Path, walked: &Path, root: &Path) -> Option<String> {
    absolute
        .strip_prefix(root)
        .or_else(|_| walked.strip_prefix(root))
        .ok()
        .map(rel_string)
        .filter(|rel| !rel.is_empty())
}

fn rel_string(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"img").unwrap();
    }

    #[test]
    fn finds_assets_recursively_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("range_1/b.png"));
        touch(&dir.path().join("range_0/000002.jpg"));
        touch(&dir.path().join("range_0/000001.JPG"));
        touch(&dir.path().join("range_0/notes.txt"));

        let pairs = scan(dir.path(), &AssetFilter::default()).unwrap();
        let rels: Vec<&str> = pairs.iter().map(|p| p.relative_path()).collect();
        assert_eq!(
            rels,
            ["range_0/000001.JPG", "range_0/000002.jpg", "range_1/b.png"]
        );

        let root = fs::canonicalize(dir.path()).unwrap();
        for pair in &pairs {
            assert!(pair.absolute().is_absolute());
            assert_eq!(root.join(pair.relative()), pair.absolute());
        }
    }

    #[test]
    fn separate_root_prefixes_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("range_0/a.png"));

        let pairs = scan_with_root(
            &dir.path().join("range_0"),
            dir.path(),
            &AssetFilter::default(),
        )
        .unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].relative_path(), "range_0/a.png");
    }

    #[test]
    fn asset_outside_root_is_an_error() {
        let outer = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        touch(&outer.path().join("a.png"));

        let err = scan_with_root(outer.path(), other.path(), &AssetFilter::default())
            .expect_err("should fail");
        assert!(matches!(err, DatecrawlError::PathOutsideRoot { .. }));
    }

    #[test]
    fn missing_root_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan(&dir.path().join("nope"), &AssetFilter::default()).unwrap_err();
        assert!(matches!(err, DatecrawlError::NotADirectory { .. }));

        let file = dir.path().join("file.png");
        touch(&file);
        let err = scan(&file, &AssetFilter::default()).unwrap_err();
        assert!(matches!(err, DatecrawlError::NotADirectory { .. }));
    }

    #[test]
    fn empty_tree_yields_no_pairs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("range_0")).unwrap();
        assert!(scan(dir.path(), &AssetFilter::default()).unwrap().is_empty());
    }
}
