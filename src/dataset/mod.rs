//! On-disk dataset representation.
//!
//! A dataset is a directory tree of image assets plus an optional manifest
//! listing every asset as an (absolute path, relative path) pair. This module
//! owns the pair type, the asset classifier, the directory scanner and the
//! manifest codec. Network acquisition lives in `crate::acquire`.

mod filter;
pub mod manifest;
mod pair;
pub mod scan;

pub use filter::{AssetFilter, DEFAULT_EXTENSIONS, EXTENDED_EXTENSIONS};
pub use manifest::{
    is_manifest_path, read_manifest, write_manifest, MANIFEST_DELIMITER, MANIFEST_EXTENSION,
    MANIFEST_HEADER,
};
pub use pair::AssetPathPair;
pub use scan::{scan, scan_with_root};
