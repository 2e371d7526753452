//! Date-windowed image acquisition.
//!
//! An acquisition run fetches up to a fixed number of images per
//! [`DateWindow`], each window into its own subdirectory of the output root,
//! then scans the root and writes a manifest. The network side sits behind
//! the [`ImageFetcher`] trait; [`http::HttpImageFetcher`] is the production
//! implementation (behind the `remote` feature).

mod config;
mod fetch;
#[cfg(feature = "remote")]
pub mod http;
mod orchestrate;
mod window;

pub use config::{
    check_per_window_cap, AcquisitionConfig, DEFAULT_KEYWORD, MAX_PER_WINDOW_CAP,
    MIN_PER_WINDOW_CAP, WINDOW_DIR_PREFIX,
};
pub use fetch::{fetch_range, FetchRequest, ImageFetcher};
pub use orchestrate::{run_acquisition, AcquisitionReport, WindowOutcome};
pub use window::{DateTriple, DateWindow};
