use std::path::PathBuf;
use thiserror::Error;

/// The main error type for datecrawl operations.
#[derive(Debug, Error)]
pub enum DatecrawlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid per-window cap {value}: must be in [{min}, {max}]")]
    InvalidPerWindowCap { value: usize, min: usize, max: usize },

    #[error("Invalid date window '{input}': {message}")]
    InvalidDateWindow { input: String, message: String },

    #[error("At least one date window is required")]
    NoDateWindows,

    #[error("Invalid keyword: {message}")]
    InvalidKeyword { message: String },

    #[error("Invalid asset extension '{extension}': {message}")]
    InvalidExtension { extension: String, message: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Invalid source {path}: expected an existing .csv manifest or a directory")]
    InvalidSource { path: PathBuf },

    #[error("Path {path} is not under dataset root {root}")]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Failed while traversing {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    #[error("Invalid path pair: {message}")]
    InvalidPair { message: String },

    #[error("Invalid manifest row {row}: {message}")]
    ManifestRowInvalid { row: usize, message: String },

    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Fetch failed for '{keyword}' in window {window}: {message}")]
    Fetch {
        keyword: String,
        window: String,
        message: String,
    },

    #[error("Cannot advance cursor: the source contains no assets")]
    ExhaustedEmptySource,

    #[error("Remote fetching is unavailable: this build lacks the 'remote' feature")]
    RemoteUnavailable,
}

impl DatecrawlError {
    /// Returns true for errors caused by invalid user configuration.
    ///
    /// These are raised before any filesystem or network side effect.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DatecrawlError::InvalidPerWindowCap { .. }
                | DatecrawlError::InvalidDateWindow { .. }
                | DatecrawlError::NoDateWindows
                | DatecrawlError::InvalidKeyword { .. }
                | DatecrawlError::InvalidExtension { .. }
        )
    }

    /// Process exit status for this error.
    ///
    /// Configuration errors share status 2 with clap's usage errors; every
    /// other failure exits with 1.
    pub fn exit_code(&self) -> u8 {
        if self.is_configuration() {
            2
        } else {
            1
        }
    }
}
