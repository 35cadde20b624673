use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when fetching or decoding a directory page
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch page {page} from {url}: {source}")]
    RequestFailed {
        url: String,
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for page {page} from {url}")]
    HttpStatus { url: String, page: u32, status: u16 },

    #[error("Failed to decode page {page}: {source}")]
    DecodeFailed {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification of a [`CatalogError`], used for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network or HTTP-level failure
    Transport,
    /// The payload did not match the expected schema
    Decode,
}

impl CatalogError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::DecodeFailed { .. } => FailureKind::Decode,
            CatalogError::RequestFailed { .. } | CatalogError::HttpStatus { .. } => {
                FailureKind::Transport
            }
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Transport => f.write_str("transport"),
            FailureKind::Decode => f.write_str("decode"),
        }
    }
}

/// Errors that can occur when loading or persisting the favorites file
#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Failed to read favorites file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write favorites file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse favorites JSON in {path}: {source}")]
    JsonParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize favorites: {0}")]
    JsonSerializeFailed(#[from] serde_json::Error),
}

/// Errors that can occur while assembling the runtime configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid directory endpoint '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("No favorites path given and no data directory could be determined")]
    NoDataDirectory,
}
