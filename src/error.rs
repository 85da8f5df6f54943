use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Document-level failures. Attribute-level gaps never surface here; they
/// resolve to empty strings or `None` inside the normalizer.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("expected a JSON array of records at the top level, found {found}")]
    NotAnArray { found: &'static str },
    #[error("element {index} is not a record (found {found})")]
    NotARecord { index: usize, found: &'static str },
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("unknown logical attribute '{0}' in alias file")]
    UnknownAttribute(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
