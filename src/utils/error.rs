//! Error handling for cfn2rs
//!
//! The translation core never fails: text that is not a declaration is
//! simply skipped. These errors belong to the surrounding tool (reading
//! input, loading type-map overrides).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Tool error
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read standard input: {0}")]
    ReadStdin(#[source] std::io::Error),

    #[error("invalid type mapping `{0}`: expected C_TYPE=RUST_TYPE")]
    InvalidMapping(String),

    #[error("invalid type-map file {path}: {source}")]
    TypeMapFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
