//! Typed failures of the library core. The CLI wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected configuration. Raised before any provider call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported language code: {code}")]
    UnsupportedLanguage { code: String },
    #[error("unsupported translation provider: {name}")]
    UnsupportedProvider { name: String },
    #[error("translation.provider = \"command\" requires translation.command")]
    MissingProviderCommand,
    #[error("invalid keyword `{keyword}` in section `{section}`: {source}")]
    InvalidKeyword {
        section: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to spawn provider `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("provider i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("provider exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("provider exceeded timeout of {seconds}s")]
    Timeout { seconds: u64 },
    #[error("provider output is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider rejected the request: {0}")]
    Rejected(String),
    #[error("provider returned {actual} segments for {expected} inputs")]
    LengthMismatch { expected: usize, actual: usize },
}

/// A provider failure scoped to one target language.
#[derive(Debug, Error)]
#[error("translation to `{language_code}` failed: {source}")]
pub struct ProviderFailure {
    pub language_code: String,
    #[source]
    pub source: ProviderError,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("URL inputs are disabled: {0}")]
    UrlInput(String),
    #[error("input does not exist: {}", .0.display())]
    Missing(PathBuf),
    #[error("input exceeds max_input_bytes ({size} > {limit}): {}", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse page JSON {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("page numbers must run 1..n without gaps; expected {expected}, got {got}")]
    PageNumber { expected: u32, got: u32 },
}
