// Error types for ghmeta.
// Covers GitHub API failures, content shape mismatches, document storage and configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("Missing GitHub token: set github.token in the config file or GITHUB_TOKEN")]
    MissingToken,

    #[error("Can't get content of a directory: {path} ({entries} entries)")]
    IsDirectory { path: String, entries: usize },

    #[error("Invalid type {kind} for {path}, expected a file")]
    NotAFile { path: String, kind: String },

    #[error("Not a directory: {path} is a {kind}")]
    NotADirectory { path: String, kind: String },

    #[error("No content returned for {0}")]
    MissingContent(String),

    #[error("Unsupported content encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Base64 decoding error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<MetaError>,
    },

    #[error("{0}")]
    Other(String),
}

impl MetaError {
    /// Wrap this error with a description of the operation that failed.
    pub fn context(self, context: impl Into<String>) -> Self {
        MetaError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any context wrappers.
    pub fn root(&self) -> &MetaError {
        match self {
            MetaError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, MetaError>;
