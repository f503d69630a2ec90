//! Failures of a single artifact retrieval.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while retrieving an artifact.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source or a redirect target could not be parsed as a URL.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The redirect chain went past the hop bound.
    #[error("Too many redirects (more than {limit})")]
    TooManyRedirects { limit: usize },

    /// The terminal response was anything but `200 OK`.
    #[error("Failed to download: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Connection, DNS, TLS or body stream failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Local filesystem failure while writing the artifact.
    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The complete artifact could not be given its final mode.
    #[error("Failed to set permissions on {}", .path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FetchError {
    pub(crate) fn write(
        path: &std::path::Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// HTTP status code of the terminal response, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
