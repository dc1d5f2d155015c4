//! Error type definitions for m3u-filter

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Source retrieval errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Failure writing the output playlist
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Retrieval failures for the source playlist
///
/// None of these are retried; any of them aborts the run.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request did not complete within the configured timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// The source answered with a non-success status
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Transport-level failure (DNS, refused connection, TLS, ...)
    #[error("Request failed: {url} - {message}")]
    Request { url: String, message: String },

    /// The body was not UTF-8 text
    #[error("Invalid playlist body from {url}: {message}")]
    InvalidBody { url: String, message: String },

    /// A local playlist file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap an I/O error raised while writing `path`
    pub fn io<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl SourceError {
    /// Classify a reqwest failure for `url`
    pub fn from_reqwest<S: Into<String>>(url: S, err: reqwest::Error) -> Self {
        let url = url.into();
        if err.is_timeout() {
            Self::Timeout { url }
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                url,
            }
        } else {
            Self::Request {
                url,
                message: err.to_string(),
            }
        }
    }
}
