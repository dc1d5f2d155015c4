//! Centralized error handling for m3u-filter
//!
//! Only two things can go wrong in a run: the configuration is unusable, or
//! the source playlist cannot be retrieved. Everything downstream of
//! retrieval is infallible by construction: malformed playlist entries are
//! dropped by the parser rather than reported, and absent attributes, mapping
//! entries or reorder anchors are no-ops.
//!
//! # Usage
//!
//! ```rust
//! use m3u_filter::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("source.url is empty"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
