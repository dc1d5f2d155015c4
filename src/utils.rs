//! Utility functions for m3u-filter

pub mod url;
