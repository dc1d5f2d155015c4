//! Playlist sources

pub mod m3u;

pub use m3u::M3uSourceHandler;
