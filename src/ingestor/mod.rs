//! Turning raw playlist text into channel records

pub mod m3u_parser;

pub use m3u_parser::{parse_extinf_line, parse_playlist, parse_playlist_with_stats, ParseStats};
