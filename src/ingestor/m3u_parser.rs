//! Extended M3U playlist parsing
//!
//! Turns raw playlist text into an ordered list of [`ChannelRecord`]s. The
//! upstream generators are not trusted to produce well-formed output, so
//! incomplete entries are dropped instead of failing the run.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::models::channel::ExtInfBuilder;
use crate::models::{ChannelRecord, ExtInf, EXTINF_PREFIX};

const EXTINF_MARKER: &str = "#EXTINF";

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE_RE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE_RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z0-9_-]+)=(?:"([^"]*)"|([^\s"]+))"#)
            .expect("attribute pattern is valid")
    })
}

/// Counters describing one parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub records: usize,
    /// Descriptor lines that never got a locator
    pub dangling_descriptors: usize,
    /// Locator lines with no descriptor in front of them
    pub orphan_locators: usize,
}

/// Parse playlist text into channel records, preserving input order.
pub fn parse_playlist(content: &str) -> Vec<ChannelRecord> {
    parse_playlist_with_stats(content).0
}

/// Parse playlist text and report how many malformed entries were dropped.
pub fn parse_playlist_with_stats(content: &str) -> (Vec<ChannelRecord>, ParseStats) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = Vec::new();
    let mut stats = ParseStats::default();
    let mut pending: Option<ExtInf> = None;

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        if line.starts_with(EXTINF_MARKER) {
            if let Some(dangling) = pending.replace(parse_extinf_line(line)) {
                stats.dangling_descriptors += 1;
                debug!(
                    "Dropping descriptor without stream URL before line {}: '{}'",
                    line_num + 1,
                    dangling.title()
                );
            }
        } else if !line.is_empty() && !line.starts_with('#') {
            match pending.take() {
                Some(extinf) => records.push(ChannelRecord::new(extinf, line)),
                None => {
                    stats.orphan_locators += 1;
                    debug!(
                        "Dropping stream URL without EXTINF metadata at line {}",
                        line_num + 1
                    );
                }
            }
        }
    }

    if let Some(dangling) = pending {
        stats.dangling_descriptors += 1;
        debug!(
            "Dropping trailing descriptor without stream URL: '{}'",
            dangling.title()
        );
    }

    stats.records = records.len();
    info!(
        "Parsed playlist records={} dangling_descriptors={} orphan_locators={}",
        stats.records, stats.dangling_descriptors, stats.orphan_locators
    );
    (records, stats)
}

/// Parse a single descriptor line.
///
/// Format: `#EXTINF:<duration> key="value" ...,<display name>`. The display
/// name is whatever follows the last comma; a line without a comma has an
/// empty display name. Unquoted attribute values are accepted.
pub fn parse_extinf_line(line: &str) -> ExtInf {
    let content = line
        .strip_prefix(EXTINF_PREFIX)
        .or_else(|| line.strip_prefix(EXTINF_MARKER))
        .unwrap_or(line);

    let (head, title) = match content.rfind(',') {
        Some(pos) => (&content[..pos], content[pos + 1..].trim()),
        None => (content, ""),
    };

    let duration = head
        .split_whitespace()
        .next()
        .filter(|token| !token.contains('='))
        .unwrap_or("")
        .to_string();

    let mut builder = ExtInfBuilder::default();
    let mut cursor = 0;
    for caps in attribute_regex().captures_iter(head) {
        let (Some(whole), Some(key), Some(value)) =
            (caps.get(0), caps.get(1), caps.get(2).or_else(|| caps.get(3)))
        else {
            continue;
        };
        builder.push_raw(&head[cursor..whole.start()]);
        builder.push_attribute(
            key.as_str().to_string(),
            value.as_str().to_string(),
            whole.as_str(),
        );
        cursor = whole.end();
    }
    // Bare tokens and extra commas before the display name survive rewrites
    builder.push_raw(&head[cursor..]);

    builder.finish(duration, title.to_string(), Some(line))
}
