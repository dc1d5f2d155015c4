//! Configuration default values
//!
//! This module contains all the default values for configuration options,
//! making them easily changeable in one central location.

// Source defaults
pub const DEFAULT_SOURCE_URL: &str = "https://sub.ottiptv.cc/iptv.m3u";
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;

// Output defaults
pub const DEFAULT_OUTPUT_PATH: &str = "live.m3u";

// Rule defaults
pub const DEFAULT_ALLOWED_GROUPS: &[&str] = &["主力-央视", "主力-卫视", "主力-其他"];
pub const DEFAULT_DESIGNATED_GROUP: &str = "主力-央视";
pub const DEFAULT_DENIED_NAMES: &[&str] =
    &["CCTV-3-主力", "CCTV-5-主力", "CCTV-6-主力", "CCTV-8-主力"];

/// (current name, new name, tvg-id, tvg-name)
pub const DEFAULT_RENAMES: &[(&str, &str, &str, &str)] = &[
    ("CCTV-新闻HD-主力", "CCTV-13HD-主力", "CCTV13", "CCTV13"),
    ("CCTV-少儿HD-主力", "CCTV-14HD-主力", "CCTV14", "CCTV14"),
    ("CCTV-音乐HD-主力", "CCTV-15HD-主力", "CCTV15", "CCTV15"),
];

pub const DEFAULT_REORDER_ANCHOR: &str = "CCTV-5HD-主力";
pub const DEFAULT_REORDER_TARGET: &str = "CCTV-5+HD-主力";

// Naming convention shared by every retained channel
pub const DEFAULT_GROUP_TITLE_PREFIX: &str = "主力-";
pub const DEFAULT_DISPLAY_NAME_SUFFIX: &str = "-主力";
