use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::utils::url::UrlUtils;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub rules: RuleConfig,
}

/// Where the upstream playlist is fetched from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    /// Bound on the whole request, connect included
    #[serde(default = "default_source_timeout", with = "duration_serde::duration")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

/// Rule tables driving the filter and transform stages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleConfig {
    /// Groups whose channels are kept; everything else is dropped
    pub allowed_groups: BTreeSet<String>,
    /// The group that the denylist, renames and reorder apply to
    pub designated_group: String,
    /// Display names removed from the designated group
    pub denied_names: BTreeSet<String>,
    /// Current display name -> replacement, designated group only
    pub renames: BTreeMap<String, RenameTarget>,
    pub reorder: ReorderRule,
    pub strip: StripConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameTarget {
    pub name: String,
    pub tvg_id: String,
    pub tvg_name: String,
}

/// Move `target` so it sits directly after `anchor`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReorderRule {
    /// `false` keeps the upstream order of the designated group
    pub enabled: bool,
    pub anchor: String,
    pub target: String,
}

impl ReorderRule {
    pub fn new<A: Into<String>, T: Into<String>>(anchor: A, target: T) -> Self {
        Self {
            enabled: true,
            anchor: anchor.into(),
            target: target.into(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for ReorderRule {
    fn default() -> Self {
        Self::new(DEFAULT_REORDER_ANCHOR, DEFAULT_REORDER_TARGET)
    }
}

/// Naming tokens removed from every retained channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StripConfig {
    pub group_title: AffixStrip,
    pub display_name: AffixStrip,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AffixStrip {
    pub prefix: String,
    pub suffix: String,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_source_timeout() -> Duration {
    Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECS)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout: default_source_timeout(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            allowed_groups: DEFAULT_ALLOWED_GROUPS.iter().map(|g| g.to_string()).collect(),
            designated_group: DEFAULT_DESIGNATED_GROUP.to_string(),
            denied_names: DEFAULT_DENIED_NAMES.iter().map(|n| n.to_string()).collect(),
            renames: DEFAULT_RENAMES
                .iter()
                .map(|(from, name, tvg_id, tvg_name)| {
                    (
                        from.to_string(),
                        RenameTarget {
                            name: name.to_string(),
                            tvg_id: tvg_id.to_string(),
                            tvg_name: tvg_name.to_string(),
                        },
                    )
                })
                .collect(),
            reorder: ReorderRule::default(),
            strip: StripConfig {
                group_title: AffixStrip {
                    prefix: DEFAULT_GROUP_TITLE_PREFIX.to_string(),
                    suffix: String::new(),
                },
                display_name: AffixStrip {
                    prefix: String::new(),
                    suffix: DEFAULT_DISPLAY_NAME_SUFFIX.to_string(),
                },
            },
        }
    }
}

impl Config {
    /// Load from the file named by `CONFIG_FILE`, falling back to `config.toml`
    pub fn load() -> AppResult<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the built-in defaults. Nothing is written back.
    pub fn load_from_file<P: AsRef<Path>>(config_file: P) -> AppResult<Self> {
        let path = config_file.as_ref();
        if !path.exists() {
            info!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&contents).map_err(|e| {
            AppError::configuration(format!("failed to parse {}: {e}", path.display()))
        })?;
        info!("Configuration loaded from: {}", path.display());
        Ok(config)
    }

    /// Reject settings that would make the run fail in a confusing way
    pub fn validate(&self) -> AppResult<()> {
        let url = UrlUtils::parse_and_validate(&self.source.url).map_err(|e| {
            AppError::configuration(format!("source.url '{}' is invalid: {e}", self.source.url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::configuration(format!(
                "source.url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.source.timeout.is_zero() {
            return Err(AppError::configuration(
                "source.timeout must be greater than zero",
            ));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(AppError::configuration("output.path is empty"));
        }

        if !self.rules.allowed_groups.contains(&self.rules.designated_group) {
            warn!(
                "Designated group '{}' is not in allowed_groups, its rules will never apply",
                self.rules.designated_group
            );
        }
        Ok(())
    }
}
