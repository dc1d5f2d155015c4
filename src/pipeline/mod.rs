//! End-to-end playlist pipeline
//!
//! Fetch, parse, filter, map and render run strictly one after another over
//! fully materialized vectors. The output file is only touched once the final
//! document exists in memory, so a failure anywhere earlier leaves a previous
//! output intact.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::{Config, RuleConfig};
use crate::data_mapping::{DataMappingEngine, MappingStats};
use crate::errors::{AppResult, SourceResult};
use crate::ingestor::{parse_playlist_with_stats, ParseStats};
use crate::models::ChannelRecord;
use crate::proxy::{FilterEngine, PlaylistGenerator};
use crate::sources::M3uSourceHandler;

/// Where the input playlist comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    Remote { url: String, timeout: Duration },
    File(PathBuf),
}

impl PlaylistSource {
    pub async fn load(&self) -> SourceResult<String> {
        match self {
            Self::Remote { url, timeout } => {
                M3uSourceHandler::new(*timeout)?.fetch_playlist(url).await
            }
            Self::File(path) => M3uSourceHandler::read_playlist_file(path).await,
        }
    }
}

/// Result of the pure part of the pipeline
#[derive(Debug, Clone)]
pub struct ProcessedPlaylist {
    pub records: Vec<ChannelRecord>,
    pub parse_stats: ParseStats,
    pub filtered: usize,
    pub mapping_stats: MappingStats,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub output_path: PathBuf,
    pub channel_count: usize,
    pub parse_stats: ParseStats,
    pub mapping_stats: MappingStats,
}

/// Parse, filter and map playlist text. Never fails.
pub fn process_playlist(content: &str, rules: &RuleConfig) -> ProcessedPlaylist {
    let (records, parse_stats) = parse_playlist_with_stats(content);
    let filtered_records = FilterEngine::new(rules).apply(records);
    let filtered = filtered_records.len();
    let (records, mapping_stats) = DataMappingEngine::new(rules).apply_with_stats(filtered_records);

    ProcessedPlaylist {
        records,
        parse_stats,
        filtered,
        mapping_stats,
    }
}

/// Transform playlist text into the output document
pub fn transform_playlist(content: &str, rules: &RuleConfig) -> String {
    PlaylistGenerator::generate_m3u_content(&process_playlist(content, rules).records)
}

pub struct PlaylistPipeline {
    source: PlaylistSource,
    output_path: PathBuf,
    rules: RuleConfig,
}

impl PlaylistPipeline {
    pub fn new(source: PlaylistSource, output_path: PathBuf, rules: RuleConfig) -> Self {
        Self {
            source,
            output_path,
            rules,
        }
    }

    /// Pipeline fetching from the configured remote source
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PlaylistSource::Remote {
                url: config.source.url.clone(),
                timeout: config.source.timeout,
            },
            config.output.path.clone(),
            config.rules.clone(),
        )
    }

    pub fn with_source(mut self, source: PlaylistSource) -> Self {
        self.source = source;
        self
    }

    pub fn source(&self) -> &PlaylistSource {
        &self.source
    }

    pub async fn run(&self) -> AppResult<PipelineOutcome> {
        let started = Instant::now();

        let content = self.source.load().await?;
        let processed = process_playlist(&content, &self.rules);
        let document = PlaylistGenerator::generate_m3u_content(&processed.records);
        PlaylistGenerator::save_m3u_file(&self.output_path, &document).await?;

        info!(
            "Completed pipeline duration={:?} parsed={} filtered={} written={}",
            started.elapsed(),
            processed.parse_stats.records,
            processed.filtered,
            processed.records.len()
        );

        Ok(PipelineOutcome {
            output_path: self.output_path.clone(),
            channel_count: processed.records.len(),
            parse_stats: processed.parse_stats,
            mapping_stats: processed.mapping_stats,
        })
    }
}
