use std::path::Path;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::models::ChannelRecord;

/// Header line of every extended M3U document
pub const M3U_HEADER: &str = "#EXTM3U";

/// Renders records back into extended M3U and persists the result
pub struct PlaylistGenerator;

impl PlaylistGenerator {
    /// Render the header followed by one descriptor/locator pair per record
    pub fn generate_m3u_content(records: &[ChannelRecord]) -> String {
        let mut m3u = String::from(M3U_HEADER);
        m3u.push('\n');

        for record in records {
            let extinf = record.metadata_line();
            debug!("M3U Generation - EXTINF: '{}'", extinf);
            m3u.push_str(&extinf);
            m3u.push('\n');
            m3u.push_str(&record.stream_url);
            m3u.push('\n');
        }

        m3u
    }

    /// Replace the file at `path` with `content` in a single write.
    ///
    /// Missing parent directories are created.
    pub async fn save_m3u_file(path: &Path, content: &str) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::io(parent.display().to_string(), e))?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|e| AppError::io(path.display().to_string(), e))?;

        info!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}
