//! M3U source retrieval
//!
//! Fetches the upstream playlist over HTTP(S), or reads it from disk when
//! running offline. A single attempt is made; any failure aborts the run.

use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{SourceError, SourceResult};
use crate::utils::url::UrlUtils;

/// M3U source handler
pub struct M3uSourceHandler {
    client: Client,
}

impl M3uSourceHandler {
    /// Create a handler whose requests are bounded by `timeout`
    pub fn new(timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("m3u-filter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Request {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    /// GET `url` and return the body as text
    pub async fn fetch_playlist(&self, url: &str) -> SourceResult<String> {
        let display_url = UrlUtils::obfuscate_credentials(url);
        info!("Connecting to M3U source: {}", display_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(display_url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: display_url,
            });
        }
        debug!(
            "Connected to M3U source, content length: {:?} bytes",
            response.content_length()
        );

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::from_reqwest(display_url.clone(), e))?;

        let text = String::from_utf8(bytes.to_vec()).map_err(|e| SourceError::InvalidBody {
            url: display_url.clone(),
            message: e.to_string(),
        })?;

        info!("Fetched {} bytes from {}", text.len(), display_url);
        Ok(text)
    }

    /// Read a playlist from a local file
    pub async fn read_playlist_file(path: &Path) -> SourceResult<String> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SourceError::Read {
                path: path.display().to_string(),
                source: e,
            })?;
        info!("Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }
}
