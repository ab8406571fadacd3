//! HTTP release source backed by reqwest

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::config::{CONNECT_TIMEOUT_MS, FETCH_TIMEOUT_MS};
use crate::error::SyncError;
use crate::source::page::PageParser;
use crate::source::{DownloadObserver, DownloadProgress, ReleaseCandidate, ReleaseSource};

/// Release source that scrapes the vendor page and downloads over HTTP
pub struct HttpReleaseSource {
    client: Client,
    parser: PageParser,
}

impl HttpReleaseSource {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("ctrlib-sync/", env!("CARGO_PKG_VERSION")))
                .connect_timeout(Duration::from_millis(CONNECT_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            parser: PageParser::new(),
        }
    }
}

impl Default for HttpReleaseSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Fail on anything outside 2xx
fn ensure_success(url: &Url, status: reqwest::StatusCode) -> Result<(), SyncError> {
    if status.is_success() {
        return Ok(());
    }
    warn!("{} returned status {}", url, status);
    Err(SyncError::HttpStatus {
        url: url.to_string(),
        status,
    })
}

#[async_trait::async_trait]
impl ReleaseSource for HttpReleaseSource {
    async fn fetch_candidates(&self, page_url: &Url) -> Result<Vec<ReleaseCandidate>, SyncError> {
        debug!("Fetching release page: {}", page_url);

        let response = self
            .client
            .get(page_url.clone())
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
            .send()
            .await
            .map_err(|e| SyncError::network(page_url.as_str(), e))?;

        ensure_success(page_url, response.status())?;

        let body = response
            .text()
            .await
            .map_err(|e| SyncError::network(page_url.as_str(), e))?;

        let candidates = self.parser.parse(&body, page_url)?;
        debug!(
            "Found {} release candidates on {}",
            candidates.len(),
            page_url
        );

        Ok(candidates)
    }

    async fn fetch_archive(
        &self,
        url: &Url,
        observer: &dyn DownloadObserver,
    ) -> Result<Vec<u8>, SyncError> {
        debug!("Downloading archive: {}", url);

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SyncError::network(url.as_str(), e))?;

        ensure_success(url, response.status())?;

        let total = response.content_length();
        let mut buffer = Vec::new();

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SyncError::network(url.as_str(), e))?
        {
            buffer.extend_from_slice(&chunk);
            observer.on_progress(DownloadProgress {
                received: buffer.len() as u64,
                total,
            });
        }

        debug!("Downloaded {} bytes from {}", buffer.len(), url);
        Ok(buffer)
    }
}
