//! Release source: where candidates and archives come from
//!
//! # Modules
//!
//! - [`page`]: Extracts release candidates from the vendor's HTML page
//! - [`http`]: reqwest-backed [`ReleaseSource`] implementation

#[cfg(test)]
use mockall::automock;

use reqwest::Url;

use crate::error::SyncError;
use crate::version::Version;

pub mod http;
pub mod page;

pub use http::HttpReleaseSource;
pub use page::{PageParser, RELEASE_LABEL_PATTERN};

/// A downloadable release found on the vendor page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    /// Normalized link text, e.g. "CTRE Phoenix Framework (No Installer) package 5.19.4 (.zip)"
    pub display_name: String,
    pub download_url: Url,
    pub version: Version,
}

/// Transfer state reported once per received chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Bytes received so far
    pub received: u64,
    /// Advertised content length, if the server sent one
    pub total: Option<u64>,
}

/// Receives download progress notifications
#[cfg_attr(test, automock)]
pub trait DownloadObserver: Send + Sync {
    fn on_progress(&self, progress: DownloadProgress);
}

/// Observer that discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl DownloadObserver for NoProgress {
    fn on_progress(&self, _progress: DownloadProgress) {}
}

/// Trait for fetching release information and archives
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches the release page and extracts every matching candidate
    ///
    /// # Returns
    /// * `Ok(Vec<ReleaseCandidate>)` - Candidates in page order (possibly empty)
    /// * `Err(SyncError)` - Network failure, non-2xx status, or a malformed version label
    async fn fetch_candidates(&self, page_url: &Url) -> Result<Vec<ReleaseCandidate>, SyncError>;

    /// Downloads an archive fully into memory, notifying `observer` per chunk
    async fn fetch_archive(
        &self,
        url: &Url,
        observer: &dyn DownloadObserver,
    ) -> Result<Vec<u8>, SyncError>;
}
