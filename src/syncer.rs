//! Release synchronization: fetch → compare → download → repackage

use tracing::info;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::repository::{RepackagedOutput, repackage, repository_version};
use crate::source::{DownloadObserver, RELEASE_LABEL_PATTERN, ReleaseSource};
use crate::version::{Version, latest_candidate};

/// Result of one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The repository already holds the latest release (or something newer)
    UpToDate { current: Version, latest: Version },
    /// The latest release was downloaded and written to the repository
    Updated {
        /// Version held before this run; `None` for an empty repository
        previous: Option<Version>,
        latest: Version,
        output: RepackagedOutput,
    },
}

/// Runs the sync pipeline against one release source and repository
pub struct ReleaseSyncer<S: ReleaseSource> {
    source: S,
    config: SyncConfig,
}

impl<S: ReleaseSource> ReleaseSyncer<S> {
    pub fn new(source: S, config: SyncConfig) -> Self {
        Self { source, config }
    }

    /// Bring the repository up to the latest published release
    ///
    /// An empty repository always downloads. No step is retried; the first
    /// failure aborts the run and may leave a partially written version
    /// directory behind.
    pub async fn run(&self, observer: &dyn DownloadObserver) -> Result<SyncOutcome, SyncError> {
        let page_url = &self.config.page_url;
        info!("Fetching latest version from {}", page_url);

        let candidates = self.source.fetch_candidates(page_url).await?;
        if candidates.is_empty() {
            return Err(SyncError::EmptyInput(format!(
                "no link on {page_url} matches '{RELEASE_LABEL_PATTERN}'"
            )));
        }
        let latest = latest_candidate(candidates)?;
        info!(
            "Found version {} available at {}",
            latest.version, latest.download_url
        );

        let previous = repository_version(&self.config.layout)?;
        match &previous {
            Some(current) if *current >= latest.version => {
                info!("Repository already contains version {}", current);
                return Ok(SyncOutcome::UpToDate {
                    current: current.clone(),
                    latest: latest.version,
                });
            }
            Some(current) => info!("Repository is at version {}", current),
            None => info!("Repository holds no version yet"),
        }

        info!("Downloading {}", latest.download_url);
        let archive = self
            .source
            .fetch_archive(&latest.download_url, observer)
            .await?;

        info!("Unpacking {} bytes", archive.len());
        let output = repackage(
            &archive,
            &latest.download_url,
            &latest.version,
            &self.config.layout,
        )?;
        info!("Unpacked version {}", latest.version);

        Ok(SyncOutcome::Updated {
            previous,
            latest: latest.version,
            output,
        })
    }
}
