use std::path::PathBuf;

use reqwest::Url;

// =============================================================================
// Source
// =============================================================================

/// Vendor page listing the downloadable releases
pub const DEFAULT_PAGE_URL: &str = "http://www.ctr-electronics.com/hro.html";

/// Timeout for fetching the release page in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Timeout for establishing any connection in milliseconds (30 seconds)
pub const CONNECT_TIMEOUT_MS: u64 = 30_000;

// =============================================================================
// Repository layout
// =============================================================================

/// Maven group directory, relative to the working directory
pub const REPOSITORY_BASE: &str = "com/ctre/ctrlib";

/// Artifact holding the Java jars
pub const JAVA_ARTIFACT: &str = "ctrlib-java";

/// Artifact holding the zipped native library
pub const NATIVE_ARTIFACT: &str = "ctrlib-cpp";

/// Where version directories live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    /// Root of the `ctrlib-java/<version>/` directories
    pub java_root: PathBuf,
    /// Root of the `ctrlib-cpp/<version>/` directories
    pub native_root: PathBuf,
}

impl RepositoryLayout {
    /// Layout rooted at `base`, e.g. `com/ctre/ctrlib`
    pub fn under(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            java_root: base.join(JAVA_ARTIFACT),
            native_root: base.join(NATIVE_ARTIFACT),
        }
    }
}

impl Default for RepositoryLayout {
    fn default() -> Self {
        Self::under(REPOSITORY_BASE)
    }
}

/// Everything one sync run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub page_url: Url,
    pub layout: RepositoryLayout,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_url: Url::parse(DEFAULT_PAGE_URL).expect("DEFAULT_PAGE_URL is a valid URL"),
            layout: RepositoryLayout::default(),
        }
    }
}

// =============================================================================
// Data directory
// =============================================================================

/// Returns the path to the data directory for ctrlib-sync.
/// Uses $XDG_DATA_HOME/ctrlib-sync if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/ctrlib-sync,
/// or ./ctrlib-sync if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("ctrlib-sync.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("ctrlib-sync")
}
