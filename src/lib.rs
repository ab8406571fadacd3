//! Mirrors the latest CTRE Phoenix SDK release into a local Maven-style
//! repository.
//!
//! # Modules
//!
//! - [`config`]: Constants, repository layout and data directory helpers
//! - [`error`]: The [`SyncError`](error::SyncError) type shared by every step
//! - [`logging`]: Tracing subscriber setup for the binary
//! - [`progress`]: Terminal progress bar for the archive download
//! - [`repository`]: Local version inspection and archive repackaging
//! - [`source`]: Release page scraping and archive download
//! - [`syncer`]: The fetch → compare → download → repackage pipeline
//! - [`version`]: Version parsing and ordering

pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod repository;
pub mod source;
pub mod syncer;
pub mod version;

pub use config::SyncConfig;
pub use error::SyncError;
pub use syncer::{ReleaseSyncer, SyncOutcome};
