//! Local repository inspection and population
//!
//! The repository is a plain directory tree; every version lives in a
//! directory named exactly after its version string:
//!
//! ```text
//! com/ctre/ctrlib/
//! ├── ctrlib-java/5.19.4/ctrlib-java-5.19.4.jar
//! │                      ctrlib-java-5.19.4-sources.jar
//! └── ctrlib-cpp/5.19.4/ctrlib-cpp-5.19.4-linuxathena.zip
//! ```

pub mod repackage;

pub use repackage::{RepackagedOutput, repackage};

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::config::RepositoryLayout;
use crate::error::SyncError;
use crate::version::{Version, max_version, parse_version};

/// Highest version directory directly under `base`
///
/// Regular files are ignored. A subdirectory whose name is not a version
/// is an error rather than being skipped.
///
/// # Returns
/// * `Ok(Version)` - The current version
/// * `Err(SyncError::EmptyInput)` - If `base` is missing or has no subdirectories
/// * `Err(SyncError::VersionFormat)` - If a subdirectory name is not a version
pub fn current_version(base: &Path) -> Result<Version, SyncError> {
    let entries = match fs::read_dir(base) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SyncError::EmptyInput(format!(
                "{} does not exist",
                base.display()
            )));
        }
        Err(e) => return Err(SyncError::io(base, e)),
    };

    let mut versions = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| SyncError::io(base, e))?.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(SyncError::VersionFormat {
                input: path.display().to_string(),
                reason: "directory name is not valid UTF-8".to_string(),
            });
        };
        versions.push(parse_version(name)?);
    }

    max_version(versions).map_err(|_| {
        SyncError::EmptyInput(format!("no version directories under {}", base.display()))
    })
}

/// Version the repository holds for both artifacts
///
/// The Java and native roots are inspected separately and the lower of the
/// two wins, so a run that died between them is redone. `None` means at
/// least one root has no version yet.
pub fn repository_version(layout: &RepositoryLayout) -> Result<Option<Version>, SyncError> {
    let java = baseline(current_version(&layout.java_root))?;
    let native = baseline(current_version(&layout.native_root))?;
    debug!("Local versions: java={:?}, native={:?}", java, native);

    Ok(match (java, native) {
        (Some(java), Some(native)) => Some(java.min(native)),
        _ => None,
    })
}

fn baseline(result: Result<Version, SyncError>) -> Result<Option<Version>, SyncError> {
    match result {
        Ok(version) => Ok(Some(version)),
        Err(SyncError::EmptyInput(reason)) => {
            debug!("No baseline: {}", reason);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
