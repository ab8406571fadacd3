//! Maximum version resolution
//!
//! Used for both sides of the comparison: the candidates scraped from the
//! vendor page and the version directories already in the repository.

use crate::error::SyncError;
use crate::source::ReleaseCandidate;
use crate::version::Version;

/// Find the maximum version
///
/// # Returns
/// * `Ok(Version)` - An element no other element compares greater than
/// * `Err(SyncError::EmptyInput)` - If `versions` yields nothing
pub fn max_version<I>(versions: I) -> Result<Version, SyncError>
where
    I: IntoIterator<Item = Version>,
{
    versions
        .into_iter()
        .max()
        .ok_or_else(|| SyncError::EmptyInput("no versions to compare".to_string()))
}

/// Pick the candidate carrying the highest version
///
/// Ties keep the last candidate in page order.
pub fn latest_candidate(
    candidates: Vec<ReleaseCandidate>,
) -> Result<ReleaseCandidate, SyncError> {
    candidates
        .into_iter()
        .max_by(|a, b| a.version.cmp(&b.version))
        .ok_or_else(|| SyncError::EmptyInput("no release candidates".to_string()))
}
