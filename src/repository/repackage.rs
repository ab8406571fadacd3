//! Repackaging of a downloaded vendor archive into the repository layout

use std::fs::{self, File};
use std::io::{Cursor, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::{debug, info};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::{JAVA_ARTIFACT, NATIVE_ARTIFACT, RepositoryLayout};
use crate::error::SyncError;
use crate::version::{Version, parse_version};

/// Java binary jar, relative to the archive's top-level folder
const JAR_ENTRY: &str = "java/lib/CTRE_Phoenix.jar";

/// Java sources jar, relative to the archive's top-level folder
const SOURCES_JAR_ENTRY: &str = "java/lib/CTRE_Phoenix-sources.jar";

/// Native library, relative to the archive's top-level folder
const NATIVE_LIBRARY_ENTRY: &str = "java/lib/libCTRE_PhoenixCCI.so";

/// Entry name inside the re-created native zip; deliberately unversioned
pub const NATIVE_LIBRARY_NAME: &str = "libCTRE_PhoenixCCI.so";

/// Native platform classifier used in the native zip's file name
const NATIVE_CLASSIFIER: &str = "linuxathena";

/// Download file suffix dropped from the archive's folder name
const ARCHIVE_SUFFIX: &str = ".zip";

/// Files written by [`repackage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepackagedOutput {
    pub java_dir: PathBuf,
    pub jar: PathBuf,
    pub sources_jar: PathBuf,
    pub native_dir: PathBuf,
    pub native_zip: PathBuf,
}

/// Top-level folder inside the vendor archive
///
/// Taken from the download URL's file name without its `.zip` suffix, e.g.
/// `.../CTRE_Phoenix_Framework_v5.19.4.zip` gives `CTRE_Phoenix_Framework_v5.19.4`.
/// Any other name is used as is. The archive is assumed to use the same name.
pub fn archive_prefix(download_url: &Url) -> Result<String, SyncError> {
    let segment = download_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| {
            SyncError::ArchiveFormat(format!(
                "cannot derive archive folder from {download_url}"
            ))
        })?;

    let stem = segment
        .len()
        .checked_sub(ARCHIVE_SUFFIX.len())
        .filter(|&split| {
            segment.is_char_boundary(split)
                && segment[split..].eq_ignore_ascii_case(ARCHIVE_SUFFIX)
        })
        .map_or(segment, |split| &segment[..split]);

    Ok(stem.to_string())
}

/// Extract the jars and native library from `archive` into `layout`
///
/// All three entries are read before anything is written, so a missing
/// entry leaves the repository untouched.
///
/// # Returns
/// * `Ok(RepackagedOutput)` - Paths of every file written
/// * `Err(SyncError::ArchiveFormat)` - Not a zip, or an expected entry is missing
/// * `Err(SyncError::Io)` / `Err(SyncError::ArchiveWrite)` - Writing the output failed
pub fn repackage(
    archive: &[u8],
    download_url: &Url,
    version: &Version,
    layout: &RepositoryLayout,
) -> Result<RepackagedOutput, SyncError> {
    let prefix = archive_prefix(download_url)?;
    debug!("Reading archive folder '{}'", prefix);

    let mut zip = ZipArchive::new(Cursor::new(archive)).map_err(|e| {
        SyncError::ArchiveFormat(format!("{download_url} is not a zip archive: {e}"))
    })?;

    let jar = read_entry(&mut zip, &format!("{prefix}/{JAR_ENTRY}"))?;
    let sources_jar = read_entry(&mut zip, &format!("{prefix}/{SOURCES_JAR_ENTRY}"))?;
    let native_library = read_entry(&mut zip, &format!("{prefix}/{NATIVE_LIBRARY_ENTRY}"))?;

    let java_dir = create_version_dir(&layout.java_root, version)?;
    let jar_path = java_dir.join(format!("{JAVA_ARTIFACT}-{version}.jar"));
    let sources_jar_path = java_dir.join(format!("{JAVA_ARTIFACT}-{version}-sources.jar"));
    write_file(&jar_path, &jar)?;
    write_file(&sources_jar_path, &sources_jar)?;

    let native_dir = create_version_dir(&layout.native_root, version)?;
    let native_zip_path =
        native_dir.join(format!("{NATIVE_ARTIFACT}-{version}-{NATIVE_CLASSIFIER}.zip"));
    write_single_entry_zip(&native_zip_path, NATIVE_LIBRARY_NAME, &native_library)?;

    info!(
        "Wrote {}, {} and {}",
        jar_path.display(),
        sources_jar_path.display(),
        native_zip_path.display()
    );

    Ok(RepackagedOutput {
        java_dir,
        jar: jar_path,
        sources_jar: sources_jar_path,
        native_dir,
        native_zip: native_zip_path,
    })
}

fn read_entry(zip: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<Vec<u8>, SyncError> {
    let mut entry = zip.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => {
            SyncError::ArchiveFormat(format!("missing entry '{name}'"))
        }
        other => SyncError::ArchiveFormat(format!("cannot open entry '{name}': {other}")),
    })?;

    let mut data = Vec::new();
    entry
        .read_to_end(&mut data)
        .map_err(|e| SyncError::ArchiveFormat(format!("cannot read entry '{name}': {e}")))?;

    debug!("Read {} ({} bytes)", name, data.len());
    Ok(data)
}

/// Directory for `version` under `root`
///
/// An existing directory whose name parses equal to `version` ("5.19.04"
/// for 5.19.4) is reused; otherwise one named after the normalized form is
/// created.
fn create_version_dir(root: &Path, version: &Version) -> Result<PathBuf, SyncError> {
    if let Some(existing) = find_version_dir(root, version)? {
        debug!("Reusing {} for version {}", existing.display(), version);
        return Ok(existing);
    }

    let dir = root.join(version.to_string());
    fs::create_dir_all(&dir).map_err(|e| SyncError::io(&dir, e))?;
    Ok(dir)
}

fn find_version_dir(root: &Path, version: &Version) -> Result<Option<PathBuf>, SyncError> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SyncError::io(root, e)),
    };

    for entry in entries {
        let path = entry.map_err(|e| SyncError::io(root, e))?.path();
        if !path.is_dir() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| parse_version(name).ok())
            .is_some_and(|existing| existing == *version);
        if matches {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), SyncError> {
    fs::write(path, data).map_err(|e| SyncError::io(path, e))
}

fn write_single_entry_zip(path: &Path, entry_name: &str, data: &[u8]) -> Result<(), SyncError> {
    let zip_error = |source: ZipError| SyncError::ArchiveWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| SyncError::io(path, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(entry_name, options).map_err(zip_error)?;
    zip.write_all(data).map_err(|e| SyncError::io(path, e))?;
    zip.finish().map_err(zip_error)?;

    Ok(())
}
