//! Release page and vendor archive fixtures

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use reqwest::Url;
use tempfile::TempDir;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use ctrlib_sync::SyncConfig;
use ctrlib_sync::config::RepositoryLayout;

/// Vendor page linking one no-installer package per version plus an
/// installer link that must be ignored
pub fn release_page(versions: &[&str]) -> String {
    let mut html = String::from("<html><body><h2>Phoenix</h2><ul>\n");
    for version in versions {
        html.push_str(&format!(
            "<li><a href=\"/downloads/CTRE_Phoenix_Framework_v{version}.zip\">\
             CTRE Phoenix Framework (No Installer) package {version} (.zip)</a></li>\n"
        ));
    }
    html.push_str(
        "<li><a href=\"/downloads/CTRE_Phoenix_Framework_Installer.exe\">\
         CTRE Phoenix Framework Installer (.exe)</a></li>\n",
    );
    html.push_str("</ul></body></html>");
    html
}

/// Download path the release page uses for `version`
pub fn archive_path(version: &str) -> String {
    format!("/downloads/CTRE_Phoenix_Framework_v{version}.zip")
}

/// Zip laid out like the vendor's no-installer package
pub fn vendor_archive(version: &str) -> Vec<u8> {
    let folder = format!("CTRE_Phoenix_Framework_v{version}");
    let entries = [
        (format!("{folder}/java/lib/CTRE_Phoenix.jar"), "phoenix jar"),
        (
            format!("{folder}/java/lib/CTRE_Phoenix-sources.jar"),
            "phoenix sources",
        ),
        (
            format!("{folder}/java/lib/libCTRE_PhoenixCCI.so"),
            "phoenix native",
        ),
        (format!("{folder}/cpp/include/ctre/Phoenix.h"), "#pragma once"),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Temporary repository holding `versions` under both artifact roots,
/// with a config pointing at `page_url`
pub fn create_test_repository(page_url: &str, versions: &[&str]) -> (TempDir, SyncConfig) {
    let temp_dir = TempDir::new().unwrap();
    let layout = RepositoryLayout::under(temp_dir.path().join("com/ctre/ctrlib"));

    fs::create_dir_all(&layout.java_root).unwrap();
    fs::create_dir_all(&layout.native_root).unwrap();
    for version in versions {
        fs::create_dir(layout.java_root.join(version)).unwrap();
        fs::create_dir(layout.native_root.join(version)).unwrap();
    }

    let config = SyncConfig {
        page_url: Url::parse(page_url).unwrap(),
        layout,
    };
    (temp_dir, config)
}

/// Names and contents of every entry in the zip at `path`
pub fn zip_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (entry.name().to_string(), data)
        })
        .collect()
}
