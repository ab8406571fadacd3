//! Vendor page parser
//!
//! The vendor publishes releases as plain hyperlinks whose text reads like
//!
//! ```text
//! CTRE Phoenix Framework (No Installer) package 5.19.4 (.zip)
//! ```
//!
//! Everything that couples this crate to the page's markup lives here.

use regex::Regex;
use reqwest::Url;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::source::ReleaseCandidate;
use crate::version::parse_version;

/// Link text of a no-installer zip package; group 1 is the version token
pub const RELEASE_LABEL_PATTERN: &str =
    r"CTRE Phoenix Framework \(No Installer\) package (.+?) \(\.zip\)";

/// Parser for the vendor's release page
pub struct PageParser {
    /// Regex for an anchor element: `<a ... href="target" ...>text</a>`
    anchor_re: Regex,
    /// Regex for the release label, see [`RELEASE_LABEL_PATTERN`]
    label_re: Regex,
    /// Regex for inline tags nested inside the anchor text
    tag_re: Regex,
}

impl PageParser {
    pub fn new() -> Self {
        Self {
            // href may be double-quoted, single-quoted or bare; the leading
            // whitespace keeps `data-href` and friends out
            anchor_re: Regex::new(
                r#"(?is)<a\b[^>]*?\shref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))[^>]*>(.*?)</a\s*>"#,
            )
            .unwrap(),
            label_re: Regex::new(RELEASE_LABEL_PATTERN).unwrap(),
            tag_re: Regex::new(r"(?s)<[^>]*>").unwrap(),
        }
    }

    /// Extract every release candidate from `html`
    ///
    /// Relative link targets are resolved against `page_url`. A label that
    /// matches the pattern but carries an unparseable version is an error.
    pub fn parse(&self, html: &str, page_url: &Url) -> Result<Vec<ReleaseCandidate>, SyncError> {
        let mut candidates = Vec::new();

        for caps in self.anchor_re.captures_iter(html) {
            let Some(href) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) else {
                continue;
            };
            let text = self.link_text(caps.get(4).map_or("", |m| m.as_str()));

            let Some(label) = self.label_re.captures(&text) else {
                continue;
            };
            let token = label.get(1).map_or("", |m| m.as_str());
            let version = parse_version(token)?;

            let target = decode_entities(href.as_str().trim());
            let Ok(download_url) = page_url.join(&target).inspect_err(|e| {
                warn!("Skipping release '{}' with bad link '{}': {}", text, target, e);
            }) else {
                continue;
            };

            debug!("Found release {} at {}", version, download_url);
            candidates.push(ReleaseCandidate {
                display_name: text,
                download_url,
                version,
            });
        }

        Ok(candidates)
    }

    /// Visible text of an anchor: nested tags removed, entities decoded,
    /// whitespace collapsed
    fn link_text(&self, inner_html: &str) -> String {
        let stripped = self.tag_re.replace_all(inner_html, "");
        decode_entities(&stripped)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for PageParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Named and numeric character references decoded in a single pass
fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{latest_candidate, max_version};
    use rstest::rstest;

    const PAGE_URL: &str = "http://www.ctr-electronics.com/hro.html";

    const FIXTURE: &str = r#"<html><body>
<ul>
  <li><a href="http://www.ctr-electronics.com/downloads/installers/CTRE_Phoenix_Framework_v5.18.1.zip">CTRE Phoenix Framework (No Installer) package 5.18.1 (.zip)</a></li>
  <li><a class="dl" href="/downloads/installers/CTRE_Phoenix_Framework_v5.19.4.zip">
      CTRE Phoenix Framework (No Installer)
      package 5.19.4 (.zip)</a></li>
  <li><a href='downloads/installers/CTRE_Phoenix_Framework_v5.19.0.zip'><b>CTRE Phoenix Framework (No&nbsp;Installer) package 5.19.0 (.zip)</b></a></li>
  <li><a href="/downloads/installers/CTRE_Phoenix_Framework_v5.19.4.exe">CTRE Phoenix Framework Installer 5.19.4 (.exe)</a></li>
</ul>
</body></html>"#;

    fn parse(html: &str) -> Result<Vec<ReleaseCandidate>, SyncError> {
        PageParser::new().parse(html, &Url::parse(PAGE_URL).unwrap())
    }

    #[test]
    fn parse_returns_only_matching_links() {
        let candidates = parse(FIXTURE).unwrap();

        let versions: Vec<String> = candidates.iter().map(|c| c.version.to_string()).collect();
        assert_eq!(versions, vec!["5.18.1", "5.19.4", "5.19.0"]);
    }

    #[test]
    fn parsed_versions_resolve_to_highest() {
        let candidates = parse(FIXTURE).unwrap();

        let max = max_version(candidates.iter().map(|c| c.version.clone())).unwrap();
        assert_eq!(max.to_string(), "5.19.4");

        let latest = latest_candidate(candidates).unwrap();
        assert_eq!(
            latest.download_url.as_str(),
            "http://www.ctr-electronics.com/downloads/installers/CTRE_Phoenix_Framework_v5.19.4.zip"
        );
    }

    #[test]
    fn parse_resolves_relative_links_against_page_url() {
        let candidates = parse(FIXTURE).unwrap();

        assert_eq!(
            candidates[2].download_url.as_str(),
            "http://www.ctr-electronics.com/downloads/installers/CTRE_Phoenix_Framework_v5.19.0.zip"
        );
    }

    #[test]
    fn parse_normalizes_display_name() {
        let candidates = parse(FIXTURE).unwrap();

        assert_eq!(
            candidates[1].display_name,
            "CTRE Phoenix Framework (No Installer) package 5.19.4 (.zip)"
        );
        assert_eq!(
            candidates[2].display_name,
            "CTRE Phoenix Framework (No Installer) package 5.19.0 (.zip)"
        );
    }

    #[rstest]
    #[case("")]
    #[case("<html><body>No downloads today</body></html>")]
    #[case(r#"<a href="/x.zip">CTRE Phoenix Framework package 5.19.4 (.zip)</a>"#)]
    #[case(r#"<a name="anchor">CTRE Phoenix Framework (No Installer) package 5.19.4 (.zip)</a>"#)]
    fn parse_returns_empty_when_nothing_matches(#[case] html: &str) {
        assert!(parse(html).unwrap().is_empty());
    }

    #[test]
    fn parse_fails_on_malformed_version_label() {
        let html = r#"<a href="/x.zip">CTRE Phoenix Framework (No Installer) package next (.zip)</a>"#;

        let result = parse(html);

        assert!(matches!(
            result,
            Err(SyncError::VersionFormat { ref input, .. }) if input == "next"
        ));
    }

    #[test]
    fn parse_decodes_entities_in_link_target() {
        let html = r#"<a href="/get?file=Phoenix_5.20.0.zip&amp;mirror=1">CTRE Phoenix Framework (No Installer) package 5.20.0 (.zip)</a>"#;

        let candidates = parse(html).unwrap();

        assert_eq!(
            candidates[0].download_url.as_str(),
            "http://www.ctr-electronics.com/get?file=Phoenix_5.20.0.zip&mirror=1"
        );
    }

    #[test]
    fn parse_decodes_numeric_references_in_label() {
        let html = r#"<a href="/x.zip">CTRE Phoenix Framework &#40;No Installer&#41; package 5.19.4 &#40;.zip&#41;</a>"#;

        let candidates = parse(html).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].version.to_string(), "5.19.4");
    }

    #[test]
    fn parse_ignores_prefixed_href_attributes() {
        let html = r#"<a data-href="/wrong.zip" href="/right.zip">CTRE Phoenix Framework (No Installer) package 5.19.4 (.zip)</a>"#;

        let candidates = parse(html).unwrap();

        assert_eq!(
            candidates[0].download_url.as_str(),
            "http://www.ctr-electronics.com/right.zip"
        );
    }

    #[rstest]
    #[case("a &amp; b", "a & b")]
    #[case("&lt;tag&gt;", "<tag>")]
    #[case("&amp;lt;", "&lt;")]
    #[case("no&nbsp;break", "no\u{a0}break")]
    #[case("&#40;No Installer&#41;", "(No Installer)")]
    #[case("&#x28;.zip&#x29;", "(.zip)")]
    fn decode_entities_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_entities(input), expected);
    }
}
