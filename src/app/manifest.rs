//! Manifest parsing and page counting
//!
//! OPenn manifests list one file per line as `<hash> <relative-path>`:
//!
//! ```text
//! 0deb0ba96a5a5b67faa2bafae39752ad50184cc4  data/master/6837_0112.tif
//! 34416e6d8fdb9d309b5a6f016f53da08e6de9d15  data/web/6837_0165_web.jpg.xmp
//! ```
//!
//! Digital Walters manifests add a shelfmark directory:
//!
//! ```text
//! 384055e9d9a5f153f5eb0292b0d56502 data/W.168/master/W168_000229_600.tif
//! ```
//!
//! A page is a master image: a `.tif` or `.jpg` under `data/master/` or
//! `data/<shelfmark>/master/`.

use std::sync::OnceLock;

use regex::Regex;

/// Master image path, with an optional shelfmark directory
const MASTER_IMAGE_PATTERN: &str = r"^(?:\./)?data/(?:[\w.-]+/)?master/.+\.(?:tif|jpg)$";

fn master_image_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(MASTER_IMAGE_PATTERN).expect("master image pattern is valid"))
}

/// One line of a manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry<'a> {
    pub hash: &'a str,
    pub path: &'a str,
}

impl<'a> ManifestEntry<'a> {
    /// Splits a manifest line into hash and path
    ///
    /// Returns `None` for blank lines and lines with fewer than two fields.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let hash = fields.next()?;
        let path = fields.next()?;
        Some(Self { hash, path })
    }

    /// True when the entry is a master image and therefore a page
    pub fn is_master_image(&self) -> bool {
        master_image_regex().is_match(self.path)
    }
}

/// Iterates over the parseable entries of a manifest
pub fn entries(manifest: &str) -> impl Iterator<Item = ManifestEntry<'_>> {
    manifest.lines().filter_map(ManifestEntry::parse)
}

/// Counts master images listed in a manifest
///
/// ```
/// use openn_resolver::app::manifest::count_pages;
///
/// let manifest = "h1 data/master/a.tif\nh2 data/web/b.jpg\nh3 data/W.168/master/c.jpg\n";
/// assert_eq!(count_pages(manifest), 2);
/// ```
pub fn count_pages(manifest: &str) -> usize {
    entries(manifest).filter(ManifestEntry::is_master_image).count()
}
