//! File manifest: the ordered list of remote files the engine works through.
//!
//! Entries are produced by the catalog resolver (or by tests); the transfer
//! engine itself does not care where they came from.

/// One remote file to be mirrored locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Local filename, also used for filter matching.
    pub name: String,
    /// Direct download URL.
    pub url: String,
    /// Total size in bytes when the catalog reports one.
    pub expected_size: Option<u64>,
}

impl ManifestEntry {
    /// True if the entry has the fields required to attempt a download and the
    /// name is usable as a single path component. Malformed entries are
    /// skipped by the orchestrator, never attempted.
    pub fn is_well_formed(&self) -> bool {
        if self.name.is_empty() || self.url.is_empty() {
            return false;
        }
        // Reject names that would escape the destination directory.
        if self.name.contains('/') || self.name.contains('\\') {
            return false;
        }
        self.name != "." && self.name != ".."
    }

    /// Case-insensitive substring match against the name. `None` matches all.
    pub fn matches_filter(&self, filter: Option<&str>) -> bool {
        match filter {
            None => true,
            Some(f) => self.name.to_lowercase().contains(&f.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> ManifestEntry {
        ManifestEntry {
            name: name.to_string(),
            url: "https://example.org/f".to_string(),
            expected_size: None,
        }
    }

    #[test]
    fn well_formed_requires_name_and_url() {
        assert!(entry("data.bin").is_well_formed());
        assert!(!entry("").is_well_formed());
        let mut e = entry("data.bin");
        e.url.clear();
        assert!(!e.is_well_formed());
    }

    #[test]
    fn rejects_path_traversal_names() {
        assert!(!entry("a/b.bin").is_well_formed());
        assert!(!entry("a\\b.bin").is_well_formed());
        assert!(!entry("..").is_well_formed());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let e = entry("abcFoo.dat");
        assert!(e.matches_filter(None));
        assert!(e.matches_filter(Some("foo")));
        assert!(e.matches_filter(Some("FOO")));
        assert!(!e.matches_filter(Some("bar")));
        assert!(!entry("abc.zip").matches_filter(Some("foo")));
    }
}
