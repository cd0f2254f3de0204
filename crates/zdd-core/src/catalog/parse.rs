//! Zenodo record JSON structures and mapping to manifest entries.
//!
//! The records API has shipped several shapes over time: file names come as
//! `key` or `filename`, download URLs as `links.self` or `links.content`.
//! Both are tolerated; a file entry missing either field is skipped.

use serde::Deserialize;

use crate::manifest::ManifestEntry;

/// A Zenodo record as returned by `/api/records/<id>`.
#[derive(Debug, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub metadata: Option<RecordInfo>,
    #[serde(default)]
    pub files: Vec<RecordFile>,
}

#[derive(Debug, Deserialize)]
pub struct RecordInfo {
    #[serde(default)]
    pub title: Option<String>,
}

/// One file entry of a record, tolerant of both API shapes.
#[derive(Debug, Deserialize)]
pub struct RecordFile {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub links: Option<FileLinks>,
}

#[derive(Debug, Deserialize)]
pub struct FileLinks {
    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl RecordFile {
    /// Normalize into a manifest entry, or `None` when name or URL is missing.
    fn to_entry(&self) -> Option<ManifestEntry> {
        let name = self.key.clone().or_else(|| self.filename.clone())?;
        let url = self
            .links
            .as_ref()
            .and_then(|l| l.self_url.clone().or_else(|| l.content.clone()))?;
        Some(ManifestEntry {
            name,
            url,
            expected_size: self.size,
        })
    }
}

impl Record {
    /// Record title, with the original's fallback for untitled records.
    pub fn title(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.title.as_deref())
            .unwrap_or("Untitled_Dataset")
    }

    /// Build the ordered manifest. File entries missing a name or download
    /// URL are logged and skipped rather than failing the run.
    pub fn manifest(&self) -> Vec<ManifestEntry> {
        self.files
            .iter()
            .filter_map(|f| {
                let entry = f.to_entry();
                if entry.is_none() {
                    tracing::warn!("skipping unparseable file entry: {:?}", f);
                }
                entry
            })
            .collect()
    }
}
