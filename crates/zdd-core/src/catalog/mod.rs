//! Zenodo catalog resolution: record reference → record metadata → manifest.
//!
//! The transfer engine only ever sees the resulting `ManifestEntry` list; it
//! does not know or care that the files came from a Zenodo record.

mod fetch;
mod parse;
mod record;
mod sanitize;

pub use fetch::{fetch_record, fetch_record_at, record_url};
pub use parse::{Record, RecordFile};
pub use record::parse_record_ref;
pub use sanitize::{output_dir_name, sanitize_title};
