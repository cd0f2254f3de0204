//! `zdd files <record>` – list a record's files without downloading.

use anyhow::{Context, Result};
use zdd_core::catalog;

pub fn run_files(record_ref: &str) -> Result<()> {
    let record_id = catalog::parse_record_ref(record_ref)
        .with_context(|| format!("cannot identify a Zenodo record ID in {record_ref:?}"))?;
    let record = catalog::fetch_record(&record_id)?;

    println!("{} ({} file(s))", record.title(), record.manifest().len());
    for entry in record.manifest() {
        match entry.expected_size {
            Some(size) => println!("  {:>12}  {}", size, entry.name),
            None => println!("  {:>12}  {}", "?", entry.name),
        }
    }
    Ok(())
}
