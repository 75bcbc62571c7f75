//! Writes feature and error records to one CSV file.
//!
//! The header is the union of every key seen in the run with `url` first and
//! the rest sorted. Rows render missing keys as empty cells.

use crate::error::Result;
use crate::results::{Record, URL_KEY};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// Column label for a feature key: `cta_count` becomes `CTA COUNT`
pub fn header_label(key: &str) -> String {
    key.to_uppercase().replace('_', " ")
}

/// Union of all keys, `url` first, the rest in lexicographic order
pub fn column_keys(records: &[Record]) -> Vec<String> {
    let rest: BTreeSet<&str> = records
        .iter()
        .flat_map(Record::keys)
        .filter(|k| *k != URL_KEY)
        .collect();
    std::iter::once(URL_KEY)
        .chain(rest)
        .map(str::to_string)
        .collect()
}

/// Writes `records` as CSV to `path`
pub fn write_results<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_to(file, records)?;
    ::log::info!(
        "Wrote {} rows to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Writes `records` as CSV to any writer
pub fn write_to<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let keys = column_keys(records);
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(keys.iter().map(|k| header_label(k)))?;
    for record in records {
        csv_writer.write_record(keys.iter().map(|k| {
            record
                .get(k)
                .map(|value| value.to_string())
                .unwrap_or_default()
        }))?;
    }
    csv_writer.flush()?;
    Ok(())
}
