//! Local ZIP construction.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::model::DocumentRecord;

use super::{json_file_name, to_json_bytes};

/// Build a ZIP archive with one pretty-printed JSON entry per document.
///
/// Entry names follow [`json_file_name`]. A name already used in the archive
/// gets a numeric suffix (`report-2.json`) instead of replacing the earlier
/// entry.
pub fn build_archive<'a, I>(documents: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a DocumentRecord>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut used = HashSet::new();

    for doc in documents {
        let name = unique_name(json_file_name(doc.filename()), &mut used);
        let json = to_json_bytes(doc)?;
        writer.start_file(name, options)?;
        writer
            .write_all(&json)
            .map_err(|e| Error::Packaging(e.to_string()))?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }

    let stem = name.strip_suffix(".json").unwrap_or(&name).to_string();
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}.json", stem, n);
        if used.insert(candidate.clone()) {
            log::warn!("Duplicate archive entry {}, stored as {}", name, candidate);
            return candidate;
        }
        n += 1;
    }
}
