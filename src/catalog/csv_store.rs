//! Catalog persistence
//!
//! One comma-delimited row per media file, UTF-8, columns in
//! [`Attribute::ALL`] order. A header row is written on save; files written
//! without one are still readable.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::{Attribute, Catalog, CatalogRecord};
use crate::error::{CharlotteError, CharlotteResult};

/// Load a catalog file
pub fn load(path: &Path) -> CharlotteResult<Catalog> {
    let file = File::open(path)?;
    let catalog = read_from(file)?;
    debug!("📚 Loaded {} tracks from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Read catalog rows, skipping (and logging) rows that cannot be used
pub fn read_from<R: Read>(reader: R) -> CharlotteResult<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut catalog = Catalog::new();

    for (row, result) in reader.records().enumerate() {
        let fields = match result {
            Ok(fields) => fields,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("⚠️ Skipping unreadable catalog row {}: {}", row, e);
                continue;
            }
        };

        if row == 0 && fields.get(0) == Some(Attribute::FileName.column()) {
            continue;
        }

        let mut record = CatalogRecord::default();
        for (column, attribute) in Attribute::ALL.iter().enumerate() {
            record.set(*attribute, fields.get(column).map(str::to_string));
        }

        match catalog.push(record) {
            Ok(()) => {}
            Err(CharlotteError::MalformedEntry { reason, .. }) => {
                warn!("⚠️ Skipping catalog row {}: {}", row, reason);
            }
            Err(CharlotteError::DuplicateFileName(name)) => {
                warn!("⚠️ Skipping catalog row {}: duplicate file '{}'", row, name);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(catalog)
}

/// Write a catalog file, replacing any previous content
pub fn save(catalog: &Catalog, path: &Path) -> CharlotteResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_to(catalog, file)?;
    debug!("💾 Wrote {} tracks to {:?}", catalog.len(), path);
    Ok(())
}

/// Write the header and every record in catalog order
pub fn write_to<W: Write>(catalog: &Catalog, writer: W) -> CharlotteResult<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(writer);

    writer.write_record(Attribute::ALL.iter().map(|a| a.column()))?;
    for record in catalog.records() {
        writer.write_record(Attribute::ALL.iter().map(|a| record.get(*a).unwrap_or("")))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headerless_short_rows() {
        let data = "So What.mp3,So What,Miles Davis\nBlue.mp3\n";
        let catalog = read_from(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let first = catalog.get(0).unwrap();
        assert_eq!(first.get(Attribute::Artist), Some("Miles Davis"));
        assert_eq!(first.get(Attribute::Genre), None);
        assert_eq!(catalog.get(1).unwrap().title, None);
    }

    #[test]
    fn test_malformed_and_duplicate_rows_skipped() {
        let data = "\
music_file,track_name,track_artist,track_albumartist,track_composer,track_album,track_genre,track_duration,track_year,track_filesize
a.mp3,A,,,,,,,,
,Orphan,,,,,,,,
a.mp3,Again,,,,,,,,
b.mp3,B,,,,,,,,
";
        let catalog = read_from(data.as_bytes()).unwrap();

        let names: Vec<&str> = catalog.records().iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.mp3", "b.mp3"]);
        assert_eq!(catalog.get(0).unwrap().title.as_deref(), Some("A"));
    }

    #[test]
    fn test_embedded_delimiters_quoted() {
        let catalog = Catalog::from_records(vec![CatalogRecord::new("x.mp3")
            .with(Attribute::Title, "Hello, Goodbye")
            .with(Attribute::Artist, "The \"Fab\" Four")])
        .unwrap();

        let mut buffer = Vec::new();
        write_to(&catalog, &mut buffer).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.contains("\"Hello, Goodbye\""));

        let reloaded = read_from(buffer.as_slice()).unwrap();
        assert_eq!(reloaded.records(), catalog.records());
    }
}
