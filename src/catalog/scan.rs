//! Media directory scanning
//!
//! Builds a fresh catalog from the audio files under a directory, reading
//! tags with lofty. Files without readable tags still get a record.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{Attribute, Catalog, CatalogRecord};
use crate::error::CharlotteResult;

/// Extensions treated as playable audio
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "m4a", "wav", "wma", "aac", "opus"];

/// Scan `root` (recursively, in file-name order) into a new catalog
///
/// A missing directory is an error. An empty one yields an empty catalog.
/// Files whose name is already in the catalog are skipped.
pub fn scan_directory(root: &Path) -> CharlotteResult<Catalog> {
    if !root.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("music directory not found: {}", root.display()),
        )
        .into());
    }

    let mut catalog = Catalog::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("⚠️ Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_audio(path) {
            continue;
        }

        if let Err(e) = catalog.push(read_record(path)) {
            warn!("⚠️ Skipping {:?}: {}", path, e);
        }
    }

    info!("🎵 Scanned {} tracks from {:?}", catalog.len(), root);
    Ok(catalog)
}

/// Find the on-disk path of a catalog file name under `root`
pub fn locate(root: &Path, file_name: &str) -> Option<PathBuf> {
    let direct = root.join(file_name);
    if direct.is_file() {
        return Some(direct);
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name().to_string_lossy() == file_name)
        .map(|e| e.into_path())
}

fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn read_record(path: &Path) -> CatalogRecord {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut record = CatalogRecord::new(file_name);

    if let Ok(metadata) = std::fs::metadata(path) {
        record.set(Attribute::FileSize, Some(human_size(metadata.len())));
    }

    match Probe::open(path).and_then(|p| p.read()) {
        Ok(tagged_file) => {
            record.set(
                Attribute::Duration,
                Some(format_duration(tagged_file.properties().duration())),
            );

            if let Some(tag) = tagged_file
                .primary_tag()
                .or_else(|| tagged_file.first_tag())
            {
                let keys = [
                    (Attribute::Title, ItemKey::TrackTitle),
                    (Attribute::Artist, ItemKey::TrackArtist),
                    (Attribute::AlbumArtist, ItemKey::AlbumArtist),
                    (Attribute::Composer, ItemKey::Composer),
                    (Attribute::Album, ItemKey::AlbumTitle),
                    (Attribute::Genre, ItemKey::Genre),
                ];
                for (attribute, key) in keys {
                    record.set(attribute, tag.get_string(&key).map(|s| s.to_string()));
                }
                record.set(Attribute::Year, tag.year().map(|y| y.to_string()));
            }
        }
        Err(e) => debug!("No readable tags in {:?}: {}", path, e),
    }

    record
}

/// Format a duration as H:MM:SS, rounded to the nearest second
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs_f64().round() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Human readable size with 1024-based units, e.g. "4.2 MB"
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(205)), "0:03:25");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1:02:05");
        assert_eq!(format_duration(Duration::from_millis(59_600)), "0:01:00");
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(4_404_019), "4.2 MB");
    }

    #[test]
    fn test_scan_skips_non_audio() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("cover.jpg"), b"jpeg").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"text").unwrap();
        std::fs::write(dir.path().join("b.mp3"), b"not really audio").unwrap();
        std::fs::write(dir.path().join("a.FLAC"), b"not really audio").unwrap();

        let catalog = scan_directory(dir.path()).unwrap();
        let names: Vec<&str> = catalog.records().iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.FLAC", "b.mp3"]);
        assert_eq!(catalog.get(1).unwrap().file_size.as_deref(), Some("16 B"));
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        assert!(scan_directory(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_locate_nested() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir(dir.path().join("album")).unwrap();
        std::fs::write(dir.path().join("album").join("deep.mp3"), b"").unwrap();

        let found = locate(dir.path(), "deep.mp3").unwrap();
        assert!(found.ends_with("album/deep.mp3"));
        assert!(locate(dir.path(), "absent.mp3").is_none());
    }
}
