//! Music Catalog
//!
//! An ordered, read-only list of track records. Catalog order is the order
//! records were appended and defines "previous" and "next".

pub mod csv_store;
pub mod scan;
pub mod store;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CharlotteError, CharlotteResult};

pub use store::CatalogStore;

/// A column of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    FileName,
    Title,
    Artist,
    AlbumArtist,
    Composer,
    Album,
    Genre,
    Duration,
    Year,
    FileSize,
}

impl Attribute {
    /// All attributes in persisted column order
    pub const ALL: [Attribute; 10] = [
        Attribute::FileName,
        Attribute::Title,
        Attribute::Artist,
        Attribute::AlbumArtist,
        Attribute::Composer,
        Attribute::Album,
        Attribute::Genre,
        Attribute::Duration,
        Attribute::Year,
        Attribute::FileSize,
    ];

    /// Column header in the persisted table
    pub fn column(&self) -> &'static str {
        match self {
            Attribute::FileName => "music_file",
            Attribute::Title => "track_name",
            Attribute::Artist => "track_artist",
            Attribute::AlbumArtist => "track_albumartist",
            Attribute::Composer => "track_composer",
            Attribute::Album => "track_album",
            Attribute::Genre => "track_genre",
            Attribute::Duration => "track_duration",
            Attribute::Year => "track_year",
            Attribute::FileSize => "track_filesize",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Attribute {
    type Err = ();

    /// Accepts column names, camelCase slot names and bare names,
    /// e.g. "track_artist", "trackArtist", "artist".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        let key = key.strip_prefix("track").filter(|k| !k.is_empty()).unwrap_or(key.as_str());

        match key {
            "musicfile" | "file" | "filename" => Ok(Attribute::FileName),
            "name" | "title" => Ok(Attribute::Title),
            "artist" => Ok(Attribute::Artist),
            "albumartist" => Ok(Attribute::AlbumArtist),
            "composer" => Ok(Attribute::Composer),
            "album" => Ok(Attribute::Album),
            "genre" => Ok(Attribute::Genre),
            "duration" | "length" => Ok(Attribute::Duration),
            "year" => Ok(Attribute::Year),
            "filesize" | "size" => Ok(Attribute::FileSize),
            _ => Err(()),
        }
    }
}

/// One playable media item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub file_name: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub composer: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    /// H:MM:SS
    pub duration: Option<String>,
    pub year: Option<String>,
    /// Human readable, e.g. "4.2 MB"
    pub file_size: Option<String>,
}

impl CatalogRecord {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter. Blank values are stored as absent.
    pub fn with(mut self, attribute: Attribute, value: impl Into<String>) -> Self {
        self.set(attribute, Some(value.into()));
        self
    }

    /// Value of an attribute, `None` when absent
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::FileName => Some(self.file_name.as_str()),
            Attribute::Title => self.title.as_deref(),
            Attribute::Artist => self.artist.as_deref(),
            Attribute::AlbumArtist => self.album_artist.as_deref(),
            Attribute::Composer => self.composer.as_deref(),
            Attribute::Album => self.album.as_deref(),
            Attribute::Genre => self.genre.as_deref(),
            Attribute::Duration => self.duration.as_deref(),
            Attribute::Year => self.year.as_deref(),
            Attribute::FileSize => self.file_size.as_deref(),
        }
    }

    /// Set an attribute. Blank values become `None`; the file name is
    /// stored verbatim (empty names are rejected by [`Catalog::push`]).
    pub fn set(&mut self, attribute: Attribute, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        let slot = match attribute {
            Attribute::FileName => {
                self.file_name = value.unwrap_or_default();
                return;
            }
            Attribute::Title => &mut self.title,
            Attribute::Artist => &mut self.artist,
            Attribute::AlbumArtist => &mut self.album_artist,
            Attribute::Composer => &mut self.composer,
            Attribute::Album => &mut self.album,
            Attribute::Genre => &mut self.genre,
            Attribute::Duration => &mut self.duration,
            Attribute::Year => &mut self.year,
            Attribute::FileSize => &mut self.file_size,
        };
        *slot = value;
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        std::path::Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_name)
    }
}

/// Ordered collection of records with unique file names
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, failing on the first malformed or duplicate record
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> CharlotteResult<Self> {
        let mut catalog = Self::new();
        for record in records {
            catalog.push(record)?;
        }
        Ok(catalog)
    }

    /// Append a record to the end of catalog order
    pub fn push(&mut self, record: CatalogRecord) -> CharlotteResult<()> {
        if record.file_name.trim().is_empty() {
            return Err(CharlotteError::MalformedEntry {
                row: self.records.len(),
                reason: "missing file name".to_string(),
            });
        }
        if self.index.contains_key(&record.file_name) {
            return Err(CharlotteError::DuplicateFileName(record.file_name));
        }

        self.index
            .insert(record.file_name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&CatalogRecord> {
        self.records.get(index)
    }

    /// Position of a file name in catalog order (exact match)
    pub fn position_of(&self, file_name: &str) -> Option<usize> {
        self.index.get(file_name).copied()
    }

    /// Distinct non-absent values of a column, in first-occurrence order
    pub fn distinct_values(&self, attribute: Attribute) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.get(attribute))
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Previous and next positions of `index`, wrapping at both ends
    pub fn neighbor_positions(&self, index: usize) -> Option<(usize, usize)> {
        let len = self.records.len();
        if index >= len {
            return None;
        }
        let previous = (index + len - 1) % len;
        let next = (index + 1) % len;
        Some((previous, next))
    }
}
