//! Slot normalization
//!
//! Slot values arrive from the dialogue layer as loose strings. `None`,
//! `"None"`, `"null"` and blank strings all mean "no value" and are turned
//! into `None` here, before anything reaches the selector.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Attribute;
use crate::selection::{AttributeFilterSet, SelectionRequest};

/// Sentinel strings that mean "absent"
const ABSENT_SENTINELS: &[&str] = &["none", "null", "nil", "undefined"];

/// Normalize one raw slot value
pub fn normalize_slot(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() || ABSENT_SENTINELS.contains(&value.to_lowercase().as_str()) {
        return None;
    }
    Some(value.to_string())
}

/// The music slots of one request, already normalized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicSlots {
    pub music_file: Option<String>,
    pub track_name: Option<String>,
    pub track_artist: Option<String>,
    pub track_albumartist: Option<String>,
    pub track_composer: Option<String>,
    pub track_album: Option<String>,
    pub track_genre: Option<String>,
    pub track_duration: Option<String>,
    pub track_year: Option<String>,
    pub track_filesize: Option<String>,
}

impl MusicSlots {
    /// Build from a raw slot map. Unknown slot names are ignored.
    pub fn from_map<K, V>(raw: &HashMap<K, V>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut slots = Self::default();
        for (name, value) in raw {
            match name.as_ref().parse::<Attribute>() {
                Ok(attribute) => slots.set(attribute, Some(value.as_ref())),
                Err(()) => debug!("Ignoring unknown slot '{}'", name.as_ref()),
            }
        }
        slots
    }

    /// Set a slot from a raw value
    pub fn set(&mut self, attribute: Attribute, raw: Option<&str>) {
        let value = normalize_slot(raw);
        let slot = match attribute {
            Attribute::FileName => &mut self.music_file,
            Attribute::Title => &mut self.track_name,
            Attribute::Artist => &mut self.track_artist,
            Attribute::AlbumArtist => &mut self.track_albumartist,
            Attribute::Composer => &mut self.track_composer,
            Attribute::Album => &mut self.track_album,
            Attribute::Genre => &mut self.track_genre,
            Attribute::Duration => &mut self.track_duration,
            Attribute::Year => &mut self.track_year,
            Attribute::FileSize => &mut self.track_filesize,
        };
        *slot = value;
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::FileName => self.music_file.as_deref(),
            Attribute::Title => self.track_name.as_deref(),
            Attribute::Artist => self.track_artist.as_deref(),
            Attribute::AlbumArtist => self.track_albumartist.as_deref(),
            Attribute::Composer => self.track_composer.as_deref(),
            Attribute::Album => self.track_album.as_deref(),
            Attribute::Genre => self.track_genre.as_deref(),
            Attribute::Duration => self.track_duration.as_deref(),
            Attribute::Year => self.track_year.as_deref(),
            Attribute::FileSize => self.track_filesize.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Attribute::ALL.iter().all(|a| self.get(*a).is_none())
    }

    /// Selection request for these slots
    ///
    /// `music_file` and `track_name` are direct references; the remaining
    /// slots become attribute filters.
    pub fn to_request(&self) -> SelectionRequest {
        let mut filters = AttributeFilterSet::new();
        for attribute in Attribute::ALL {
            if matches!(attribute, Attribute::FileName | Attribute::Title) {
                continue;
            }
            filters.set(attribute, self.get(attribute));
        }

        SelectionRequest::new()
            .with_file_name(self.music_file.as_deref())
            .with_title(self.track_name.as_deref())
            .with_filters(filters)
    }
}
