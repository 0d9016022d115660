//! Playback session
//!
//! What the dialogue layer keeps between requests: the file now playing and
//! its neighbors, so "next" and "previous" can be answered later.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CharlotteResult;
use crate::selection::Selection;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicSession {
    pub current: Option<String>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl MusicSession {
    /// Record a fresh selection
    pub fn update(&mut self, selection: &Selection) {
        self.current = Some(selection.record.file_name.clone());
        self.previous = Some(selection.previous.file_name.clone());
        self.next = Some(selection.next.file_name.clone());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Load a saved session; a missing or unreadable file starts fresh
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str(&content).map_err(anyhow::Error::from))
        {
            Ok(session) => session,
            Err(e) => {
                warn!("⚠️ Session file unreadable, starting fresh: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> CharlotteResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRecord;

    #[test]
    fn test_update_and_persist() {
        let selection = Selection {
            record: CatalogRecord::new("b.mp3"),
            index: 1,
            previous: CatalogRecord::new("a.mp3"),
            next: CatalogRecord::new("c.mp3"),
        };
        let mut session = MusicSession::default();
        session.update(&selection);

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("state/session.json");
        session.save(&path).unwrap();

        let restored = MusicSession::load(&path);
        assert_eq!(restored.current.as_deref(), Some("b.mp3"));
        assert_eq!(restored.previous.as_deref(), Some("a.mp3"));
        assert_eq!(restored.next.as_deref(), Some("c.mp3"));
    }

    #[test]
    fn test_corrupt_session_starts_fresh() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(MusicSession::load(&path), MusicSession::default());
    }
}
