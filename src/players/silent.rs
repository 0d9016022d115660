use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use crate::players::MediaPlayer;

/// Player that only records what it was asked to play
///
/// Used for `--dry-run` and in tests.
#[derive(Default)]
pub struct SilentPlayer {
    played: Mutex<Vec<PathBuf>>,
}

impl SilentPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files passed to `play_file`, oldest first
    pub fn played(&self) -> Vec<PathBuf> {
        self.played
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MediaPlayer for SilentPlayer {
    fn name(&self) -> &str {
        "silent"
    }

    async fn play_file(&self, path: &Path) -> Result<()> {
        info!("🔇 Would play {:?}", path);
        self.played
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {}", e))?
            .push(path.to_path_buf());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
