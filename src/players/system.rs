use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

use crate::players::MediaPlayer;

/// Hands files to an external opener (`xdg-open`, `open`, `mpv`, ...)
pub struct SystemPlayer {
    command: String,
    args: Vec<String>,
}

impl SystemPlayer {
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self { command, args }
    }
}

#[async_trait]
impl MediaPlayer for SystemPlayer {
    fn name(&self) -> &str {
        &self.command
    }

    async fn play_file(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            anyhow::bail!("No such file: {}", path.display());
        }

        debug!("Launching {} {:?} {:?}", self.command, self.args, path);
        // Not awaited: the opener may stay alive for the whole track
        let _child = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch '{}'", self.command))?;

        info!("▶️ Playing {:?} with {}", path, self.command);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        tokio::process::Command::new("which")
            .arg(&self.command)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let player = SystemPlayer::new("true".to_string(), Vec::new());
        let result = player.play_file(Path::new("/definitely/not/here.mp3")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_command_is_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let file = dir.path().join("a.mp3");
        std::fs::write(&file, b"").unwrap();

        let player = SystemPlayer::new("charlotte-no-such-opener".to_string(), Vec::new());
        assert!(player.play_file(&file).await.is_err());
        assert!(!player.health_check().await);
    }
}
