use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

pub mod silent;
pub mod system;

#[async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Human readable player name
    fn name(&self) -> &str;

    /// Start playing a file
    async fn play_file(&self, path: &Path) -> Result<()>;

    /// Check if the player is available
    async fn health_check(&self) -> bool;
}

/// Get the media player based on configuration
///
/// `dry_run` selects a player that only logs what it would play.
pub fn get_player(config: &crate::config::Config, dry_run: bool) -> Box<dyn MediaPlayer> {
    if dry_run {
        Box::new(silent::SilentPlayer::new())
    } else {
        Box::new(system::SystemPlayer::new(
            config.player_command.clone(),
            config.player_args.clone(),
        ))
    }
}
