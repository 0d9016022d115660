//! Charlotte - personal voice assistant, music core
//!
//! Command line front end: scan the music folder, play by description,
//! step through the catalog, or talk to the interactive shell.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use charlotte::catalog::{Attribute, Catalog, CatalogStore};
use charlotte::commands::{self, ShellCommand, HELP_TEXT};
use charlotte::config::Config;
use charlotte::players::{get_player, MediaPlayer};
use charlotte::processor::{ProcessResult, Processor};
use charlotte::session::MusicSession;
use charlotte::slots::MusicSlots;
use charlotte::utils::fuzzy::{find_file, MatchResult};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the music catalog from the music directory
    Scan {
        /// Music directory (overrides config)
        #[arg(long)]
        music_dir: Option<PathBuf>,
    },

    /// Play a track matching the given description
    Play {
        #[command(flatten)]
        query: PlayArgs,

        /// Seed for the random pick among several matches
        #[arg(long)]
        seed: Option<u64>,

        /// Log the selection instead of launching a player
        #[arg(long)]
        dry_run: bool,
    },

    /// Play the track after the last one played
    Next {
        #[arg(long)]
        dry_run: bool,
    },

    /// Play the track before the last one played
    Previous {
        #[arg(long)]
        dry_run: bool,
    },

    /// Find a file in a directory by approximate name
    Find {
        query: String,

        /// Directory to search (defaults to the music directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Minimum score a match must exceed
        #[arg(long)]
        min_score: Option<u8>,
    },

    /// Say hello
    Greet,

    /// Interactive shell
    Shell {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct PlayArgs {
    #[arg(long)]
    file: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    album_artist: Option<String>,
    #[arg(long)]
    composer: Option<String>,
    #[arg(long)]
    album: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    duration: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    file_size: Option<String>,
}

impl PlayArgs {
    fn to_slots(&self) -> MusicSlots {
        let mut slots = MusicSlots::default();
        let values = [
            (Attribute::FileName, &self.file),
            (Attribute::Title, &self.title),
            (Attribute::Artist, &self.artist),
            (Attribute::AlbumArtist, &self.album_artist),
            (Attribute::Composer, &self.composer),
            (Attribute::Album, &self.album),
            (Attribute::Genre, &self.genre),
            (Attribute::Duration, &self.duration),
            (Attribute::Year, &self.year),
            (Attribute::FileSize, &self.file_size),
        ];
        for (attribute, value) in values {
            slots.set(attribute, value.as_deref());
        }
        slots
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Setup logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎀 Charlotte v{} starting...", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Scan { music_dir } => {
            let music_dir = music_dir.unwrap_or_else(|| config.music_dir());
            let store = Arc::new(CatalogStore::with_catalog(
                config.catalog_path(),
                Catalog::new(),
            ));
            let count = rebuild(&store, music_dir).await?;
            println!("Catalog rebuilt: {} tracks in {}", count, store.path().display());
        }
        Command::Play {
            query,
            seed,
            dry_run,
        } => {
            let mut processor = build_processor(&config, seed, dry_run)?;
            let result = processor.play(&query.to_slots()).await;
            finish(&config, &processor, &result)?;
        }
        Command::Next { dry_run } => {
            let mut processor = build_processor(&config, None, dry_run)?;
            let result = processor.play_next().await;
            finish(&config, &processor, &result)?;
        }
        Command::Previous { dry_run } => {
            let mut processor = build_processor(&config, None, dry_run)?;
            let result = processor.play_previous().await;
            finish(&config, &processor, &result)?;
        }
        Command::Find {
            query,
            dir,
            min_score,
        } => {
            let dir = dir.unwrap_or_else(|| config.music_dir());
            let min_score = min_score.unwrap_or(config.file_min_score);
            match find_file(&query, &dir, min_score)? {
                MatchResult::Found { value, score } => println!("{} ({})", value, score),
                _ => println!("Sorry, I could not find \"{}\" in the directory.", query),
            }
        }
        Command::Greet => {
            let mut processor = build_processor(&config, None, true)?;
            println!("{}", processor.greet());
        }
        Command::Shell { seed, dry_run } => {
            let processor = build_processor(&config, seed, dry_run)?;
            run_shell(&config, processor).await?;
        }
    }

    Ok(())
}

fn build_processor(config: &Config, seed: Option<u64>, dry_run: bool) -> Result<Processor> {
    use rand::SeedableRng;

    let store = Arc::new(CatalogStore::open(config.catalog_path())?);
    let player: Arc<dyn MediaPlayer> = Arc::from(get_player(config, dry_run));
    let session = MusicSession::load(&config.session_path());

    let mut processor = Processor::new(store, player, config).with_session(session);
    if let Some(seed) = seed {
        processor = processor.with_rng(rand::rngs::StdRng::seed_from_u64(seed));
    }
    Ok(processor)
}

/// Print the reply and persist the session after a successful play
fn finish(config: &Config, processor: &Processor, result: &ProcessResult) -> Result<()> {
    println!("{}", result.reply());
    if matches!(result, ProcessResult::Playing { .. }) {
        processor.session().save(&config.session_path())?;
    }
    Ok(())
}

async fn rebuild(store: &Arc<CatalogStore>, music_dir: PathBuf) -> Result<usize> {
    let store = store.clone();
    let count = tokio::task::spawn_blocking(move || store.rebuild(&music_dir)).await??;
    Ok(count)
}

async fn run_shell(config: &Config, mut processor: Processor) -> Result<()> {
    let store = processor.store();

    println!("{}", processor.greet());
    println!("{}", HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = commands::strip_wake_phrase(&line, &processor.profile().wake_phrase);
        let result = match commands::parse(line) {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => {
                println!("Goodbye, {}.", processor.profile().salutation);
                break;
            }
            ShellCommand::Help => {
                println!("{}", HELP_TEXT);
                continue;
            }
            ShellCommand::Greet => {
                println!("{}", processor.greet());
                continue;
            }
            ShellCommand::Find(query) => {
                match find_file(&query, &config.music_dir(), config.file_min_score) {
                    Ok(MatchResult::Found { value, .. }) => println!("{}", value),
                    Ok(_) => println!("Sorry, I could not find \"{}\" in the directory.", query),
                    Err(e) => println!("Sorry, I could not read the music folder: {}", e),
                }
                continue;
            }
            ShellCommand::Scan => {
                match rebuild(&store, config.music_dir()).await {
                    Ok(count) => println!("Catalog rebuilt: {} tracks.", count),
                    Err(e) => println!("Sorry, the scan failed: {}", e),
                }
                continue;
            }
            ShellCommand::Unknown(text) => {
                println!("Sorry, I don't know how to \"{}\". {}", text, HELP_TEXT);
                continue;
            }
            ShellCommand::Play(slots) => processor.play(&slots).await,
            ShellCommand::Next => processor.play_next().await,
            ShellCommand::Previous => processor.play_previous().await,
        };

        finish(config, &processor, &result)?;
    }

    Ok(())
}
