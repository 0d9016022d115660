//! Music Request Processor
//!
//! The seam between the dialogue layer and the music core. Takes slot
//! values, runs a selection against the current catalog snapshot, starts
//! playback and answers with a sentence plus the updated session.

use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::catalog::{scan, CatalogRecord, CatalogStore};
use crate::config::Config;
use crate::players::MediaPlayer;
use crate::profile::UserProfile;
use crate::responses;
use crate::selection::{CatalogSelector, SelectionRequest, SelectionResult};
use crate::session::MusicSession;
use crate::slots::MusicSlots;

/// Result of processing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// A track was selected and handed to the player
    Playing { record: CatalogRecord, reply: String },
    /// Nothing matched; the reply is an apology
    NoMatch(String),
    /// A track was selected but the player refused it
    Failed(String),
}

impl ProcessResult {
    /// Text to speak back to the user
    pub fn reply(&self) -> &str {
        match self {
            ProcessResult::Playing { reply, .. } => reply,
            ProcessResult::NoMatch(reply) | ProcessResult::Failed(reply) => reply,
        }
    }
}

/// Direction for neighbor playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

pub struct Processor {
    store: Arc<CatalogStore>,
    selector: CatalogSelector,
    player: Arc<dyn MediaPlayer>,
    profile: UserProfile,
    music_dir: PathBuf,
    session: MusicSession,
    rng: StdRng,
}

impl Processor {
    pub fn new(store: Arc<CatalogStore>, player: Arc<dyn MediaPlayer>, config: &Config) -> Self {
        Self {
            store,
            selector: CatalogSelector::new(config.file_min_score, config.text_min_score),
            player,
            profile: config.profile.clone(),
            music_dir: config.music_dir(),
            session: MusicSession::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed random source (deterministic picks)
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Resume from a saved session
    pub fn with_session(mut self, session: MusicSession) -> Self {
        self.session = session;
        self
    }

    /// Shared catalog store; rebuilding it is seen by the next request
    pub fn store(&self) -> Arc<CatalogStore> {
        self.store.clone()
    }

    pub fn session(&self) -> &MusicSession {
        &self.session
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Time-of-day greeting
    pub fn greet(&mut self) -> String {
        self.profile.greet_now(&mut self.rng)
    }

    /// Play whatever the slots describe
    pub async fn play(&mut self, slots: &MusicSlots) -> ProcessResult {
        debug!("Play request: {:?}", slots);
        self.start(slots.to_request()).await
    }

    /// Play the session's next or previous track
    pub async fn step(&mut self, step: Step) -> ProcessResult {
        let target = match step {
            Step::Next => self.session.next.clone(),
            Step::Previous => self.session.previous.clone(),
        };

        match target {
            Some(file_name) => {
                debug!("{:?} -> '{}'", step, file_name);
                self.start(SelectionRequest::new().with_file_name(Some(&file_name)))
                    .await
            }
            None => ProcessResult::NoMatch(responses::nothing_to_play(&self.profile)),
        }
    }

    pub async fn play_next(&mut self) -> ProcessResult {
        self.step(Step::Next).await
    }

    pub async fn play_previous(&mut self) -> ProcessResult {
        self.step(Step::Previous).await
    }

    async fn start(&mut self, request: SelectionRequest) -> ProcessResult {
        let catalog = match self.store.snapshot() {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("❌ Catalog unavailable: {}", e);
                return ProcessResult::Failed(responses::no_match(&self.profile, &mut self.rng));
            }
        };

        if catalog.is_empty() {
            return ProcessResult::NoMatch(responses::empty_catalog(&self.profile));
        }

        let selection = match self.selector.select(&catalog, &request, &mut self.rng) {
            SelectionResult::Selected(selection) => selection,
            SelectionResult::NoMatch => {
                info!("🤷 No track matched {:?}", request);
                return ProcessResult::NoMatch(responses::no_match(&self.profile, &mut self.rng));
            }
        };

        let path = scan::locate(&self.music_dir, &selection.record.file_name)
            .unwrap_or_else(|| self.music_dir.join(&selection.record.file_name));

        if let Err(e) = self.player.play_file(&path).await {
            warn!("❌ {} could not play {:?}: {}", self.player.name(), path, e);
            return ProcessResult::Failed(format!(
                "Sorry {}. I could not play {}.",
                self.profile.salutation,
                selection.record.stem()
            ));
        }

        self.session.update(&selection);
        let reply = responses::playing(&selection.record, &self.profile, &mut self.rng);
        ProcessResult::Playing {
            record: selection.record,
            reply,
        }
    }
}
