use std::path::Path;

use anyhow::Result;
use posebeat_config::GameConfig;
use posebeat_model::Point;
use posebeat_rule::{GameSession, SessionSummary, TickReport};
use tracing::{info, warn};

/// Load the game config, falling back to defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let found = path.exists();
    let config = GameConfig::read_or_default(path)?;
    if found {
        info!(path = %path.display(), "Loaded game config");
    } else {
        warn!(path = %path.display(), "Config not found, using defaults");
    }
    Ok(config)
}

/// Top-level screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStateType {
    Menu,
    Playing,
}

/// Transition requested by [`App::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateTransition {
    /// Stay in the current state.
    None,
    /// The session reached its length; the caller should end it.
    Finished,
}

/// Owns the config and at most one running session.
pub struct App {
    config: GameConfig,
    seed: Option<u64>,
    session_ticks: Option<u64>,
    session: Option<GameSession>,
    sessions_started: u64,
}

impl App {
    /// `seed` makes every session reproducible (session `n` uses `seed + n`).
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            seed,
            session_ticks: None,
            session: None,
            sessions_started: 0,
        }
    }

    /// Limit each session to `ticks` ticks.
    pub fn with_session_ticks(mut self, ticks: u64) -> Self {
        self.session_ticks = Some(ticks);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> AppStateType {
        if self.session.is_some() {
            AppStateType::Playing
        } else {
            AppStateType::Menu
        }
    }

    /// Start a fresh session, ending the running one first.
    pub fn start_game(&mut self) -> &mut GameSession {
        if let Some(previous) = self.end_game() {
            info!(score = previous.score, "restarting session");
        }
        let session = match self.seed {
            Some(seed) => GameSession::seeded(&self.config, seed.wrapping_add(self.sessions_started)),
            None => GameSession::from_entropy(&self.config),
        };
        self.sessions_started += 1;
        self.session.insert(session)
    }

    /// Return to the menu. `None` when no session was running.
    pub fn end_game(&mut self) -> Option<SessionSummary> {
        self.session.take().map(GameSession::end)
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Run one tick of the running session. Does nothing in the menu.
    pub fn update(&mut self, landmarks: Option<&[Point]>) -> (Option<TickReport>, StateTransition) {
        let Some(session) = self.session.as_mut() else {
            return (None, StateTransition::None);
        };
        let report = session.tick(landmarks);
        let transition = match self.session_ticks {
            Some(limit) if session.ticks() >= limit => StateTransition::Finished,
            _ => StateTransition::None,
        };
        (Some(report), transition)
    }
}
