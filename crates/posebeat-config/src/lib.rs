// Game configuration (window, spawning, targets, judgement zone, classifier, scoring, feedback)

pub mod classifier_config;
pub mod config;
mod error;
pub mod scoring_config;

pub use classifier_config::ClassifierConfig;
pub use config::{FeedbackConfig, GameConfig, SpawnConfig, TargetConfig, WindowConfig, ZoneConfig};
pub use error::ConfigError;
pub use scoring_config::{MultiplierTier, ScoringConfig};
