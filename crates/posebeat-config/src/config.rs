use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{ClassifierConfig, ConfigError, ScoringConfig};

pub const WINDOW_WIDTH_MIN: u32 = 320;
pub const WINDOW_WIDTH_MAX: u32 = 7680;
pub const WINDOW_HEIGHT_MIN: u32 = 240;
pub const WINDOW_HEIGHT_MAX: u32 = 4320;
pub const TICK_RATE_MIN: u32 = 1;
pub const TICK_RATE_MAX: u32 = 240;
pub const SPAWN_INTERVAL_MIN: u32 = 1;
pub const SPAWN_INTERVAL_MAX: u32 = 10_000;
pub const TARGET_SPEED_MIN: f32 = 0.1;
pub const TARGET_SPEED_MAX: f32 = 200.0;
pub const TARGET_SIZE_MIN: f32 = 1.0;
pub const FEEDBACK_LIFETIME_MAX: u32 = 600;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Game ticks per second.
    pub tick_rate: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            tick_rate: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// A target spawns once the spawn timer exceeds this many ticks.
    pub interval_ticks: u32,
    /// Keep-out band at the top of the screen (score display).
    pub margin_top: f32,
    /// Keep-out band at the bottom of the screen (instructions).
    pub margin_bottom: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 45,
            margin_top: 150.0,
            margin_bottom: 150.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels travelled leftward per tick.
    pub speed: f32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 80.0,
            speed: 3.0,
        }
    }
}

/// Judgement-zone geometry. Targets move leftward; a target is judged on the
/// first tick its x falls below `activation_x`, and graded PERFECT when that
/// crossing position is still at or right of `perfect_x`.
///
/// Every target spawns at the right edge and moves at the same speed, so all of
/// them cross at the same x ([`GameConfig::crossing_x`]) and the grade of an
/// on-time hit is fixed by the config. With the defaults targets cross at 347,
/// inside the perfect band; move `perfect_x` right of the crossing point to
/// grade hits GOOD instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoneConfig {
    pub activation_x: f32,
    pub perfect_x: f32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            activation_x: 350.0,
            perfect_x: 345.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedbackConfig {
    pub lifetime_ticks: u32,
    /// Upward drift in pixels per tick.
    pub drift_per_tick: f32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            lifetime_ticks: 30,
            drift_per_tick: 2.0,
        }
    }
}

/// Complete game configuration. Built once at startup and shared read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub spawn: SpawnConfig,
    pub target: TargetConfig,
    pub zone: ZoneConfig,
    pub classifier: ClassifierConfig,
    pub scoring: ScoringConfig,
    pub feedback: FeedbackConfig,
}

impl GameConfig {
    /// Clamp numeric ranges and reject inconsistent geometry or scoring tiers.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.window.width = self.window.width.clamp(WINDOW_WIDTH_MIN, WINDOW_WIDTH_MAX);
        self.window.height = self.window.height.clamp(WINDOW_HEIGHT_MIN, WINDOW_HEIGHT_MAX);
        self.window.tick_rate = self.window.tick_rate.clamp(TICK_RATE_MIN, TICK_RATE_MAX);

        self.spawn.interval_ticks = self
            .spawn
            .interval_ticks
            .clamp(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX);
        let height = self.window.height as f32;
        self.spawn.margin_top = self.spawn.margin_top.clamp(0.0, height);
        self.spawn.margin_bottom = self.spawn.margin_bottom.clamp(0.0, height);

        self.target.speed = self.target.speed.clamp(TARGET_SPEED_MIN, TARGET_SPEED_MAX);
        self.target.width = self.target.width.max(TARGET_SIZE_MIN);
        self.target.height = self.target.height.max(TARGET_SIZE_MIN);

        let width = self.window.width as f32;
        if !(0.0..=width).contains(&self.zone.activation_x) {
            return Err(ConfigError::ActivationOffScreen {
                activation_x: self.zone.activation_x,
                width: self.window.width,
            });
        }
        if self.zone.perfect_x > self.zone.activation_x {
            return Err(ConfigError::PerfectOutsideActivation {
                activation_x: self.zone.activation_x,
                perfect_x: self.zone.perfect_x,
            });
        }

        self.classifier.validate();
        self.scoring.validate()?;

        self.feedback.lifetime_ticks = self.feedback.lifetime_ticks.min(FEEDBACK_LIFETIME_MAX);
        Ok(())
    }

    /// Nominal x at which every target is judged: the first position left of
    /// `activation_x` reached from the right edge in whole `target.speed` steps.
    pub fn crossing_x(&self) -> f32 {
        let start = self.window.width as f32;
        let distance = (start - self.zone.activation_x).max(0.0);
        let steps = (distance / self.target.speed).floor() + 1.0;
        start - steps * self.target.speed
    }

    /// Duration of one tick in microseconds.
    pub fn tick_us(&self) -> i64 {
        1_000_000 / i64::from(self.window.tick_rate.max(TICK_RATE_MIN))
    }

    /// Read and validate config from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: GameConfig = serde_json::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("validating config {}", path.display()))?;
        Ok(config)
    }

    /// Read config, or fall back to defaults when the file does not exist.
    pub fn read_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read(path)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
