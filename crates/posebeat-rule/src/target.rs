use std::fmt;

use posebeat_config::{TargetConfig, ZoneConfig};
use posebeat_model::{GestureLabel, GestureSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of evaluating a target at the activation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgement {
    /// Matched while crossing inside the perfect band.
    Perfect,
    /// Matched, but past the perfect boundary.
    Good,
    Miss,
}

impl Judgement {
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Perfect | Self::Good)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Perfect => "PERFECT!",
            Self::Good => "GOOD!",
            Self::Miss => "MISS!",
        }
    }
}

/// A gesture prompt scrolling leftward toward the judgement zone.
///
/// `x`/`y` are the box center. The judgement is private: it can only be set
/// through [`Target::evaluate`] or [`Target::expire`], and both refuse to act
/// on an already-judged target.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub gesture: GestureLabel,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    judgement: Option<Judgement>,
}

impl Target {
    pub fn new(id: TargetId, gesture: GestureLabel, x: f32, y: f32, config: &TargetConfig) -> Self {
        Self {
            id,
            gesture,
            x,
            y,
            width: config.width,
            height: config.height,
            speed: config.speed,
            judgement: None,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.judgement.is_some()
    }

    pub fn judgement(&self) -> Option<Judgement> {
        self.judgement
    }

    pub fn step(&mut self) {
        self.x -= self.speed;
    }

    pub fn has_crossed(&self, zone: &ZoneConfig) -> bool {
        self.x < zone.activation_x
    }

    /// The whole box has left the screen on the left.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width / 2.0 < 0.0
    }

    /// Overlay highlight: the target is inside the activation zone and still visible.
    pub fn in_activation_zone(&self, zone: &ZoneConfig) -> bool {
        self.x <= zone.activation_x && !self.is_off_screen()
    }

    /// Top-left corner and size of the target box.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        (
            self.x - self.width / 2.0,
            self.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Judge the target against the currently active gestures.
    ///
    /// Returns `None` when the target was judged before.
    pub fn evaluate(&mut self, active: GestureSet, zone: &ZoneConfig) -> Option<Judgement> {
        if self.judgement.is_some() {
            return None;
        }
        let judgement = if !active.contains(self.gesture) {
            Judgement::Miss
        } else if self.x >= zone.perfect_x {
            Judgement::Perfect
        } else {
            Judgement::Good
        };
        self.judgement = Some(judgement);
        Some(judgement)
    }

    /// Judge an unevaluated target as missed.
    pub fn expire(&mut self) -> Option<Judgement> {
        if self.judgement.is_some() {
            return None;
        }
        self.judgement = Some(Judgement::Miss);
        self.judgement
    }
}
