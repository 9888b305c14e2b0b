use posebeat_config::ClassifierConfig;

use crate::landmark::{LEFT_SHOULDER, LEFT_WRIST, MIN_LANDMARKS, RIGHT_SHOULDER, RIGHT_WRIST};
use crate::{GestureLabel, GestureSet, Point};

/// The four points every gesture check reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorePoints {
    pub left_shoulder: Point,
    pub right_shoulder: Point,
    pub left_wrist: Point,
    pub right_wrist: Point,
}

impl CorePoints {
    /// Returns `None` for short landmark sets or when any core point is undetected.
    pub fn extract(landmarks: &[Point]) -> Option<Self> {
        if landmarks.len() < MIN_LANDMARKS {
            return None;
        }
        let core = Self {
            left_shoulder: landmarks[LEFT_SHOULDER],
            right_shoulder: landmarks[RIGHT_SHOULDER],
            left_wrist: landmarks[LEFT_WRIST],
            right_wrist: landmarks[RIGHT_WRIST],
        };
        let any_missing = [
            core.left_shoulder,
            core.right_shoulder,
            core.left_wrist,
            core.right_wrist,
        ]
        .iter()
        .any(Point::is_missing);
        (!any_missing).then_some(core)
    }
}

/// Maps one frame of landmarks to the set of gestures it satisfies.
///
/// Every check is independent, so a single pose may satisfy several labels
/// (a raised arm held wide reads as both ArmsUp and an extension). Callers
/// receive all of them.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, landmarks: &[Point]) -> GestureSet {
        match CorePoints::extract(landmarks) {
            Some(core) => self.classify_core(&core),
            None => GestureSet::empty(),
        }
    }

    pub fn classify_core(&self, core: &CorePoints) -> GestureSet {
        let CorePoints {
            left_shoulder: ls,
            right_shoulder: rs,
            left_wrist: lw,
            right_wrist: rw,
        } = *core;
        let v = self.config.vertical_margin;
        let h = self.config.horizontal_margin;
        let tol = self.config.vertical_tolerance;

        let mut active = GestureSet::empty();

        if lw.x > rw.x && lw.y > ls.y && rw.y > rs.y {
            active.insert(GestureLabel::ArmsCrossed);
        }
        if lw.y < ls.y - v && rw.y < rs.y - v {
            active.insert(GestureLabel::ArmsUp);
        }
        if lw.y > ls.y + v && rw.y > rs.y + v {
            active.insert(GestureLabel::ArmsDown);
        }
        if rw.x > rs.x + h && (rw.y - rs.y).abs() < tol {
            active.insert(GestureLabel::RightArmExtended);
        }
        if lw.x < ls.x - h && (lw.y - ls.y).abs() < tol {
            active.insert(GestureLabel::LeftArmExtended);
        }

        active
    }
}
