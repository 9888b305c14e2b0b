use serde::{Deserialize, Serialize};

pub const MARGIN_MIN: f32 = 0.0;
pub const MARGIN_MAX: f32 = 1000.0;
pub const TOLERANCE_MIN: f32 = 1.0;
pub const TOLERANCE_MAX: f32 = 2000.0;

/// Pixel thresholds used by the gesture classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// How far a wrist must sit above (or below) its shoulder for ArmsUp / ArmsDown.
    pub vertical_margin: f32,
    /// How far a wrist must reach sideways past its shoulder for an arm extension.
    pub horizontal_margin: f32,
    /// Largest wrist/shoulder height difference still counted as "horizontal".
    pub vertical_tolerance: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            vertical_margin: 60.0,
            horizontal_margin: 30.0,
            vertical_tolerance: 200.0,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&mut self) {
        self.vertical_margin = self.vertical_margin.clamp(MARGIN_MIN, MARGIN_MAX);
        self.horizontal_margin = self.horizontal_margin.clamp(MARGIN_MIN, MARGIN_MAX);
        self.vertical_tolerance = self.vertical_tolerance.clamp(TOLERANCE_MIN, TOLERANCE_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ClassifierConfig::default();
        assert_eq!(config.vertical_margin, 60.0);
        assert_eq!(config.horizontal_margin, 30.0);
        assert_eq!(config.vertical_tolerance, 200.0);
    }

    #[test]
    fn test_validate_clamps() {
        let mut config = ClassifierConfig {
            vertical_margin: -5.0,
            horizontal_margin: 5000.0,
            vertical_tolerance: 0.0,
        };
        config.validate();
        assert_eq!(config.vertical_margin, MARGIN_MIN);
        assert_eq!(config.horizontal_margin, MARGIN_MAX);
        assert_eq!(config.vertical_tolerance, TOLERANCE_MIN);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClassifierConfig = serde_json::from_str(r#"{"vertical_margin": 40.0}"#).unwrap();
        assert_eq!(config.vertical_margin, 40.0);
        assert_eq!(config.horizontal_margin, 30.0);
    }
}
