use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Combo threshold at which a score multiplier takes effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MultiplierTier {
    pub min_combo: u32,
    pub multiplier: u32,
}

impl MultiplierTier {
    pub const fn new(min_combo: u32, multiplier: u32) -> Self {
        Self {
            min_combo,
            multiplier,
        }
    }
}

/// Points per hit and the combo → multiplier step function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub good_points: u32,
    pub perfect_points: u32,
    /// Ascending by `min_combo`. Below the first tier the multiplier is 1.
    pub tiers: Vec<MultiplierTier>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            good_points: 100,
            perfect_points: 150,
            tiers: vec![MultiplierTier::new(10, 2), MultiplierTier::new(20, 4)],
        }
    }
}

impl ScoringConfig {
    /// Multiplier for the given combo: the highest tier reached, or 1.
    pub fn multiplier_for(&self, combo: u32) -> u32 {
        self.tiers
            .iter()
            .rev()
            .find(|tier| combo >= tier.min_combo)
            .map_or(1, |tier| tier.multiplier)
    }

    pub fn top_multiplier(&self) -> u32 {
        self.tiers.last().map_or(1, |tier| tier.multiplier)
    }

    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.perfect_points < self.good_points {
            return Err(ConfigError::PerfectBelowGood {
                good: self.good_points,
                perfect: self.perfect_points,
            });
        }

        let mut previous: Option<MultiplierTier> = None;
        for (index, tier) in self.tiers.iter_mut().enumerate() {
            if tier.min_combo == 0 {
                return Err(ConfigError::TierBelowOne { index });
            }
            tier.multiplier = tier.multiplier.max(1);
            if let Some(prev) = previous {
                if tier.min_combo <= prev.min_combo {
                    return Err(ConfigError::TiersNotAscending { index });
                }
                if tier.multiplier < prev.multiplier {
                    return Err(ConfigError::TierMultiplierDecreasing { index });
                }
            }
            previous = Some(*tier);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let config = ScoringConfig::default();
        assert_eq!(config.multiplier_for(0), 1);
        assert_eq!(config.multiplier_for(9), 1);
        assert_eq!(config.multiplier_for(10), 2);
        assert_eq!(config.multiplier_for(19), 2);
        assert_eq!(config.multiplier_for(20), 4);
        assert_eq!(config.multiplier_for(500), 4);
        assert_eq!(config.top_multiplier(), 4);
    }

    #[test]
    fn test_no_tiers_means_flat_scoring() {
        let config = ScoringConfig {
            tiers: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.multiplier_for(1000), 1);
        assert_eq!(config.top_multiplier(), 1);
    }

    #[test]
    fn test_validate_rejects_unsorted_tiers() {
        let mut config = ScoringConfig {
            tiers: vec![MultiplierTier::new(20, 4), MultiplierTier::new(10, 2)],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TiersNotAscending { index: 1 }));
    }

    #[test]
    fn test_validate_rejects_decreasing_multiplier() {
        let mut config = ScoringConfig {
            tiers: vec![MultiplierTier::new(5, 3), MultiplierTier::new(10, 2)],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TierMultiplierDecreasing { index: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_zero_combo_tier() {
        let mut config = ScoringConfig {
            tiers: vec![MultiplierTier::new(0, 2)],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TierBelowOne { index: 0 }));
    }

    #[test]
    fn test_validate_lifts_zero_multiplier() {
        let mut config = ScoringConfig {
            tiers: vec![MultiplierTier::new(3, 0)],
            ..Default::default()
        };
        config.validate().unwrap();
        assert_eq!(config.tiers[0].multiplier, 1);
    }

    #[test]
    fn test_validate_rejects_cheap_perfect() {
        let mut config = ScoringConfig {
            good_points: 200,
            perfect_points: 100,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PerfectBelowGood { .. })
        ));
    }
}
