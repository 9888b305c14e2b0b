use thiserror::Error;

/// Configuration values that cannot be repaired by clamping.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("perfect boundary ({perfect_x}) must not lie right of the activation boundary ({activation_x})")]
    PerfectOutsideActivation { activation_x: f32, perfect_x: f32 },

    #[error("activation boundary ({activation_x}) must lie within the window width ({width})")]
    ActivationOffScreen { activation_x: f32, width: u32 },

    #[error("multiplier tier {index} requires min_combo >= 1")]
    TierBelowOne { index: usize },

    #[error("multiplier tiers must have strictly increasing min_combo (tier {index})")]
    TiersNotAscending { index: usize },

    #[error("multiplier tiers must not decrease (tier {index})")]
    TierMultiplierDecreasing { index: usize },

    #[error("perfect_points ({perfect}) must be at least good_points ({good})")]
    PerfectBelowGood { good: u32, perfect: u32 },
}
