use posebeat_config::ScoringConfig;
use serde::Serialize;

use crate::Judgement;

/// Combo, multiplier and score bookkeeping for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    score: u64,
    combo: u32,
    max_combo: u32,
    multiplier: u32,
    hits: u32,
    perfects: u32,
    misses: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            multiplier: 1,
            hits: 0,
            perfects: 0,
            misses: 0,
        }
    }
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a judgement and return the points it awarded.
    pub fn apply(&mut self, judgement: Judgement, scoring: &ScoringConfig) -> u64 {
        match judgement {
            Judgement::Perfect | Judgement::Good => self.record_hit(judgement, scoring),
            Judgement::Miss => {
                self.record_miss();
                0
            }
        }
    }

    /// Count a hit graded `judgement` and return the points it awarded.
    pub fn record_hit(&mut self, judgement: Judgement, scoring: &ScoringConfig) -> u64 {
        debug_assert!(judgement.is_hit(), "record_hit called with {judgement:?}");
        let before = self.score;

        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.multiplier = scoring.multiplier_for(self.combo);
        self.hits += 1;

        let base = if judgement == Judgement::Perfect {
            self.perfects += 1;
            scoring.perfect_points
        } else {
            scoring.good_points
        };
        let points = u64::from(base) * u64::from(self.multiplier);
        self.score = self.score.saturating_add(points);

        debug_assert!(self.score >= before, "score decreased");
        points
    }

    pub fn record_miss(&mut self) {
        self.combo = 0;
        self.multiplier = 1;
        self.misses += 1;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn perfects(&self) -> u32 {
        self.perfects
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn judged(&self) -> u32 {
        self.hits + self.misses
    }

    /// Hit percentage over all judged targets (100 before any judgement).
    pub fn accuracy(&self) -> f64 {
        let judged = self.judged();
        if judged == 0 {
            return 100.0;
        }
        f64::from(self.hits) / f64::from(judged) * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
