use posebeat_config::{ScoringConfig, ZoneConfig};
use posebeat_model::{GestureLabel, GestureSet};
use tracing::debug;

use crate::{FeedbackQueue, Judgement, ScoreState, Target, TargetId};

/// Why a target was judged on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeCause {
    /// Crossed the activation boundary.
    Crossed,
    /// Left the screen without ever being evaluated.
    OffScreen,
}

/// One judgement produced by [`JudgementEngine::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeEvent {
    pub target: TargetId,
    pub gesture: GestureLabel,
    pub judgement: Judgement,
    pub cause: JudgeCause,
    /// Target x at the evaluation tick.
    pub x: f32,
    pub points: u64,
}

/// Moves live targets and judges each one exactly once.
///
/// Hits are retired on the tick they are judged. Misses keep scrolling so the
/// overlay can show them leave, and are retired once fully off-screen.
#[derive(Debug, Clone)]
pub struct JudgementEngine {
    zone: ZoneConfig,
    scoring: ScoringConfig,
    targets: Vec<Target>,
}

impl JudgementEngine {
    pub fn new(zone: ZoneConfig, scoring: ScoringConfig) -> Self {
        Self {
            zone,
            scoring,
            targets: Vec::new(),
        }
    }

    pub fn push(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn zone(&self) -> &ZoneConfig {
        &self.zone
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Drop every live target without judging it.
    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Advance all targets by one tick against the currently active gestures.
    pub fn advance(
        &mut self,
        active: GestureSet,
        score: &mut ScoreState,
        feedback: &mut FeedbackQueue,
    ) -> Vec<JudgeEvent> {
        let mut events = Vec::new();
        let mut retired = Vec::with_capacity(self.targets.len());

        for target in &mut self.targets {
            target.step();

            let mut outcome = None;
            if target.has_crossed(&self.zone) {
                outcome = target
                    .evaluate(active, &self.zone)
                    .map(|j| (j, JudgeCause::Crossed));
            }
            if outcome.is_none() && target.is_off_screen() {
                outcome = target.expire().map(|j| (j, JudgeCause::OffScreen));
            }

            if let Some((judgement, cause)) = outcome {
                let points = score.apply(judgement, &self.scoring);
                feedback.push_judgement(judgement, points, target.x, target.y);
                debug!(
                    id = %target.id,
                    gesture = ?target.gesture,
                    ?judgement,
                    ?cause,
                    x = target.x,
                    points,
                    combo = score.combo(),
                    "target judged"
                );
                events.push(JudgeEvent {
                    target: target.id,
                    gesture: target.gesture,
                    judgement,
                    cause,
                    x: target.x,
                    points,
                });
            }

            let hit = target.judgement().is_some_and(Judgement::is_hit);
            retired.push(hit || (target.is_evaluated() && target.is_off_screen()));
        }

        // By position: ids are not trusted to be unique.
        let mut flags = retired.into_iter();
        self.targets.retain(|_| !flags.next().unwrap_or(false));
        events
    }
}
