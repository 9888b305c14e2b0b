use posebeat_config::GameConfig;
use posebeat_model::{GestureClassifier, GestureSet, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::{
    FeedbackMessage, FeedbackQueue, JudgeEvent, JudgementEngine, ScoreState, Target, TargetId,
    TargetSpawner,
};

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub active: GestureSet,
    pub events: Vec<JudgeEvent>,
    pub spawned: Option<TargetId>,
}

/// Read-only view handed to the render layer after each tick.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub tick: u64,
    pub active: GestureSet,
    pub targets: &'a [Target],
    pub score: &'a ScoreState,
    pub feedback: &'a [FeedbackMessage],
}

/// Final numbers of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub ticks: u64,
    pub score: u64,
    pub max_combo: u32,
    pub hits: u32,
    pub perfects: u32,
    pub misses: u32,
    pub accuracy: f64,
}

/// One play session: classifier, spawner, judgement engine, score and
/// feedback, driven one tick at a time from a single thread.
pub struct GameSession<R: Rng = StdRng> {
    classifier: GestureClassifier,
    spawner: TargetSpawner<R>,
    engine: JudgementEngine,
    score: ScoreState,
    feedback: FeedbackQueue,
    tick: u64,
    active: GestureSet,
}

impl GameSession<StdRng> {
    /// Session with a reproducible target sequence.
    pub fn seeded(config: &GameConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: &GameConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameSession<R> {
    pub fn new(config: &GameConfig, rng: R) -> Self {
        info!(
            width = config.window.width,
            height = config.window.height,
            tick_rate = config.window.tick_rate,
            crossing_x = config.crossing_x(),
            perfect_x = config.zone.perfect_x,
            "session started"
        );
        Self {
            classifier: GestureClassifier::new(config.classifier),
            spawner: TargetSpawner::new(config, rng),
            engine: JudgementEngine::new(config.zone, config.scoring.clone()),
            score: ScoreState::new(),
            feedback: FeedbackQueue::new(config.feedback),
            tick: 0,
            active: GestureSet::empty(),
        }
    }

    /// Run one tick with the freshest landmarks (`None` when nothing was detected).
    pub fn tick(&mut self, landmarks: Option<&[Point]>) -> TickReport {
        let active = landmarks
            .map(|points| self.classifier.classify(points))
            .unwrap_or_default();
        self.tick_with_gestures(active)
    }

    /// Run one tick with an already-classified gesture set.
    pub fn tick_with_gestures(&mut self, active: GestureSet) -> TickReport {
        self.tick += 1;
        self.active = active;

        // Age last tick's messages first so new ones show for their full lifetime.
        self.feedback.tick();

        let events = self
            .engine
            .advance(active, &mut self.score, &mut self.feedback);

        let spawned = self.spawner.tick().map(|target| {
            let id = target.id;
            self.engine.push(target);
            id
        });

        TickReport {
            tick: self.tick,
            active,
            events,
            spawned,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            tick: self.tick,
            active: self.active,
            targets: self.engine.targets(),
            score: &self.score,
            feedback: self.feedback.messages(),
        }
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn targets(&self) -> &[Target] {
        self.engine.targets()
    }

    pub fn engine(&self) -> &JudgementEngine {
        &self.engine
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            ticks: self.tick,
            score: self.score.score(),
            max_combo: self.score.max_combo(),
            hits: self.score.hits(),
            perfects: self.score.perfects(),
            misses: self.score.misses(),
            accuracy: self.score.accuracy(),
        }
    }

    /// Finish the session. In-flight targets and feedback are dropped unjudged.
    pub fn end(mut self) -> SessionSummary {
        let summary = self.summary();
        let dropped = self.engine.targets().len();
        self.engine.clear();
        self.feedback.clear();
        info!(
            score = summary.score,
            max_combo = summary.max_combo,
            hits = summary.hits,
            misses = summary.misses,
            dropped,
            "session ended"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_spawn_and_order() {
        let mut session = GameSession::seeded(&GameConfig::default(), 5);
        for _ in 0..45 {
            assert!(session.tick(None).spawned.is_none());
        }
        let report = session.tick(None);
        assert_eq!(report.tick, 46);
        assert_eq!(report.spawned, Some(TargetId(0)));
        // Spawned after the advance step, so it has not moved yet.
        assert_eq!(session.targets()[0].x, 1280.0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = GameSession::seeded(&GameConfig::default(), 5);
        for _ in 0..46 {
            session.tick(None);
        }
        let snap = session.snapshot();
        assert_eq!(snap.tick, 46);
        assert_eq!(snap.targets.len(), 1);
        assert_eq!(snap.score.score(), 0);
        assert!(snap.feedback.is_empty());
    }

    #[test]
    fn test_end_reports_summary() {
        let mut session = GameSession::seeded(&GameConfig::default(), 5);
        for _ in 0..100 {
            session.tick(None);
        }
        let summary = session.end();
        assert_eq!(summary.ticks, 100);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.accuracy, 100.0);
    }
}
