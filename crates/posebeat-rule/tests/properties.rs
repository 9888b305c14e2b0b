use std::collections::HashSet;

use posebeat_config::{GameConfig, ScoringConfig};
use posebeat_model::{GestureLabel, GestureSet};
use posebeat_rule::{GameSession, Judgement, ScoreState};
use proptest::prelude::*;

fn gesture_set(bits: u8) -> GestureSet {
    GestureLabel::ALL
        .iter()
        .filter(|label| bits & (1 << label.index()) != 0)
        .copied()
        .collect()
}

/// Fast, dense configuration so short runs judge many targets.
fn busy_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.spawn.interval_ticks = 3;
    config.target.speed = 40.0;
    config
}

fn judgement_strategy() -> impl Strategy<Value = Judgement> {
    prop_oneof![
        Just(Judgement::Perfect),
        Just(Judgement::Good),
        Just(Judgement::Miss),
    ]
}

proptest! {
    #[test]
    fn score_rules_hold_for_any_judgement_sequence(
        judgements in prop::collection::vec(judgement_strategy(), 0..200)
    ) {
        let scoring = ScoringConfig::default();
        let mut state = ScoreState::new();
        for judgement in judgements {
            let before = state.clone();
            let points = state.apply(judgement, &scoring);

            prop_assert!(state.score() >= before.score());
            prop_assert_eq!(state.score(), before.score() + points);
            prop_assert_eq!(state.multiplier(), scoring.multiplier_for(state.combo()));
            prop_assert!(state.max_combo() >= state.combo());
            if judgement.is_hit() {
                prop_assert_eq!(state.combo(), before.combo() + 1);
                prop_assert!(points > 0);
            } else {
                prop_assert_eq!(state.combo(), 0);
                prop_assert_eq!(state.multiplier(), 1);
                prop_assert_eq!(points, 0);
            }
        }
    }

    #[test]
    fn every_target_is_judged_at_most_once(
        seed in any::<u64>(),
        inputs in prop::collection::vec(0u8..32, 50..300)
    ) {
        let mut session = GameSession::seeded(&busy_config(), seed);
        let mut judged = HashSet::new();
        let mut last_score = 0;

        for bits in inputs {
            let report = session.tick_with_gestures(gesture_set(bits));
            for event in &report.events {
                prop_assert!(judged.insert(event.target), "{} judged twice", event.target);
                if event.judgement.is_hit() {
                    prop_assert!(report.active.contains(event.gesture));
                } else {
                    prop_assert_eq!(event.points, 0);
                }
            }
            let score = session.score();
            prop_assert!(score.score() >= last_score);
            last_score = score.score();
            prop_assert_eq!(score.judged() as usize, judged.len());
        }
    }

    #[test]
    fn live_targets_stay_on_screen(
        seed in any::<u64>(),
        ticks in 1usize..400
    ) {
        let config = busy_config();
        let mut session = GameSession::seeded(&config, seed);
        for _ in 0..ticks {
            session.tick(None);
            for target in session.targets() {
                prop_assert!(!target.is_off_screen());
                prop_assert!(target.x <= config.window.width as f32);
            }
        }
    }
}
