use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use posebeat_config::GameConfig;
use posebeat_model::{GestureClassifier, GestureLabel, PoseBuilder};
use posebeat_rule::GameSession;

fn bench_classify(c: &mut Criterion) {
    let classifier = GestureClassifier::default();
    let poses: Vec<_> = GestureLabel::ALL
        .iter()
        .map(|&label| PoseBuilder::standing().gesture(label).build())
        .collect();

    c.bench_function("classify_all_gestures", |b| {
        b.iter(|| {
            for pose in &poses {
                black_box(classifier.classify(black_box(pose)));
            }
        });
    });
}

fn bench_session_autoplay(c: &mut Criterion) {
    let config = GameConfig::default();
    let poses: Vec<_> = GestureLabel::ALL
        .iter()
        .map(|&label| PoseBuilder::standing().gesture(label).build())
        .collect();

    // One minute of play at 30 ticks/s, always posing for the nearest target.
    c.bench_function("session_autoplay_1800_ticks", |b| {
        b.iter(|| {
            let mut session = GameSession::seeded(&config, 42);
            for _ in 0..1800 {
                let next = session
                    .targets()
                    .iter()
                    .filter(|t| !t.is_evaluated())
                    .min_by(|a, b| a.x.total_cmp(&b.x))
                    .map(|t| t.gesture.index());
                let report = match next {
                    Some(index) => session.tick(Some(&*poses[index])),
                    None => session.tick(None),
                };
                black_box(report);
            }
            black_box(session.end())
        });
    });
}

criterion_group!(benches, bench_classify, bench_session_autoplay);
criterion_main!(benches);
