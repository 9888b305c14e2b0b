use posebeat::{App, AutoplaySource, LandmarkSource, PoseRecorder, PoseRecording, RecordingSource};
use posebeat_config::GameConfig;
use posebeat_rule::SessionSummary;
use tempfile::tempdir;

const SEED: u64 = 99;
const TICKS: u64 = 1200;

/// Drive a full session from `source`, optionally capturing its input.
fn play(source: &mut dyn LandmarkSource, mut recorder: Option<&mut PoseRecorder>) -> SessionSummary {
    let mut app = App::new(GameConfig::default(), Some(SEED)).with_session_ticks(TICKS);
    app.start_game();
    for _ in 0..TICKS {
        let targets = app.session().map(|s| s.targets()).unwrap_or_default();
        let frame = source.next_frame(targets).unwrap();
        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.push(frame.as_ref());
        }
        app.update(frame.as_deref());
    }
    app.end_game().unwrap()
}

#[test]
fn autoplay_clears_every_target() {
    let summary = play(&mut AutoplaySource::new(), None);
    assert!(summary.hits > 0);
    assert_eq!(summary.misses, 0);
    assert_eq!(summary.perfects, summary.hits);
    assert_eq!(summary.max_combo, summary.hits);
}

#[test]
fn recorded_session_replays_to_the_same_result() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.json");

    let mut recorder = PoseRecorder::new(30);
    let first_run = play(&mut AutoplaySource::new(), Some(&mut recorder));
    assert_eq!(recorder.len() as u64, TICKS);
    recorder.finish().write(&path).unwrap();

    let mut replay = RecordingSource::open(&path).unwrap();
    let replayed = play(&mut replay, None);
    assert!(replay.is_finished());
    assert_eq!(replayed, first_run);
}

#[test]
fn replay_against_a_different_sequence_misses() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.json");

    let mut recorder = PoseRecorder::new(30);
    play(&mut AutoplaySource::new(), Some(&mut recorder));
    recorder.finish().write(&path).unwrap();

    // Same input, different targets.
    let recording = PoseRecording::read(&path).unwrap();
    let mut app = App::new(GameConfig::default(), Some(SEED + 1000));
    app.start_game();
    for frame in &recording.frames {
        app.update(frame.as_deref());
    }
    let summary = app.end_game().unwrap();
    assert!(summary.misses > 0);
}
