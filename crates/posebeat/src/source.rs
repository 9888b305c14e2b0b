use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use posebeat_model::{LandmarkSet, PoseBuilder};
use posebeat_rule::Target;
use tracing::{debug, warn};

use crate::recording::{PoseRecording, RecordingError};

/// Supplies one landmark frame per tick.
pub trait LandmarkSource {
    /// Landmarks for the coming tick, `Ok(None)` when nobody was detected.
    ///
    /// `targets` are the live targets; most sources ignore them.
    fn next_frame(&mut self, targets: &[Target]) -> Result<Option<LandmarkSet>>;

    /// No further input will arrive.
    fn is_finished(&self) -> bool {
        false
    }
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn next_frame(&mut self, targets: &[Target]) -> Result<Option<LandmarkSet>> {
        (**self).next_frame(targets)
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}

/// Replays a recorded session frame by frame.
pub struct RecordingSource {
    frames: std::vec::IntoIter<Option<LandmarkSet>>,
    tick_rate: u32,
}

impl RecordingSource {
    pub fn open(path: &Path) -> Result<Self, RecordingError> {
        PoseRecording::read(path).map(Self::new)
    }

    pub fn new(recording: PoseRecording) -> Self {
        Self {
            tick_rate: recording.tick_rate,
            frames: recording.frames.into_iter(),
        }
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for RecordingSource {
    fn next_frame(&mut self, _targets: &[Target]) -> Result<Option<LandmarkSet>> {
        Ok(self.frames.next().flatten())
    }

    fn is_finished(&self) -> bool {
        self.frames.len() == 0
    }
}

/// A flawless performer: always strikes the gesture of the next target due
/// at the boundary, and stands relaxed when none is on screen.
pub struct AutoplaySource {
    performer: PoseBuilder,
}

impl AutoplaySource {
    pub fn new() -> Self {
        Self {
            performer: PoseBuilder::standing(),
        }
    }

    pub fn with_performer(performer: PoseBuilder) -> Self {
        Self { performer }
    }
}

impl Default for AutoplaySource {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkSource for AutoplaySource {
    fn next_frame(&mut self, targets: &[Target]) -> Result<Option<LandmarkSet>> {
        let next = targets
            .iter()
            .filter(|t| !t.is_evaluated())
            .min_by(|a, b| a.x.total_cmp(&b.x));
        let pose = match next {
            Some(target) => self.performer.clone().gesture(target.gesture),
            None => self.performer.clone(),
        };
        Ok(Some(pose.build()))
    }
}

#[derive(Default)]
struct Slot {
    frame: Option<LandmarkSet>,
    published: u64,
    finished: bool,
}

/// Reads a frame may be reused before it counts as "nobody detected".
pub const DEFAULT_MAX_STALE_READS: u32 = 3;

/// Runs a landmark source on a background thread.
///
/// Only the freshest frame is kept: every result overwrites the slot, and
/// the tick loop reads whatever is there. A failed inference is logged and
/// published as "nobody detected". If the thread stops publishing, the last
/// frame is served for at most `max_stale_reads` further ticks.
pub struct InferenceWorker {
    slot: Arc<Mutex<Slot>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    last_seen: u64,
    stale_reads: u32,
    max_stale_reads: u32,
}

impl InferenceWorker {
    /// Start polling `source` every `interval`.
    pub fn spawn<S>(source: S, interval: Duration) -> Result<Self>
    where
        S: LandmarkSource + Send + 'static,
    {
        let slot = Arc::new(Mutex::new(Slot::default()));
        let stop = Arc::new(AtomicBool::new(false));

        let worker_slot = Arc::clone(&slot);
        let worker_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("inference".to_string())
            .spawn(move || Self::run(source, interval, &worker_slot, &worker_stop))
            .context("spawning inference thread")?;

        Ok(Self {
            slot,
            stop,
            handle: Some(handle),
            last_seen: 0,
            stale_reads: 0,
            max_stale_reads: DEFAULT_MAX_STALE_READS,
        })
    }

    pub fn with_max_stale_reads(mut self, reads: u32) -> Self {
        self.max_stale_reads = reads;
        self
    }

    fn run<S: LandmarkSource>(
        mut source: S,
        interval: Duration,
        slot: &Mutex<Slot>,
        stop: &AtomicBool,
    ) {
        debug!(?interval, "inference worker started");
        while !stop.load(Ordering::Acquire) {
            let frame = source.next_frame(&[]).unwrap_or_else(|e| {
                warn!(error = %e, "inference failed, publishing no landmarks");
                None
            });
            let finished = source.is_finished();
            {
                let mut slot = slot.lock();
                slot.frame = frame;
                slot.published += 1;
                slot.finished = finished;
            }
            if finished {
                break;
            }
            thread::sleep(interval);
        }
        debug!("inference worker stopped");
    }

    /// Most recently published frame, however old.
    pub fn latest(&self) -> Option<LandmarkSet> {
        self.slot.lock().frame.clone()
    }

    /// Number of frames published so far.
    pub fn published(&self) -> u64 {
        self.slot.lock().published
    }

    /// Signal the thread to stop and wait for it.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("inference thread panicked");
        }
    }
}

impl LandmarkSource for InferenceWorker {
    fn next_frame(&mut self, _targets: &[Target]) -> Result<Option<LandmarkSet>> {
        let slot = self.slot.lock();
        if slot.published != self.last_seen {
            self.last_seen = slot.published;
            self.stale_reads = 0;
        } else {
            self.stale_reads = self.stale_reads.saturating_add(1);
        }
        if self.stale_reads > self.max_stale_reads {
            return Ok(None);
        }
        Ok(slot.frame.clone())
    }

    fn is_finished(&self) -> bool {
        self.slot.lock().finished
    }
}

impl Drop for InferenceWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
