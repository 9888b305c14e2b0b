// Application shell: landmark sources, pose recordings, tick clock and app state

pub mod app_state;
pub mod logging;
pub mod recording;
pub mod source;
pub mod time;

pub use app_state::{App, AppStateType, StateTransition, load_config};
pub use recording::{PoseRecorder, PoseRecording, RecordingError};
pub use source::{
    AutoplaySource, DEFAULT_MAX_STALE_READS, InferenceWorker, LandmarkSource, RecordingSource,
};
pub use time::{Clock, FixedTicker, ManualClock, MonotonicClock};
