// Targets, spawning, judgement, scoring and feedback for one play session

mod feedback;
mod judge;
mod score;
mod session;
mod spawner;
mod target;

pub use feedback::{FeedbackMessage, FeedbackQueue};
pub use judge::{JudgeCause, JudgeEvent, JudgementEngine};
pub use score::ScoreState;
pub use session::{GameSession, SessionSnapshot, SessionSummary, TickReport};
pub use spawner::TargetSpawner;
pub use target::{Judgement, Target, TargetId};
