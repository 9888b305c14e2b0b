// Body landmarks, gesture labels and the gesture classifier

mod classifier;
mod gesture;
pub mod landmark;
mod pose_builder;
pub mod skeleton;

pub use classifier::{CorePoints, GestureClassifier};
pub use gesture::{GestureLabel, GestureSet, Rgb};
pub use landmark::{LandmarkSet, MIN_LANDMARKS, Point};
pub use pose_builder::PoseBuilder;
