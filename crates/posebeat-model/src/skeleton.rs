// Upper-body bone list for the player overlay.

use crate::Point;
use crate::landmark::{
    LEFT_ELBOW, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ELBOW, RIGHT_HIP, RIGHT_SHOULDER,
    RIGHT_WRIST,
};

pub const BONES: [(usize, usize); 7] = [
    (LEFT_SHOULDER, RIGHT_SHOULDER),
    (LEFT_SHOULDER, LEFT_ELBOW),
    (LEFT_ELBOW, LEFT_WRIST),
    (RIGHT_SHOULDER, RIGHT_ELBOW),
    (RIGHT_ELBOW, RIGHT_WRIST),
    (LEFT_SHOULDER, LEFT_HIP),
    (RIGHT_SHOULDER, RIGHT_HIP),
];

pub const JOINTS: [usize; 8] = [
    LEFT_SHOULDER,
    RIGHT_SHOULDER,
    LEFT_ELBOW,
    RIGHT_ELBOW,
    LEFT_WRIST,
    RIGHT_WRIST,
    LEFT_HIP,
    RIGHT_HIP,
];

/// Bone segments whose both endpoints were detected.
pub fn visible_bones(landmarks: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    BONES.iter().filter_map(|&(a, b)| {
        let a = landmarks.get(a).filter(|p| !p.is_missing())?;
        let b = landmarks.get(b).filter(|p| !p.is_missing())?;
        Some((*a, *b))
    })
}

/// Detected joint positions.
pub fn visible_joints(landmarks: &[Point]) -> impl Iterator<Item = Point> + '_ {
    JOINTS
        .iter()
        .filter_map(|&i| landmarks.get(i).copied())
        .filter(|p| !p.is_missing())
}
