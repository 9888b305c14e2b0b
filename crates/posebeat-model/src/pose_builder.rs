use crate::landmark::{
    KEYPOINT_COUNT, LEFT_ELBOW, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ELBOW, RIGHT_HIP,
    RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::{GestureLabel, LandmarkSet, Point};

const SHOULDER_HALF_WIDTH: f32 = 150.0;
const RELAXED_DROP: f32 = 40.0;
const RAISE: f32 = 150.0;
const REACH: f32 = 250.0;
const CROSS_OFFSET: f32 = 40.0;
const TORSO_LENGTH: f32 = 250.0;

/// Synthesizes a full 17-point landmark set for a standing performer.
///
/// With no gesture applied the arms hang relaxed and no label is satisfied
/// under the default classifier thresholds.
#[derive(Debug, Clone)]
pub struct PoseBuilder {
    center_x: f32,
    shoulder_y: f32,
    left_wrist: Option<Point>,
    right_wrist: Option<Point>,
    missing: Vec<usize>,
    len: usize,
}

impl PoseBuilder {
    pub fn new(center_x: f32, shoulder_y: f32) -> Self {
        Self {
            center_x,
            shoulder_y,
            left_wrist: None,
            right_wrist: None,
            missing: Vec::new(),
            len: KEYPOINT_COUNT,
        }
    }

    /// Performer centered in a 1280x720 frame.
    pub fn standing() -> Self {
        Self::new(640.0, 300.0)
    }

    pub fn left_shoulder(&self) -> Point {
        Point::new(self.center_x - SHOULDER_HALF_WIDTH, self.shoulder_y)
    }

    pub fn right_shoulder(&self) -> Point {
        Point::new(self.center_x + SHOULDER_HALF_WIDTH, self.shoulder_y)
    }

    /// Place both wrists so the pose reads as exactly `label`.
    pub fn gesture(mut self, label: GestureLabel) -> Self {
        let ls = self.left_shoulder();
        let rs = self.right_shoulder();
        let (left, right) = match label {
            GestureLabel::ArmsUp => (
                Point::new(ls.x, ls.y - RAISE),
                Point::new(rs.x, rs.y - RAISE),
            ),
            GestureLabel::ArmsDown => (
                Point::new(ls.x, ls.y + RAISE),
                Point::new(rs.x, rs.y + RAISE),
            ),
            GestureLabel::RightArmExtended => (
                Point::new(ls.x, ls.y + RELAXED_DROP),
                Point::new(rs.x + REACH, rs.y),
            ),
            GestureLabel::LeftArmExtended => (
                Point::new(ls.x - REACH, ls.y),
                Point::new(rs.x, rs.y + RELAXED_DROP),
            ),
            GestureLabel::ArmsCrossed => (
                Point::new(self.center_x + CROSS_OFFSET, ls.y + CROSS_OFFSET),
                Point::new(self.center_x - CROSS_OFFSET, rs.y + CROSS_OFFSET),
            ),
        };
        self.left_wrist = Some(left);
        self.right_wrist = Some(right);
        self
    }

    pub fn left_wrist(mut self, wrist: Point) -> Self {
        self.left_wrist = Some(wrist);
        self
    }

    pub fn right_wrist(mut self, wrist: Point) -> Self {
        self.right_wrist = Some(wrist);
        self
    }

    /// Report the keypoint at `index` as undetected.
    pub fn missing(mut self, index: usize) -> Self {
        self.missing.push(index);
        self
    }

    /// Emit only the first `len` keypoints.
    pub fn truncated(mut self, len: usize) -> Self {
        self.len = len.min(KEYPOINT_COUNT);
        self
    }

    pub fn build(&self) -> LandmarkSet {
        let ls = self.left_shoulder();
        let rs = self.right_shoulder();
        let lw = self
            .left_wrist
            .unwrap_or(Point::new(ls.x, ls.y + RELAXED_DROP));
        let rw = self
            .right_wrist
            .unwrap_or(Point::new(rs.x, rs.y + RELAXED_DROP));
        let hip_y = self.shoulder_y + TORSO_LENGTH;
        let lh = Point::new(ls.x + 30.0, hip_y);
        let rh = Point::new(rs.x - 30.0, hip_y);

        let mut points = [Point::MISSING; KEYPOINT_COUNT];
        points[NOSE] = Point::new(self.center_x, self.shoulder_y - 120.0);
        points[1] = Point::new(self.center_x - 20.0, self.shoulder_y - 135.0);
        points[2] = Point::new(self.center_x + 20.0, self.shoulder_y - 135.0);
        points[3] = Point::new(self.center_x - 40.0, self.shoulder_y - 125.0);
        points[4] = Point::new(self.center_x + 40.0, self.shoulder_y - 125.0);
        points[LEFT_SHOULDER] = ls;
        points[RIGHT_SHOULDER] = rs;
        points[LEFT_ELBOW] = midpoint(ls, lw);
        points[RIGHT_ELBOW] = midpoint(rs, rw);
        points[LEFT_WRIST] = lw;
        points[RIGHT_WRIST] = rw;
        points[LEFT_HIP] = lh;
        points[RIGHT_HIP] = rh;
        points[13] = Point::new(lh.x, hip_y + 150.0);
        points[14] = Point::new(rh.x, hip_y + 150.0);
        points[15] = Point::new(lh.x, hip_y + 300.0);
        points[16] = Point::new(rh.x, hip_y + 300.0);

        for &index in &self.missing {
            if let Some(p) = points.get_mut(index) {
                *p = Point::MISSING;
            }
        }

        points[..self.len].iter().copied().collect()
    }
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_length_and_detected() {
        let pose = PoseBuilder::standing().build();
        assert_eq!(pose.len(), KEYPOINT_COUNT);
        assert!(pose.iter().all(|p| !p.is_missing()));
    }

    #[test]
    fn test_missing_and_truncated() {
        let pose = PoseBuilder::standing().missing(LEFT_WRIST).truncated(11).build();
        assert_eq!(pose.len(), 11);
        assert!(pose[LEFT_WRIST].is_missing());
    }

    #[test]
    fn test_explicit_wrist_overrides() {
        let pose = PoseBuilder::standing()
            .gesture(GestureLabel::ArmsUp)
            .right_wrist(Point::new(1000.0, 310.0))
            .build();
        assert_eq!(pose[RIGHT_WRIST], Point::new(1000.0, 310.0));
        assert_eq!(pose[LEFT_WRIST], Point::new(490.0, 150.0));
    }
}
