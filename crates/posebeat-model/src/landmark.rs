use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Keypoint indices in the 17-point COCO body layout.
pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 5;
pub const RIGHT_SHOULDER: usize = 6;
pub const LEFT_ELBOW: usize = 7;
pub const RIGHT_ELBOW: usize = 8;
pub const LEFT_WRIST: usize = 9;
pub const RIGHT_WRIST: usize = 10;
pub const LEFT_HIP: usize = 11;
pub const RIGHT_HIP: usize = 12;

/// Number of keypoints the pose model emits per person.
pub const KEYPOINT_COUNT: usize = 17;

/// Landmark sets shorter than this carry no usable arm data.
pub const MIN_LANDMARKS: usize = 13;

/// A screen-space position in pixels (y grows downward).
///
/// `(0, 0)` is the pose model's "not detected" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const MISSING: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_missing(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Landmarks of a single person for one frame, in keypoint-index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet(Vec<Point>);

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Landmark at `index`, or `None` when out of range or undetected.
    pub fn detected(&self, index: usize) -> Option<Point> {
        self.0.get(index).copied().filter(|p| !p.is_missing())
    }

    pub fn into_inner(self) -> Vec<Point> {
        self.0
    }
}

impl Deref for LandmarkSet {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.0
    }
}

impl From<Vec<Point>> for LandmarkSet {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl FromIterator<Point> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(Point::MISSING.is_missing());
        assert!(!Point::new(0.0, 12.0).is_missing());
        assert!(!Point::new(12.0, 0.0).is_missing());
    }

    #[test]
    fn test_detected() {
        let set = LandmarkSet::new(vec![Point::new(1.0, 2.0), Point::MISSING]);
        assert_eq!(set.detected(0), Some(Point::new(1.0, 2.0)));
        assert_eq!(set.detected(1), None);
        assert_eq!(set.detected(7), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(1.5, 2.0)).unwrap();
        assert_eq!(json, "[1.5,2.0]");
        let set: LandmarkSet = serde_json::from_str("[[1.0,2.0],[0.0,0.0]]").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set[1].is_missing());
    }
}
