use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::landmark::{Landmark, Side};
use crate::error::{MotionError, Result};

/// 2D point in image or normalized coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<&Landmark> for Point2 {
    fn from(lm: &Landmark) -> Self {
        Self { x: lm.x, y: lm.y }
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses `"x,y"`; surrounding whitespace and parentheses are ignored
impl FromStr for Point2 {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (x, y) = inner
            .split_once(',')
            .ok_or_else(|| format!("expected \"x,y\", got {}", s))?;
        let x: f64 = x.trim().parse().map_err(|_| format!("invalid x: {}", s))?;
        let y: f64 = y.trim().parse().map_err(|_| format!("invalid y: {}", s))?;
        Ok(Self { x, y })
    }
}

/// Angle at `vertex` between the rays to `p1` and `p3`, in degrees
///
/// Returns a value in `[0, 180]`. If either ray has zero length the angle is
/// undefined and `0.0` is returned.
pub fn angle_between(p1: Point2, vertex: Point2, p3: Point2) -> f64 {
    let a = (p1.x - vertex.x, p1.y - vertex.y);
    let b = (p3.x - vertex.x, p3.y - vertex.y);

    let mag = a.0.hypot(a.1) * b.0.hypot(b.1);
    if mag == 0.0 {
        return 0.0;
    }

    let dot = a.0 * b.0 + a.1 * b.1;
    // Rounding can push the cosine slightly outside [-1, 1]
    let cosine = (dot / mag).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Shoulder, elbow and wrist of one arm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointKeypoints {
    pub shoulder: Point2,
    pub elbow: Point2,
    pub wrist: Point2,
}

impl JointKeypoints {
    pub fn new(shoulder: Point2, elbow: Point2, wrist: Point2) -> Self {
        Self {
            shoulder,
            elbow,
            wrist,
        }
    }

    /// Build from a map keyed by `"shoulder"`, `"elbow"` and `"wrist"`
    ///
    /// # Errors
    /// Returns [`MotionError::MissingKeypoint`] naming the first absent key.
    pub fn from_map(keypoints: &HashMap<String, (f64, f64)>) -> Result<Self> {
        let get = |name: &str| {
            keypoints
                .get(name)
                .map(|&p| Point2::from(p))
                .ok_or_else(|| MotionError::MissingKeypoint(name.to_string()))
        };
        Ok(Self {
            shoulder: get("shoulder")?,
            elbow: get("elbow")?,
            wrist: get("wrist")?,
        })
    }

    /// Take one arm out of a full pose
    pub fn from_landmarks(landmarks: &[Landmark], side: Side) -> Result<Self> {
        Ok(Self {
            shoulder: side.shoulder().get(landmarks)?.into(),
            elbow: side.elbow().get(landmarks)?.into(),
            wrist: side.wrist().get(landmarks)?.into(),
        })
    }

    /// Elbow flexion angle (shoulder-elbow-wrist) in degrees
    pub fn elbow_angle(&self) -> f64 {
        angle_between(self.shoulder, self.elbow, self.wrist)
    }
}
