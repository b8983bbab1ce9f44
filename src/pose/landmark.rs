use crate::error::{MotionError, Result};

/// One pose keypoint in normalized image coordinates
///
/// `x` and `y` are in `[0, 1]` relative to the frame, with `y` growing
/// downward. `z` is relative depth and `visibility` the detector's
/// confidence that the point is in view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Landmark indices in the 33-point MediaPipe body layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseLandmark {
    Nose = 0,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
}

impl PoseLandmark {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look this landmark up in a pose
    ///
    /// # Errors
    /// Returns [`MotionError::InsufficientData`] when the slice is too short.
    pub fn get(self, landmarks: &[Landmark]) -> Result<&Landmark> {
        landmarks
            .get(self.index())
            .ok_or(MotionError::InsufficientData {
                needed: self.index() + 1,
                available: landmarks.len(),
            })
    }
}

/// Body side, from the subject's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn shoulder(self) -> PoseLandmark {
        match self {
            Side::Left => PoseLandmark::LeftShoulder,
            Side::Right => PoseLandmark::RightShoulder,
        }
    }

    pub fn elbow(self) -> PoseLandmark {
        match self {
            Side::Left => PoseLandmark::LeftElbow,
            Side::Right => PoseLandmark::RightElbow,
        }
    }

    pub fn wrist(self) -> PoseLandmark {
        match self {
            Side::Left => PoseLandmark::LeftWrist,
            Side::Right => PoseLandmark::RightWrist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POSE_LANDMARK_COUNT;

    #[test]
    fn test_lookup_by_index() {
        let mut pose = vec![Landmark::default(); POSE_LANDMARK_COUNT];
        pose[15] = Landmark::new(0.2, 0.3);
        let wrist = PoseLandmark::LeftWrist.get(&pose).unwrap();
        assert_eq!(wrist.xy(), (0.2, 0.3));
    }

    #[test]
    fn test_short_pose_is_insufficient() {
        let pose = vec![Landmark::default(); 12];
        match PoseLandmark::RightWrist.get(&pose) {
            Err(MotionError::InsufficientData { needed, available }) => {
                assert_eq!(needed, 17);
                assert_eq!(available, 12);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }
}
