#![allow(dead_code)]

use motionkit::constants::POSE_LANDMARK_COUNT;
use motionkit::pose::{Landmark, PoseLandmark};

/// Pose with both shoulders at `shoulder_y` and the given wrist heights
pub fn pose_with_wrists(left_wrist_y: f64, right_wrist_y: f64, shoulder_y: f64) -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::default(); POSE_LANDMARK_COUNT];
    let mut set = |lm: PoseLandmark, y: f64| landmarks[lm.index()] = Landmark::new(0.0, y);
    set(PoseLandmark::LeftShoulder, shoulder_y);
    set(PoseLandmark::RightShoulder, shoulder_y);
    set(PoseLandmark::LeftWrist, left_wrist_y);
    set(PoseLandmark::RightWrist, right_wrist_y);
    landmarks
}

/// Mean of a slice, `0.0` when empty
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
