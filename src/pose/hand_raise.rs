use super::landmark::{Landmark, Side};
use crate::error::Result;

/// Per-side hand raise decision for one pose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandRaiseState {
    pub left: bool,
    pub right: bool,
}

impl HandRaiseState {
    pub fn any(&self) -> bool {
        self.left || self.right
    }

    pub fn both(&self) -> bool {
        self.left && self.right
    }
}

/// Detects a hand raised above shoulder level
///
/// A side counts as raised when its wrist is strictly above its shoulder in
/// the image, i.e. has a smaller `y`. Landmarks come from an external pose
/// estimator in the MediaPipe layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandRaiseDetector;

impl HandRaiseDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, landmarks: &[Landmark]) -> Result<HandRaiseState> {
        let state = HandRaiseState {
            left: Self::side_raised(landmarks, Side::Left)?,
            right: Self::side_raised(landmarks, Side::Right)?,
        };
        log::debug!(
            "Left hand raised: {}, right hand raised: {}",
            state.left,
            state.right
        );
        Ok(state)
    }

    /// True if either hand is raised
    pub fn is_hand_raised(&self, landmarks: &[Landmark]) -> Result<bool> {
        Ok(self.detect(landmarks)?.any())
    }

    fn side_raised(landmarks: &[Landmark], side: Side) -> Result<bool> {
        let shoulder = side.shoulder().get(landmarks)?;
        let wrist = side.wrist().get(landmarks)?;
        Ok(wrist.y < shoulder.y)
    }
}
