//! Geometry over externally estimated pose keypoints.
//!
//! Nothing here runs a pose model. Callers supply keypoints from whatever
//! estimator they use; these helpers turn them into joint angles and simple
//! gesture decisions.

pub mod angle;
pub mod hand_raise;
pub mod landmark;

pub use angle::{JointKeypoints, Point2, angle_between};
pub use hand_raise::{HandRaiseDetector, HandRaiseState};
pub use landmark::{Landmark, PoseLandmark, Side};
