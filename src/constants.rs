//! Shared defaults and layout constants
//!
//! Values here are used by the configuration defaults and by the pose
//! helpers that index into MediaPipe-style landmark lists.

/// Default number of samples kept by the moving-average window.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default number of samples per chunk delivered by a source.
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Default number of chunks produced by the synthetic source.
pub const DEFAULT_NUM_CHUNKS: usize = 10;

/// Default sensor sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 50.0;

/// Number of landmarks in a full-body MediaPipe pose.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Capacity of the bounded channel between a capture thread and its consumer.
pub const CAPTURE_CHANNEL_CAPACITY: usize = 10;
