pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod pose;
pub mod sensor;
pub mod smoothing;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::PipelineConfig;
pub use error::{MotionError, Result};
pub use smoothing::SlidingWindowAverager;
pub use wav::save_wav;
