pub mod capture;
pub mod source;

pub use capture::SensorCapture;
pub use source::{ChannelSource, SampleSource, SyntheticSource, WavFileSource};
