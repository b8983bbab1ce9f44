pub mod filter;
pub mod window;

pub use filter::{Filter, Passthrough};
pub use window::SlidingWindowAverager;
