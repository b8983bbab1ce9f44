//! Synthetic sensor signals for tests and sample generation.

mod noise;
mod signal;

pub use noise::{
    AdditiveNoiseConfig, DriftConfig, ImpulseNoiseConfig, NoiseConfig, apply_noise,
    generate_noisy_signal, signal_variance,
};
pub use signal::{generate_sensor_signal, generate_signal_with_fn, generate_step_signal};
