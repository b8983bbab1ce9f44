use std::f64::consts::PI;

/// Generate a clean sinusoidal sensor reading around a baseline
pub fn generate_sensor_signal(
    duration_secs: f64,
    sample_rate: u32,
    baseline: f64,
    amplitude: f64,
    frequency_hz: f64,
) -> Vec<f64> {
    generate_signal_with_fn(duration_secs, sample_rate, |t| {
        baseline + amplitude * (2.0 * PI * frequency_hz * t).sin()
    })
}

/// Generate a sensor reading from an arbitrary function of time
/// The value_fn takes time in seconds and returns the sample value
pub fn generate_signal_with_fn<F>(duration_secs: f64, sample_rate: u32, value_fn: F) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let num_samples = (duration_secs * sample_rate as f64) as usize;
    (0..num_samples)
        .map(|i| value_fn(i as f64 / sample_rate as f64))
        .collect()
}

/// Generate a step from `low` to `high` at `step_at_secs`
pub fn generate_step_signal(
    duration_secs: f64,
    sample_rate: u32,
    low: f64,
    high: f64,
    step_at_secs: f64,
) -> Vec<f64> {
    generate_signal_with_fn(duration_secs, sample_rate, |t| {
        if t < step_at_secs { low } else { high }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_length() {
        let signal = generate_sensor_signal(2.0, 50, 10.0, 1.0, 1.0);
        assert_eq!(signal.len(), 100);
        assert!((signal[0] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_signal() {
        let signal = generate_step_signal(1.0, 10, 0.0, 1.0, 0.5);
        assert_eq!(signal[4], 0.0);
        assert_eq!(signal[5], 1.0);
    }
}
