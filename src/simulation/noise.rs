use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub additive: Option<AdditiveNoiseConfig>,
    pub impulse: Option<ImpulseNoiseConfig>,
    pub drift: Option<DriftConfig>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_gaussian(mut self, std_dev: f64) -> Self {
        self.additive = Some(AdditiveNoiseConfig { std_dev });
        self
    }

    pub fn with_impulse(mut self, rate_hz: f64, amplitude: f64, duration_samples: usize) -> Self {
        self.impulse = Some(ImpulseNoiseConfig {
            rate_hz,
            amplitude,
            duration_samples,
        });
        self
    }

    pub fn with_drift(mut self, units_per_sec: f64) -> Self {
        self.drift = Some(DriftConfig { units_per_sec });
        self
    }
}

/// Zero-mean Gaussian noise
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub std_dev: f64,
}

/// Randomly spaced outlier bursts of fixed magnitude and random sign
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ImpulseNoiseConfig {
    pub rate_hz: f64,
    pub amplitude: f64,
    pub duration_samples: usize,
}

/// Linear sensor drift
#[derive(Clone, Debug, serde::Deserialize)]
pub struct DriftConfig {
    pub units_per_sec: f64,
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Population variance of a signal
pub fn signal_variance(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let mean = signal.iter().sum::<f64>() / signal.len() as f64;
    signal.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / signal.len() as f64
}

fn apply_additive_noise(signal: &mut [f64], config: &AdditiveNoiseConfig, rng: &mut ChaCha8Rng) {
    if config.std_dev <= 0.0 {
        return;
    }
    let normal = match Normal::new(0.0, config.std_dev) {
        Ok(n) => n,
        Err(e) => {
            log::warn!("Skipping additive noise: {}", e);
            return;
        }
    };

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
}

fn apply_impulse_noise(
    signal: &mut [f64],
    config: &ImpulseNoiseConfig,
    sample_rate: f64,
    rng: &mut ChaCha8Rng,
) {
    let n = signal.len();
    if n == 0 || config.rate_hz <= 0.0 {
        return;
    }

    let avg_samples_between_impulses = sample_rate / config.rate_hz;

    let mut pos = 0usize;
    loop {
        let interval = (rng.random::<f64>() * 2.0 * avg_samples_between_impulses) as usize;
        pos += interval.max(1);

        if pos >= n {
            break;
        }

        let sign = if rng.random::<bool>() { 1.0 } else { -1.0 };
        let end = (pos + config.duration_samples.max(1)).min(n);

        for sample in signal[pos..end].iter_mut() {
            *sample += sign * config.amplitude;
        }
    }
}

fn apply_drift(signal: &mut [f64], config: &DriftConfig, sample_rate: f64) {
    for (i, sample) in signal.iter_mut().enumerate() {
        *sample += config.units_per_sec * i as f64 / sample_rate;
    }
}

pub fn apply_noise(clean_signal: &[f64], config: &NoiseConfig, sample_rate: f64) -> Vec<f64> {
    let mut signal = clean_signal.to_vec();
    let mut rng = create_rng(config.seed);

    if let Some(ref drift_config) = config.drift {
        apply_drift(&mut signal, drift_config, sample_rate);
    }

    if let Some(ref additive_config) = config.additive {
        apply_additive_noise(&mut signal, additive_config, &mut rng);
    }

    if let Some(ref impulse_config) = config.impulse {
        apply_impulse_noise(&mut signal, impulse_config, sample_rate, &mut rng);
    }

    signal
}

pub fn generate_noisy_signal(
    duration_secs: f64,
    sample_rate: u32,
    baseline: f64,
    amplitude: f64,
    frequency_hz: f64,
    noise_config: &NoiseConfig,
) -> Vec<f64> {
    let clean = super::signal::generate_sensor_signal(
        duration_secs,
        sample_rate,
        baseline,
        amplitude,
        frequency_hz,
    );
    apply_noise(&clean, noise_config, sample_rate as f64)
}
