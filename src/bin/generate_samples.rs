use anyhow::{Context, Result};
use clap::Parser;
use motionkit::save_wav;
use motionkit::simulation::{NoiseConfig, generate_noisy_signal};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_samples")]
#[command(about = "Generate a noisy synthetic sensor recording as a mono WAV file")]
struct Args {
    /// Output WAV file
    #[arg(short, long, default_value = "data/synthetic/sensor.wav")]
    output: PathBuf,

    /// TOML noise configuration file (seed, additive, impulse, drift sections)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 50)]
    sample_rate: u32,

    /// Level the signal oscillates around
    #[arg(long, default_value_t = 0.0)]
    baseline: f64,

    /// Peak deviation from the baseline
    #[arg(long, default_value_t = 0.5)]
    amplitude: f64,

    /// Oscillation frequency in Hz
    #[arg(long, default_value_t = 0.5)]
    frequency: f64,

    /// Gaussian noise standard deviation (CLI override)
    #[arg(long)]
    noise_std: Option<f64>,

    /// Outlier rate in Hz (CLI override)
    #[arg(long)]
    impulse_rate: Option<f64>,
}

fn load_noise_config(path: &PathBuf) -> Result<NoiseConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_noise_config(args: &Args) -> Result<NoiseConfig> {
    let mut config = match args.config {
        Some(ref path) => load_noise_config(path)?,
        None => NoiseConfig::default().with_gaussian(0.1),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(std_dev) = args.noise_std {
        config = config.with_gaussian(std_dev);
    }
    if let Some(rate) = args.impulse_rate {
        config = config.with_impulse(rate, args.amplitude.abs().max(0.1) * 4.0, 1);
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let noise_config = build_noise_config(&args)?;
    let signal = generate_noisy_signal(
        args.duration,
        args.sample_rate,
        args.baseline,
        args.amplitude,
        args.frequency,
        &noise_config,
    );

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create output directory")?;
        }
    }

    save_wav(&args.output, &signal, args.sample_rate).context("Failed to write WAV file")?;

    eprintln!(
        "Wrote {} samples at {} Hz to {}",
        signal.len(),
        args.sample_rate,
        args.output.display()
    );
    Ok(())
}
