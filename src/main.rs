use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use motionkit::config::{PipelineConfig, ProcessingMethod, SampleRate, WindowSize};
use motionkit::output::OutputFormat;
use motionkit::pipeline::{Pipeline, RunSummary};
use motionkit::sensor::{ChannelSource, SampleSource, SyntheticSource, WavFileSource};

#[derive(Parser, Debug)]
#[command(name = "motionkit")]
#[command(about = "Smooth a sensor sample stream with a sliding-window moving average", long_about = None)]
struct Args {
    /// WAV recording to read (first channel); synthetic samples if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Moving-average window size
    #[arg(short, long)]
    window: Option<WindowSize>,

    /// Processing method: smooth (moving_average), passthrough (none)
    #[arg(short, long)]
    method: Option<ProcessingMethod>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Number of synthetic chunks
    #[arg(long)]
    chunks: Option<usize>,

    /// Samples per chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Synthetic sample rate (e.g., "50", "100hz", "20ms")
    #[arg(long)]
    sample_rate: Option<SampleRate>,

    /// Deliver chunks at the sample rate from a capture thread
    #[arg(long)]
    realtime: bool,

    /// Print the run summary as JSON on stderr
    #[arg(long)]
    summary_json: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    log::info!(
        "Window: {} ({:?}), chunk size: {}, sample rate: {}",
        config.smoother.window_size,
        config.smoother.method,
        config.source.chunk_size,
        config.source.sample_rate
    );

    let mut source: Box<dyn SampleSource> = match args.input {
        Some(ref path) => Box::new(WavFileSource::new(path, config.source.chunk_size)?),
        None => Box::new(SyntheticSource::from_config(&config.source)?),
    };
    if config.source.realtime {
        source = Box::new(ChannelSource::spawn(source, true)?);
    }

    let mut pipeline = Pipeline::from_config(&config, source, Box::new(std::io::stdout()));
    let summary = pipeline.run()?;

    if args.summary_json {
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        eprintln!("{}", json);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<PipelineConfig> {
    let mut config = match args.config {
        Some(ref path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(window) = args.window {
        config.smoother.window_size = window;
    }
    if let Some(method) = args.method {
        config.smoother.method = method;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(chunks) = args.chunks {
        config.source.num_chunks = chunks;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.source.chunk_size = chunk_size;
    }
    if let Some(rate) = args.sample_rate {
        config.source.sample_rate = rate;
    }
    config.source.realtime |= args.realtime;
    config.output.verbose |= args.verbose > 0;

    config.validate()?;
    Ok(config)
}

fn print_summary(summary: &RunSummary) {
    eprintln!();
    eprintln!(
        "Processed {} samples in {} chunks",
        summary.samples, summary.chunks
    );
    for (label, stats) in [("raw", &summary.raw), ("smoothed", &summary.smoothed)] {
        if let Some(s) = stats {
            eprintln!(
                "  {:<9} mean {:>10.3}  std {:>9.3}  min {:>10.3}  max {:>10.3}",
                label, s.mean, s.std_dev, s.min, s.max
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let args = Args::parse_from([
            "motionkit",
            "--window",
            "3",
            "--method",
            "passthrough",
            "--format",
            "csv",
            "--sample-rate",
            "10ms",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.smoother.window_size.get(), 3);
        assert_eq!(config.smoother.method, ProcessingMethod::Passthrough);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!((config.source.sample_rate.as_hz() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cli_method_aliases_and_unknown() {
        let args = Args::parse_from(["motionkit", "--method", "moving_average"]);
        assert_eq!(args.method, Some(ProcessingMethod::Smooth));

        let args = Args::parse_from(["motionkit", "-m", "none"]);
        assert_eq!(args.method, Some(ProcessingMethod::Passthrough));

        assert!(Args::try_parse_from(["motionkit", "--method", "sharpen"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_window() {
        assert!(Args::try_parse_from(["motionkit", "--window", "0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_chunk_size() {
        let args = Args::parse_from(["motionkit", "--chunk-size", "0"]);
        assert!(build_config(&args).is_err());
    }
}
