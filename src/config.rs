//! Configuration for the motionkit smoothing pipeline.
//!
//! Every section has sensible defaults, so a TOML file only needs the keys
//! it wants to change:
//!
//! ```toml
//! [smoother]
//! window_size = 8
//! method = "smooth"
//!
//! [source]
//! sample_rate = "20ms"
//! chunk_size = 64
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_NUM_CHUNKS, DEFAULT_SAMPLE_RATE_HZ, DEFAULT_WINDOW_SIZE,
};
use crate::error::{MotionError, Result};
use crate::output::OutputFormat;

/// Sensor sample rate
///
/// Can be specified as either a frequency in Hz or a sample period in
/// milliseconds. Sensor datasheets often quote the period instead of the rate.
///
/// # Parsing formats
/// - `50` - frequency in Hz (no suffix)
/// - `50hz` or `50Hz` - frequency in Hz (explicit)
/// - `20ms` - period in milliseconds
///
/// # Example
/// ```
/// use motionkit::config::SampleRate;
///
/// let rate: SampleRate = "20ms".parse().unwrap();
/// assert!((rate.as_hz() - 50.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "SampleRateRepr")]
pub struct SampleRate(f64);

impl SampleRate {
    /// Create from frequency in Hz
    pub fn from_hz(hz: f64) -> Result<Self> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(MotionError::InvalidConfiguration(format!(
                "sample rate must be positive, got {}",
                hz
            )));
        }
        Ok(Self(hz))
    }

    /// Create from sample period in milliseconds
    pub fn from_period_ms(ms: f64) -> Result<Self> {
        if !(ms.is_finite() && ms > 0.0) {
            return Err(MotionError::InvalidConfiguration(format!(
                "sample period must be positive, got {}ms",
                ms
            )));
        }
        Ok(Self(1000.0 / ms))
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }

    /// Sample period in seconds
    pub fn period_secs(&self) -> f64 {
        1.0 / self.0
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_RATE_HZ)
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}hz", self.0)
    }
}

impl FromStr for SampleRate {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || MotionError::InvalidConfiguration(format!("invalid sample rate: {}", s));

        if let Some(num) = s.strip_suffix("ms") {
            let ms: f64 = num.trim().parse().map_err(|_| invalid())?;
            return Self::from_period_ms(ms);
        }

        let num = s
            .strip_suffix("hz")
            .or_else(|| s.strip_suffix("Hz"))
            .or_else(|| s.strip_suffix("HZ"))
            .unwrap_or(s);

        let hz: f64 = num.trim().parse().map_err(|_| invalid())?;
        Self::from_hz(hz)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SampleRateRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<SampleRateRepr> for SampleRate {
    type Error = MotionError;

    fn try_from(repr: SampleRateRepr) -> Result<Self> {
        match repr {
            SampleRateRepr::Number(hz) => Self::from_hz(hz),
            SampleRateRepr::Text(s) => s.parse(),
        }
    }
}

/// Validated moving-average window size
///
/// Always at least one. Zero and negative values are rejected whether they
/// come from the command line, a TOML file, or code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i64")]
pub struct WindowSize(usize);

impl WindowSize {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(MotionError::InvalidConfiguration(
                "window size must be positive".into(),
            ));
        }
        Ok(Self(size))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(DEFAULT_WINDOW_SIZE)
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for WindowSize {
    type Error = MotionError;

    fn try_from(size: i64) -> Result<Self> {
        if size <= 0 {
            return Err(MotionError::InvalidConfiguration(format!(
                "window size must be positive, got {}",
                size
            )));
        }
        let size = usize::try_from(size).map_err(|_| {
            MotionError::InvalidConfiguration(format!("window size too large: {}", size))
        })?;
        Self::new(size)
    }
}

impl FromStr for WindowSize {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let size: i64 = s
            .trim()
            .parse()
            .map_err(|_| MotionError::InvalidConfiguration(format!("invalid window size: {}", s)))?;
        Self::try_from(size)
    }
}

/// How the processing stage transforms each sample
///
/// Parsed by `FromStr` everywhere (CLI, TOML, code), so the aliases
/// `moving_average` and `none` are accepted in every place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ProcessingMethod {
    /// Sliding-window moving average
    #[default]
    Smooth,
    /// Emit samples unchanged
    Passthrough,
}

impl FromStr for ProcessingMethod {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "smooth" | "moving_average" => Ok(Self::Smooth),
            "passthrough" | "none" => Ok(Self::Passthrough),
            _ => Err(MotionError::UnknownMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProcessingMethod {
    type Error = MotionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// System-wide pipeline configuration
///
/// # Example
/// ```
/// use motionkit::config::PipelineConfig;
///
/// let config = PipelineConfig::from_toml_str("[smoother]\nwindow_size = 8\n").unwrap();
/// assert_eq!(config.smoother.window_size.get(), 8);
/// assert_eq!(config.source.chunk_size, 32);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Processing stage configuration
    pub smoother: SmootherConfig,
    /// Sample source configuration
    pub source: SourceConfig,
    /// Output stage configuration
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmootherConfig {
    /// Number of samples averaged
    pub window_size: WindowSize,
    pub method: ProcessingMethod,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub sample_rate: SampleRate,
    /// Samples per chunk
    pub chunk_size: usize,
    /// Number of chunks produced by the synthetic source
    pub num_chunks: usize,
    /// Pace chunks at the sample rate instead of delivering them immediately
    pub realtime: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            num_chunks: DEFAULT_NUM_CHUNKS,
            realtime: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbose: bool,
}

impl PipelineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(s).map_err(|e| MotionError::Config(e.to_string()))?;
        // Surface a bad method name as UnknownMethod rather than a parse error
        if let Some(method) = table
            .get("smoother")
            .and_then(|smoother| smoother.get("method"))
            .and_then(|method| method.as_str())
        {
            method.parse::<ProcessingMethod>()?;
        }

        let config: Self = toml::from_str(s).map_err(|e| MotionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MotionError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.chunk_size == 0 {
            return Err(MotionError::InvalidConfiguration(
                "chunk size must be positive".into(),
            ));
        }
        Ok(())
    }
}
