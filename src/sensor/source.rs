use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use crossbeam_channel::Receiver;
use hound::WavReader;

use super::SensorCapture;
use crate::config::{SampleRate, SourceConfig};
use crate::constants::CAPTURE_CHANNEL_CAPACITY;
use crate::error::{MotionError, Result};

/// A producer of sample buffers
///
/// `next_buffer` returns `Ok(None)` once the stream is exhausted; after that
/// it keeps returning `Ok(None)`.
pub trait SampleSource: Send {
    fn next_buffer(&mut self) -> anyhow::Result<Option<Vec<f64>>>;

    /// Sample rate in Hz
    fn sample_rate(&self) -> f64;
}

/// Level of the synthetic signal between spikes
pub const SYNTHETIC_BASELINE: f64 = 128.0;
/// Level of the single spike in each synthetic chunk
pub const SYNTHETIC_SPIKE: f64 = 255.0;
/// How far the spike moves between consecutive chunks
const SPIKE_STEP: usize = 5;

/// Simulated sensor stream
///
/// Produces exactly `num_chunks` buffers of `chunk_size` samples, then ends.
/// `chunk_size` must be positive.
/// Each buffer sits at a constant baseline with one spike whose position
/// advances by a few samples from one chunk to the next, so the output is
/// fully deterministic.
pub struct SyntheticSource {
    num_chunks: usize,
    chunk_size: usize,
    chunks_generated: usize,
    sample_rate: f64,
}

impl SyntheticSource {
    pub fn new(num_chunks: usize, chunk_size: usize, sample_rate: SampleRate) -> Result<Self> {
        if chunk_size == 0 {
            return Err(MotionError::InvalidConfiguration(
                "chunk size must be positive".into(),
            ));
        }
        Ok(Self {
            num_chunks,
            chunk_size,
            chunks_generated: 0,
            sample_rate: sample_rate.as_hz(),
        })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::new(config.num_chunks, config.chunk_size, config.sample_rate)
    }

    pub fn chunks_generated(&self) -> usize {
        self.chunks_generated
    }
}

impl SampleSource for SyntheticSource {
    fn next_buffer(&mut self) -> anyhow::Result<Option<Vec<f64>>> {
        if self.chunks_generated >= self.num_chunks {
            return Ok(None);
        }
        self.chunks_generated += 1;

        let mut chunk = vec![SYNTHETIC_BASELINE; self.chunk_size];
        let spike = (self.chunks_generated * SPIKE_STEP) % self.chunk_size;
        chunk[spike] = SYNTHETIC_SPIKE;
        Ok(Some(chunk))
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

/// Recorded sensor stream stored as a WAV file
///
/// Only the first channel is used. Integer formats are normalized to
/// `[-1, 1)`.
pub struct WavFileSource {
    samples: Vec<f64>,
    position: usize,
    chunk_size: usize,
    sample_rate: f64,
}

impl WavFileSource {
    pub fn new<P: AsRef<Path>>(path: P, chunk_size: usize) -> anyhow::Result<Self> {
        if chunk_size == 0 {
            anyhow::bail!("Chunk size must be positive");
        }
        let path = path.as_ref();
        let reader = WavReader::open(path)
            .with_context(|| format!("Failed to open WAV file {}", path.display()))?;
        let spec = reader.spec();

        let sample_rate = spec.sample_rate as f64;
        let samples = Self::read_first_channel(reader, &spec)?;
        log::info!(
            "Loaded {} samples at {} Hz from {}",
            samples.len(),
            spec.sample_rate,
            path.display()
        );

        Ok(Self {
            samples,
            position: 0,
            chunk_size,
            sample_rate,
        })
    }

    fn read_first_channel(
        mut reader: WavReader<BufReader<File>>,
        spec: &hound::WavSpec,
    ) -> anyhow::Result<Vec<f64>> {
        let channels = spec.channels.max(1) as usize;
        let interleaved: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / max_val))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(interleaved.into_iter().step_by(channels).collect())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleSource for WavFileSource {
    fn next_buffer(&mut self) -> anyhow::Result<Option<Vec<f64>>> {
        if self.position >= self.samples.len() {
            return Ok(None);
        }

        let end = (self.position + self.chunk_size).min(self.samples.len());
        let chunk = self.samples[self.position..end].to_vec();
        self.position = end;

        Ok(Some(chunk))
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

/// Source fed by a background capture thread
///
/// Wraps another source, runs it on its own thread and receives its buffers
/// over a bounded channel. Errors raised by the inner source are delivered in
/// order and end the stream.
pub struct ChannelSource {
    rx: Receiver<anyhow::Result<Vec<f64>>>,
    sample_rate: f64,
    // Dropped after `rx`, so a producer blocked on a full channel sees the
    // disconnect before the capture joins it.
    _capture: SensorCapture,
}

impl ChannelSource {
    pub fn spawn(source: Box<dyn SampleSource>, realtime: bool) -> anyhow::Result<Self> {
        let (tx, rx) = crossbeam_channel::bounded(CAPTURE_CHANNEL_CAPACITY);
        let sample_rate = source.sample_rate();
        let capture = SensorCapture::spawn(source, tx, realtime)?;
        Ok(Self {
            rx,
            sample_rate,
            _capture: capture,
        })
    }
}

impl SampleSource for ChannelSource {
    fn next_buffer(&mut self) -> anyhow::Result<Option<Vec<f64>>> {
        match self.rx.recv() {
            Ok(Ok(data)) => Ok(Some(data)),
            Ok(Err(e)) => Err(e.context("Capture thread failed")),
            Err(_) => Ok(None),
        }
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_source_stops_after_num_chunks() {
        let mut source = SyntheticSource::new(3, 16, SampleRate::default()).unwrap();
        let chunks: Vec<_> = (0..5)
            .map(|_| source.next_buffer().unwrap())
            .collect();

        let valid: Vec<_> = chunks.into_iter().flatten().collect();
        assert_eq!(valid.len(), 3);
        assert!(valid.iter().all(|c| c.len() == 16));
        assert_eq!(source.chunks_generated(), 3);
    }

    #[test]
    fn test_synthetic_source_rejects_zero_chunk_size() {
        let err = SyntheticSource::new(3, 0, SampleRate::default()).err().unwrap();
        assert!(matches!(err, MotionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_synthetic_spike_moves() {
        let mut source = SyntheticSource::new(2, 16, SampleRate::default()).unwrap();
        let first = source.next_buffer().unwrap().unwrap();
        let second = source.next_buffer().unwrap().unwrap();

        let spike_at = |c: &[f64]| c.iter().position(|&v| v == SYNTHETIC_SPIKE);
        assert_eq!(spike_at(&first), Some(5));
        assert_eq!(spike_at(&second), Some(10));
        assert_eq!(first.iter().filter(|&&v| v == SYNTHETIC_BASELINE).count(), 15);
    }

    #[test]
    fn test_channel_source_forwards_all_chunks() {
        let inner = SyntheticSource::new(4, 8, SampleRate::default()).unwrap();
        let mut source = ChannelSource::spawn(Box::new(inner), false).unwrap();

        let mut count = 0;
        while let Some(chunk) = source.next_buffer().unwrap() {
            assert_eq!(chunk.len(), 8);
            count += 1;
        }
        assert_eq!(count, 4);
        assert!((source.sample_rate() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_channel_source_drop_before_exhaustion() {
        let inner = SyntheticSource::new(1000, 4, SampleRate::default()).unwrap();
        let mut source = ChannelSource::spawn(Box::new(inner), false).unwrap();
        assert!(source.next_buffer().unwrap().is_some());
        drop(source);
    }

    /// Yields a few good buffers, then fails on every later call
    struct FailingSource {
        good_chunks: usize,
        produced: usize,
    }

    impl SampleSource for FailingSource {
        fn next_buffer(&mut self) -> anyhow::Result<Option<Vec<f64>>> {
            if self.produced >= self.good_chunks {
                anyhow::bail!("sensor disconnected");
            }
            self.produced += 1;
            Ok(Some(vec![self.produced as f64; 4]))
        }

        fn sample_rate(&self) -> f64 {
            100.0
        }
    }

    #[test]
    fn test_channel_source_delivers_inner_failure_then_ends() {
        let inner = FailingSource {
            good_chunks: 2,
            produced: 0,
        };
        let mut source = ChannelSource::spawn(Box::new(inner), false).unwrap();

        assert_eq!(source.next_buffer().unwrap(), Some(vec![1.0; 4]));
        assert_eq!(source.next_buffer().unwrap(), Some(vec![2.0; 4]));

        let err = source.next_buffer().unwrap_err();
        assert!(format!("{:#}", err).contains("sensor disconnected"));

        assert!(source.next_buffer().unwrap().is_none());
        assert!(source.next_buffer().unwrap().is_none());
    }

    #[test]
    fn test_channel_source_realtime_pacing() {
        let rate = SampleRate::from_hz(10_000.0).unwrap();
        let inner = SyntheticSource::new(3, 4, rate).unwrap();
        let mut source = ChannelSource::spawn(Box::new(inner), true).unwrap();

        let start = std::time::Instant::now();
        let mut chunks = Vec::new();
        while let Some(chunk) = source.next_buffer().unwrap() {
            chunks.push(chunk);
        }

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 4));
        // Two pauses of 4 samples at 10 kHz happen before the last chunk is sent
        assert!(start.elapsed() >= std::time::Duration::from_micros(800));
    }
}
