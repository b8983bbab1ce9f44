//! Streaming pipeline: source, processing stage, output stage.
//!
//! Each stage is a separate value so it can be exercised on its own. The
//! pipeline only moves buffers between them and logs what happens.

use std::io::Write;

use anyhow::Context;
use rolling_stats::Stats;
use serde::Serialize;

use crate::config::{PipelineConfig, ProcessingMethod, WindowSize};
use crate::output::{Formatter, SampleOutput, create_formatter};
use crate::sensor::SampleSource;
use crate::smoothing::{Filter, Passthrough, SlidingWindowAverager};

/// Processing stage
///
/// Applies the configured method sample by sample. Filter state carries over
/// from one buffer to the next, so chunk boundaries do not affect the result.
pub struct Processor {
    method: ProcessingMethod,
    filter: Box<dyn Filter>,
    window_capacity: usize,
    samples_seen: u64,
}

impl Processor {
    pub fn new(method: ProcessingMethod, window_size: WindowSize) -> Self {
        let (filter, window_capacity): (Box<dyn Filter>, usize) = match method {
            ProcessingMethod::Smooth => (
                Box::new(SlidingWindowAverager::with_size(window_size)),
                window_size.get(),
            ),
            ProcessingMethod::Passthrough => (Box::new(Passthrough), 1),
        };
        Self {
            method,
            filter,
            window_capacity,
            samples_seen: 0,
        }
    }

    pub fn method(&self) -> ProcessingMethod {
        self.method
    }

    pub fn process(&mut self, chunk: &[f64]) -> Vec<SampleOutput> {
        log::trace!(
            "[processor] {} samples through {}",
            chunk.len(),
            self.filter.name()
        );
        chunk
            .iter()
            .map(|&raw| {
                let smoothed = self.filter.process(raw);
                let index = self.samples_seen;
                self.samples_seen += 1;
                SampleOutput {
                    index,
                    raw,
                    smoothed,
                    window_len: (self.samples_seen as usize).min(self.window_capacity),
                }
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.samples_seen = 0;
    }
}

/// Metadata kept for every chunk the output stage has written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRecord {
    pub first_index: u64,
    pub len: usize,
}

/// Output stage
///
/// Writes one formatted line per sample and keeps a record of every chunk
/// it was handed, empty ones included.
pub struct OutputStage {
    formatter: Box<dyn Formatter>,
    writer: Box<dyn Write + Send>,
    header_written: bool,
    next_index: u64,
    logged: Vec<ChunkRecord>,
}

impl OutputStage {
    pub fn new(formatter: Box<dyn Formatter>, writer: Box<dyn Write + Send>) -> Self {
        Self {
            formatter,
            writer,
            header_written: false,
            next_index: 0,
            logged: Vec::new(),
        }
    }

    /// Output stage that only records metadata
    pub fn discard() -> Self {
        Self::new(
            create_formatter(Default::default(), false),
            Box::new(std::io::sink()),
        )
    }

    pub fn output(&mut self, samples: &[SampleOutput]) -> anyhow::Result<()> {
        if !self.header_written {
            if let Some(header) = self.formatter.header() {
                writeln!(self.writer, "{}", header).context("Failed to write header")?;
            }
            self.header_written = true;
        }

        for sample in samples {
            writeln!(self.writer, "{}", self.formatter.format(sample))
                .with_context(|| format!("Failed to write sample {}", sample.index))?;
        }
        self.writer.flush().context("Failed to flush output")?;

        let first_index = samples.first().map_or(self.next_index, |s| s.index);
        self.next_index = first_index + samples.len() as u64;
        self.logged.push(ChunkRecord {
            first_index,
            len: samples.len(),
        });
        Ok(())
    }

    pub fn logged(&self) -> &[ChunkRecord] {
        &self.logged
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

/// What a completed run saw
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub chunks: usize,
    pub samples: usize,
    pub raw: Option<StatsSummary>,
    pub smoothed: Option<StatsSummary>,
}

pub struct Pipeline {
    source: Box<dyn SampleSource>,
    processor: Processor,
    output: OutputStage,
}

impl Pipeline {
    pub fn new(source: Box<dyn SampleSource>, processor: Processor, output: OutputStage) -> Self {
        Self {
            source,
            processor,
            output,
        }
    }

    /// Build the processing and output stages from configuration
    pub fn from_config(
        config: &PipelineConfig,
        source: Box<dyn SampleSource>,
        writer: Box<dyn Write + Send>,
    ) -> Self {
        let processor = Processor::new(config.smoother.method, config.smoother.window_size);
        let formatter = create_formatter(config.output.format, config.output.verbose);
        Self::new(source, processor, OutputStage::new(formatter, writer))
    }

    /// Fetch, process and output chunks until the source is exhausted
    pub fn run(&mut self) -> anyhow::Result<RunSummary> {
        log::info!(
            "[pipeline] Starting ({:?} at {:.1} Hz)",
            self.processor.method(),
            self.source.sample_rate()
        );

        let mut raw_stats: Stats<f64> = Stats::new();
        let mut smoothed_stats: Stats<f64> = Stats::new();
        let mut chunks = 0;
        let mut samples = 0;

        loop {
            let chunk = self
                .source
                .next_buffer()
                .inspect_err(|e| log::error!("[source] Failed to read chunk: {:#}", e))?;
            let Some(chunk) = chunk else {
                log::debug!("[source] No more chunks");
                break;
            };
            log::debug!("[source] Chunk {} with {} samples", chunks, chunk.len());

            let processed = self.processor.process(&chunk);
            for sample in &processed {
                raw_stats.update(sample.raw);
                smoothed_stats.update(sample.smoothed);
            }

            self.output
                .output(&processed)
                .inspect_err(|e| log::error!("[output] Failed to write chunk {}: {:#}", chunks, e))?;

            chunks += 1;
            samples += processed.len();
        }

        log::info!("[pipeline] Finished: {} chunks, {} samples", chunks, samples);

        Ok(RunSummary {
            chunks,
            samples,
            raw: StatsSummary::from_stats(&raw_stats),
            smoothed: StatsSummary::from_stats(&smoothed_stats),
        })
    }

    pub fn output(&self) -> &OutputStage {
        &self.output
    }
}
