use std::collections::VecDeque;

use super::Filter;
use crate::config::WindowSize;
use crate::error::{MotionError, Result};

/// Sliding-window moving average
///
/// Keeps the most recent `capacity` samples in insertion order and reports
/// their arithmetic mean. Once the window is full, each update evicts the
/// oldest sample before appending the new one.
///
/// The mean is recomputed from the window on every query, so no rounding
/// error accumulates over long streams.
///
/// Non-finite samples are not rejected: a NaN in the window makes the
/// average NaN until it has been evicted.
#[derive(Debug, Clone)]
pub struct SlidingWindowAverager {
    capacity: usize,
    samples: VecDeque<f64>,
}

impl SlidingWindowAverager {
    /// Create an empty window holding at most `capacity` samples
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MotionError::InvalidConfiguration(
                "window capacity must be positive".into(),
            ));
        }
        Ok(Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        })
    }

    /// Create a window from an already validated size
    pub fn with_size(size: WindowSize) -> Self {
        Self {
            capacity: size.get(),
            samples: VecDeque::with_capacity(size.get()),
        }
    }

    /// Append a sample, evicting the oldest one when the window is full
    pub fn update(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Mean of the retained samples, or exactly `0.0` when empty
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Retained samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Drop all samples; capacity is unchanged
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

impl Filter for SlidingWindowAverager {
    fn process(&mut self, sample: f64) -> f64 {
        self.update(sample);
        self.average()
    }

    fn reset(&mut self) {
        SlidingWindowAverager::reset(self);
    }

    fn name(&self) -> &str {
        "moving_average"
    }
}
