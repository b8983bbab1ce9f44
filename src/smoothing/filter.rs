/// Common trait for per-sample smoothing filters
///
/// Implemented by SlidingWindowAverager and Passthrough.
pub trait Filter: Send {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f64) -> f64;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear any retained state
    fn reset(&mut self);

    fn name(&self) -> &str;
}

/// Filter that returns every sample unchanged
pub struct Passthrough;

impl Filter for Passthrough {
    fn process(&mut self, sample: f64) -> f64 {
        sample
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "passthrough"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::SlidingWindowAverager;

    #[test]
    fn test_passthrough() {
        let mut filter = Passthrough;
        let mut buf = [1.0, -2.5, 3.0];
        filter.process_buffer(&mut buf);
        assert_eq!(buf, [1.0, -2.5, 3.0]);
    }

    #[test]
    fn test_process_buffer_smooths_in_place() {
        let mut filter = SlidingWindowAverager::new(2).unwrap();
        let mut buf = [2.0, 4.0, 6.0];
        filter.process_buffer(&mut buf);
        assert_eq!(buf, [2.0, 3.0, 5.0]);
    }
}
