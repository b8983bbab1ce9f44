use super::{Formatter, SampleOutput};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &SampleOutput) -> String {
        if self.verbose {
            format!(
                "#{} raw: {:.3} smoothed: {:.3} delta: {:+.3} [window: {}]",
                output.index,
                output.raw,
                output.smoothed,
                output.smoothed - output.raw,
                output.window_len
            )
        } else {
            format!(
                "#{} raw: {:.3} smoothed: {:.3}",
                output.index, output.raw, output.smoothed
            )
        }
    }
}
