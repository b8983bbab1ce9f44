use super::{Formatter, SampleOutput, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, output: &SampleOutput) -> String {
        format!(
            "{},{},{:.6},{:.6},{}",
            iso8601_timestamp(),
            output.index,
            output.raw,
            output.smoothed,
            output.window_len
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,index,raw,smoothed,window_len")
    }
}
