use serde_json::json;

use super::{Formatter, SampleOutput, iso8601_timestamp};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, output: &SampleOutput) -> String {
        // Non-finite floats become null
        json!({
            "ts": iso8601_timestamp(),
            "index": output.index,
            "raw": output.raw,
            "smoothed": output.smoothed,
            "window_len": output.window_len,
        })
        .to_string()
    }
}
