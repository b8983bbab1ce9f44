mod csv;
mod json;
mod text;

use chrono::Utc;
use serde::Deserialize;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// One processed sample as emitted by the output stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOutput {
    /// Position of the sample in the stream, starting at zero
    pub index: u64,
    pub raw: f64,
    pub smoothed: f64,
    /// Samples currently contributing to `smoothed`
    pub window_len: usize,
}

pub trait Formatter: Send {
    fn format(&self, output: &SampleOutput) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SampleOutput {
        SampleOutput {
            index: 7,
            raw: 12.5,
            smoothed: 11.25,
            window_len: 2,
        }
    }

    #[test]
    fn test_text_format() {
        let line = TextFormatter::new(false).format(&sample());
        assert_eq!(line, "#7 raw: 12.500 smoothed: 11.250");

        let verbose = TextFormatter::new(true).format(&sample());
        assert!(verbose.ends_with("[window: 2]"));
    }

    #[test]
    fn test_csv_format() {
        let formatter = CsvFormatter;
        assert_eq!(
            formatter.header(),
            Some("ts,index,raw,smoothed,window_len")
        );
        let line = formatter.format(&sample());
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(&fields[1..], &["7", "12.500000", "11.250000", "2"]);
    }

    #[test]
    fn test_json_format() {
        let line = JsonFormatter.format(&sample());
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["index"], 7);
        assert_eq!(value["smoothed"], 11.25);
        assert_eq!(value["window_len"], 2);
        assert!(value["ts"].is_string());
    }

    #[test]
    fn test_json_non_finite_is_null() {
        let mut output = sample();
        output.smoothed = f64::NAN;
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format(&output)).unwrap();
        assert!(value["smoothed"].is_null());
        assert_eq!(value["raw"], 12.5);
    }
}
