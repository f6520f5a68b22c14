//! Core conversion engine for EDI to JSON transformation

use crate::conversion::config::ConversionOptions;
use crate::conversion::document::assemble;
use crate::conversion::ConversionResult;
use crate::formatter::{write_json, JsonRenderer};
use crate::parser::{parse_edi, read_input};
use std::io::{Read, Write};
use std::time::Instant;

/// A single-call EDI to JSON transcoder
pub trait EdiTranscoder {
    /// Read the whole of `input` and write complete JSON to `output`
    fn as_json(&self, input: &mut dyn Read, output: &mut dyn Write) -> ConversionResult<()>;
}

/// Built-in engine for X12 and EDIFACT
#[derive(Debug, Clone)]
pub struct EdiToJson {
    formatting: bool,
    annotated: bool,
    summarized: bool,
}

impl Default for EdiToJson {
    fn default() -> Self {
        Self::from_options(&ConversionOptions::default())
    }
}

impl EdiToJson {
    /// Create a new engine with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine configured from conversion options
    pub fn from_options(options: &ConversionOptions) -> Self {
        Self {
            formatting: options.format(),
            annotated: options.annotate(),
            summarized: options.summarize(),
        }
    }

    pub fn set_formatting(&mut self, formatting: bool) {
        self.formatting = formatting;
    }

    pub fn set_annotated(&mut self, annotated: bool) {
        self.annotated = annotated;
    }

    pub fn set_summarized(&mut self, summarized: bool) {
        self.summarized = summarized;
    }

    pub fn is_formatting(&self) -> bool {
        self.formatting
    }

    pub fn is_annotated(&self) -> bool {
        self.annotated
    }

    pub fn is_summarized(&self) -> bool {
        self.summarized
    }

    /// Convert EDI text to a JSON string
    pub fn convert_str(&self, edi: &str) -> ConversionResult<String> {
        let mut output = Vec::new();
        self.as_json(&mut edi.as_bytes(), &mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

impl EdiTranscoder for EdiToJson {
    fn as_json(&self, input: &mut dyn Read, output: &mut dyn Write) -> ConversionResult<()> {
        let start_time = Instant::now();

        let text = read_input(input)?;
        let parsed = parse_edi(&text)?;
        let standard = parsed.standard;
        let segment_count = parsed.segments.len();

        let interchanges = assemble(parsed)?;
        let document =
            JsonRenderer::new(self.annotated, self.summarized).render(&interchanges)?;
        write_json(&document, output, self.formatting)?;

        tracing::debug!(
            standard = standard.as_str(),
            segments = segment_count,
            input_bytes = text.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "converted EDI to JSON"
        );
        Ok(())
    }
}
