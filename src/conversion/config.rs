//! Configuration options for EDI to JSON conversion

use std::fmt;

/// Conversion options, fixed once handed to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Omit segment-level detail
    summarize: bool,
    /// Include descriptive annotations
    annotate: bool,
    /// Pretty-print output (vs compact)
    format: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            summarize: false,
            annotate: false,
            format: true,
        }
    }
}

impl ConversionOptions {
    /// Create a new set of options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summarize(&self) -> bool {
        self.summarize
    }

    pub fn annotate(&self) -> bool {
        self.annotate
    }

    pub fn format(&self) -> bool {
        self.format
    }

    /// Enable/disable segment-level detail suppression
    pub fn with_summarize(mut self, summarize: bool) -> Self {
        self.summarize = summarize;
        self
    }

    /// Enable/disable descriptive annotations
    pub fn with_annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Enable/disable pretty printing
    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }
}

impl fmt::Display for ConversionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        write!(
            f,
            "summarize={} annotate={} format={}",
            yes_no(self.summarize),
            yes_no(self.annotate),
            yes_no(self.format)
        )
    }
}
