//! EDI to JSON Converter
//!
//! A Rust CLI tool that converts a single EDI document (ANSI X12 or
//! UN/EDIFACT) into a JSON representation.

pub mod cli;
pub mod conversion;
pub mod driver;
pub mod error;
pub mod formatter;
pub mod parser;

// Re-export commonly used types
pub use conversion::{ConversionOptions, EdiToJson, EdiTranscoder};
pub use driver::{Driver, DriverState, FilePaths};
pub use error::{ConversionError, ConversionErrorKind, DriverError, ParseError};

/// Convert EDI text to JSON with default options
pub fn convert_edi(edi: &str) -> Result<String, ConversionError> {
    convert_edi_with_options(edi, &ConversionOptions::default())
}

/// Convert EDI text to JSON with custom options
pub fn convert_edi_with_options(
    edi: &str,
    options: &ConversionOptions,
) -> Result<String, ConversionError> {
    EdiToJson::from_options(options).convert_str(edi)
}
