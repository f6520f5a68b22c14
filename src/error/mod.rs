//! Error types and handling infrastructure for EDI to JSON conversion

use std::fmt;
use std::path::PathBuf;

/// Core error kinds raised by the conversion engine
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("EDI input is empty")]
    EmptyInput,

    #[error("Unsupported EDI standard: input begins with '{found}'")]
    UnsupportedStandard { found: String },

    #[error("JSON serialization error: {message}")]
    Serialization { message: String },
}

impl ConversionErrorKind {
    pub fn unsupported_standard(found: String) -> Self {
        Self::UnsupportedStandard { found }
    }

    pub fn serialization(message: String) -> Self {
        Self::Serialization { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("{kind}")]
    Conversion { kind: ConversionErrorKind },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Self::Io(err.into());
        }
        Self::conversion(ConversionErrorKind::serialization(err.to_string()))
    }
}

/// EDI structure errors, located by segment ordinal when known
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub segment: Option<usize>,
    pub tag: Option<String>,
}

impl ParseError {
    pub fn new(message: String, segment: Option<usize>) -> Self {
        Self {
            message,
            segment,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(position) = self.segment {
            write!(f, " at segment {}", position)?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " ({})", tag)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Failures surfaced by the command-line driver
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Invalid command line arguments")]
    InvalidArguments,

    #[error("Cannot find or read EDI input file: {}", .path.display())]
    InputNotReadable { path: PathBuf },

    #[error("Cannot write to JSON output file: {}", .path.display())]
    OutputNotWritable { path: PathBuf },

    #[error("Conversion failed")]
    ConversionFailure {
        #[source]
        source: ConversionError,
    },
}

impl DriverError {
    pub fn input_not_readable(path: PathBuf) -> Self {
        Self::InputNotReadable { path }
    }

    pub fn output_not_writable(path: PathBuf) -> Self {
        Self::OutputNotWritable { path }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArguments => 2,
            Self::InputNotReadable { .. }
            | Self::OutputNotWritable { .. }
            | Self::ConversionFailure { .. } => 1,
        }
    }
}

impl From<ConversionError> for DriverError {
    fn from(source: ConversionError) -> Self {
        Self::ConversionFailure { source }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;
