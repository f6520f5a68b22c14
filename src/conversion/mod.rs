//! EDI to JSON conversion module
//!
//! This module contains the conversion options, the envelope model and the engine.

pub mod config;
pub mod document;
pub mod engine;

pub use config::ConversionOptions;
pub use document::{FunctionalGroup, Interchange, Transaction};
pub use engine::{EdiToJson, EdiTranscoder};

pub use crate::error::ConversionResult;
