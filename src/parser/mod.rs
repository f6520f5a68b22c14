//! EDI input parsing module
//!
//! Turns raw input bytes into a flat list of tagged segments. Envelope
//! structure (interchanges, groups, transactions) is assembled later by
//! [`crate::conversion::document`].

pub mod delimiters;
pub mod tokenizer;

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use serde::Serialize;
use std::io::Read;

/// Supported EDI standards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Standard {
    /// ANSI ASC X12
    X12,
    /// UN/EDIFACT
    #[serde(rename = "EDIFACT")]
    Edifact,
}

impl Standard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Standard::X12 => "X12",
            Standard::Edifact => "EDIFACT",
        }
    }
}

/// Delimiters in effect for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub element: char,
    pub component: char,
    pub segment: char,
    pub repetition: Option<char>,
    pub release: Option<char>,
}

/// A single data element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Simple(String),
    Composite(Vec<String>),
    Repeated(Vec<Element>),
}

impl Element {
    /// First component of the element (the whole value for simple elements)
    pub fn first_component(&self) -> &str {
        self.component(0).unwrap_or("")
    }

    /// Component at `index`; repeated elements answer from their first occurrence
    pub fn component(&self, index: usize) -> Option<&str> {
        match self {
            Element::Simple(value) if index == 0 => Some(value.as_str()),
            Element::Simple(_) => None,
            Element::Composite(parts) => parts.get(index).map(String::as_str),
            Element::Repeated(repeats) => repeats.first().and_then(|e| e.component(index)),
        }
    }
}

/// A tagged segment with its ordinal position in the input
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub tag: String,
    pub elements: Vec<Element>,
    pub position: usize,
}

impl Segment {
    /// Element by its 1-based reference number (`BEG03` is `element(3)`)
    pub fn element(&self, number: usize) -> Option<&Element> {
        number.checked_sub(1).and_then(|i| self.elements.get(i))
    }

    /// Trimmed first component of element `number`, empty when absent
    pub fn value(&self, number: usize) -> &str {
        self.element(number)
            .map(|e| e.first_component().trim())
            .unwrap_or("")
    }

    /// Trimmed component `index` of element `number`, empty when absent
    pub fn component(&self, number: usize, index: usize) -> &str {
        self.element(number)
            .and_then(|e| e.component(index))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Result of tokenizing one input
#[derive(Debug, Clone)]
pub struct ParsedEdi {
    pub standard: Standard,
    pub delimiters: Delimiters,
    pub segments: Vec<Segment>,
}

/// Read an input stream to the end and decode it
pub fn read_input(input: &mut dyn Read) -> ConversionResult<String> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    Ok(decode_input(bytes))
}

/// Decode input bytes as UTF-8, falling back to ISO-8859-1
pub fn decode_input(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Detect the standard and tokenize the whole input
pub fn parse_edi(text: &str) -> ConversionResult<ParsedEdi> {
    let text = text.trim_start_matches('\u{feff}').trim_start();
    if text.trim().is_empty() {
        return Err(ConversionError::conversion(ConversionErrorKind::EmptyInput));
    }

    let (standard, delimiters, body) = delimiters::detect(text)?;
    let segments = tokenizer::tokenize(body, &delimiters);

    Ok(ParsedEdi {
        standard,
        delimiters,
        segments,
    })
}
