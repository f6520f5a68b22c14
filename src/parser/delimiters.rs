//! Standard detection and delimiter discovery

use super::{Delimiters, Standard};
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult, ParseError};

/// Fixed length of the X12 interchange header, terminator included
pub const ISA_LENGTH: usize = 106;

const ISA_ELEMENT_POS: usize = 3;
const ISA_REPETITION_POS: usize = 82;
const ISA_LAST_ELEMENT_POS: usize = 103;
const ISA_COMPONENT_POS: usize = 104;
const ISA_SEGMENT_POS: usize = 105;

/// EDIFACT defaults when no UNA service string advice is present
pub const EDIFACT_DEFAULTS: Delimiters = Delimiters {
    element: '+',
    component: ':',
    segment: '\'',
    repetition: None,
    release: Some('?'),
};

/// Detect the standard of `text` and its delimiters.
///
/// Returns the remaining text that holds the segment stream. For X12 this
/// is the whole input (ISA is an ordinary segment once the delimiters are
/// known); for EDIFACT the UNA advice is consumed.
pub fn detect(text: &str) -> ConversionResult<(Standard, Delimiters, &str)> {
    if text.starts_with("ISA") {
        let delimiters = x12_delimiters(text)?;
        Ok((Standard::X12, delimiters, text))
    } else if let Some(rest) = text.strip_prefix("UNA") {
        let (delimiters, body) = una_delimiters(rest)?;
        Ok((Standard::Edifact, delimiters, body))
    } else if text.starts_with("UNB") {
        Ok((Standard::Edifact, EDIFACT_DEFAULTS, text))
    } else {
        let found: String = text.chars().take(3).collect();
        Err(ConversionError::conversion(
            ConversionErrorKind::unsupported_standard(found),
        ))
    }
}

fn x12_delimiters(text: &str) -> ConversionResult<Delimiters> {
    let header: Vec<char> = text.chars().take(ISA_LENGTH).collect();
    if header.len() < ISA_LENGTH {
        return Err(ParseError::new(
            format!(
                "ISA segment is truncated: expected {} characters, found {}",
                ISA_LENGTH,
                header.len()
            ),
            Some(1),
        )
        .with_tag("ISA")
        .into());
    }

    let element = header[ISA_ELEMENT_POS];
    if header[ISA_LAST_ELEMENT_POS] != element {
        return Err(ParseError::new(
            "ISA segment is not fixed-length; cannot locate delimiters".to_string(),
            Some(1),
        )
        .with_tag("ISA")
        .into());
    }

    // ISA11 only carries a repetition separator from version 00402 on;
    // earlier versions put the standards identifier 'U' there.
    let candidate = header[ISA_REPETITION_POS];
    let repetition = if candidate.is_alphanumeric() || candidate == element || candidate == ' ' {
        None
    } else {
        Some(candidate)
    };

    Ok(Delimiters {
        element,
        component: header[ISA_COMPONENT_POS],
        segment: header[ISA_SEGMENT_POS],
        repetition,
        release: None,
    })
}

fn una_delimiters(rest: &str) -> ConversionResult<(Delimiters, &str)> {
    let advice: Vec<char> = rest.chars().take(6).collect();
    if advice.len() < 6 {
        return Err(ParseError::new(
            "UNA service string advice must carry six characters".to_string(),
            None,
        )
        .with_tag("UNA")
        .into());
    }

    let optional = |c: char| if c == ' ' { None } else { Some(c) };
    let delimiters = Delimiters {
        component: advice[0],
        element: advice[1],
        release: optional(advice[3]),
        repetition: optional(advice[4]),
        segment: advice[5],
    };

    let consumed: usize = advice.iter().map(|c| c.len_utf8()).sum();
    Ok((delimiters, rest[consumed..].trim_start()))
}
