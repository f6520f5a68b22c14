//! Segment, element and component splitting with release-character handling

use super::{Delimiters, Element, Segment};

/// Split on `separator`, leaving released characters (and the release
/// character itself) in place so that deeper levels can still see them.
pub fn split_raw(input: &str, separator: char, release: Option<char>) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if Some(c) == release {
            escaped = true;
            continue;
        }
        if c == separator {
            parts.push(&input[start..index]);
            start = index + c.len_utf8();
        }
    }
    parts.push(&input[start..]);

    parts
}

/// Remove release characters, keeping the character each one protects
pub fn unescape(input: &str, release: Option<char>) -> String {
    let release = match release {
        Some(r) if input.contains(r) => r,
        _ => return input.to_string(),
    };

    let mut output = String::with_capacity(input.len());
    let mut escaped = false;
    for c in input.chars() {
        if !escaped && c == release {
            escaped = true;
            continue;
        }
        escaped = false;
        output.push(c);
    }
    output
}

/// Break a segment stream into tagged segments
pub fn tokenize(body: &str, delimiters: &Delimiters) -> Vec<Segment> {
    let mut segments = Vec::new();

    for raw in split_raw(body, delimiters.segment, delimiters.release) {
        let raw = raw.trim_matches(|c: char| is_line_break(c) && c != delimiters.element);
        if raw.trim().is_empty() {
            continue;
        }

        let mut fields = split_raw(raw, delimiters.element, delimiters.release).into_iter();
        let tag = fields
            .next()
            .map(|field| unescape(field.trim(), delimiters.release))
            .unwrap_or_default();

        // ISA carries the delimiters themselves as data, so it is never sub-split
        let elements = if tag == "ISA" {
            fields
                .map(|field| Element::Simple(field.to_string()))
                .collect()
        } else {
            fields.map(|field| parse_element(field, delimiters)).collect()
        };

        segments.push(Segment {
            tag,
            elements,
            position: segments.len() + 1,
        });
    }

    segments
}

fn parse_element(raw: &str, delimiters: &Delimiters) -> Element {
    if let Some(repetition) = delimiters.repetition {
        let repeats = split_raw(raw, repetition, delimiters.release);
        if repeats.len() > 1 {
            return Element::Repeated(
                repeats
                    .into_iter()
                    .map(|repeat| parse_components(repeat, delimiters))
                    .collect(),
            );
        }
    }
    parse_components(raw, delimiters)
}

fn parse_components(raw: &str, delimiters: &Delimiters) -> Element {
    let components = split_raw(raw, delimiters.component, delimiters.release);
    if components.len() > 1 {
        Element::Composite(
            components
                .into_iter()
                .map(|component| unescape(component, delimiters.release))
                .collect(),
        )
    } else {
        Element::Simple(unescape(raw, delimiters.release))
    }
}

fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}
