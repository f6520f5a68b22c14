//! JSON formatting module
//!
//! Renders assembled envelopes into a `serde_json::Value` and writes it
//! either pretty-printed or compact.

pub mod annotations;

use crate::conversion::document::{FunctionalGroup, Interchange, Transaction};
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::{Delimiters, Element, Segment, Standard};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Map, Value};
use std::io::Write;

/// Indentation used for formatted output
pub const INDENT: &[u8] = b"  ";

/// Renders envelopes into JSON values
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    annotate: bool,
    summarize: bool,
}

impl JsonRenderer {
    pub fn new(annotate: bool, summarize: bool) -> Self {
        Self {
            annotate,
            summarize,
        }
    }

    /// Render a whole document
    pub fn render(&self, interchanges: &[Interchange]) -> ConversionResult<Value> {
        let rendered = interchanges
            .iter()
            .map(|interchange| self.render_interchange(interchange))
            .collect::<ConversionResult<Vec<_>>>()?;

        Ok(json!({ "interchanges": rendered }))
    }

    fn render_interchange(&self, interchange: &Interchange) -> ConversionResult<Value> {
        let mut object = to_object(&interchange.fields())?;
        object.insert(
            "delimiters".to_string(),
            render_delimiters(&interchange.delimiters),
        );

        let groups = interchange
            .groups
            .iter()
            .map(|group| self.render_group(group))
            .collect::<ConversionResult<Vec<_>>>()?;
        object.insert("functionalGroups".to_string(), Value::Array(groups));

        if !interchange.transactions.is_empty() {
            let transactions = interchange
                .transactions
                .iter()
                .map(|transaction| self.render_transaction(transaction))
                .collect::<ConversionResult<Vec<_>>>()?;
            object.insert("transactions".to_string(), Value::Array(transactions));
        }

        Ok(Value::Object(object))
    }

    fn render_group(&self, group: &FunctionalGroup) -> ConversionResult<Value> {
        let mut object = to_object(&group.fields())?;
        if self.annotate {
            if let Some(name) = annotations::group_name(group.standard, group.code()) {
                object.insert("annotation".to_string(), Value::from(name));
            }
        }

        let transactions = group
            .transactions
            .iter()
            .map(|transaction| self.render_transaction(transaction))
            .collect::<ConversionResult<Vec<_>>>()?;
        object.insert("transactions".to_string(), Value::Array(transactions));

        Ok(Value::Object(object))
    }

    fn render_transaction(&self, transaction: &Transaction) -> ConversionResult<Value> {
        let mut object = to_object(&transaction.fields())?;
        if self.annotate {
            let code = transaction.transaction_type();
            if let Some(name) = annotations::transaction_name(transaction.standard, code) {
                object.insert("annotation".to_string(), Value::from(name));
            }
        }
        object.insert(
            "segmentCount".to_string(),
            Value::from(transaction.segment_count()),
        );

        if !self.summarize {
            let segments = transaction
                .segments
                .iter()
                .map(|segment| self.render_segment(transaction.standard, segment))
                .collect();
            object.insert("segments".to_string(), Value::Array(segments));
        }

        Ok(Value::Object(object))
    }

    fn render_segment(&self, standard: Standard, segment: &Segment) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::from(segment.tag.as_str()));
        if self.annotate {
            if let Some(name) = annotations::segment_name(standard, &segment.tag) {
                object.insert("annotation".to_string(), Value::from(name));
            }
        }
        object.insert(
            "elements".to_string(),
            segment.elements.iter().map(render_element).collect(),
        );
        Value::Object(object)
    }
}

fn render_element(element: &Element) -> Value {
    match element {
        Element::Simple(value) => Value::from(value.as_str()),
        Element::Composite(components) => components.iter().map(String::as_str).collect(),
        Element::Repeated(repeats) => {
            let repeats: Vec<Value> = repeats.iter().map(render_element).collect();
            json!({ "repeats": repeats })
        }
    }
}

fn render_delimiters(delimiters: &Delimiters) -> Value {
    let mut object = Map::new();
    object.insert("element".to_string(), Value::from(delimiters.element.to_string()));
    object.insert(
        "component".to_string(),
        Value::from(delimiters.component.to_string()),
    );
    object.insert("segment".to_string(), Value::from(delimiters.segment.to_string()));
    if let Some(repetition) = delimiters.repetition {
        object.insert("repetition".to_string(), Value::from(repetition.to_string()));
    }
    if let Some(release) = delimiters.release {
        object.insert("release".to_string(), Value::from(release.to_string()));
    }
    Value::Object(object)
}

fn to_object<T: Serialize>(fields: &T) -> ConversionResult<Map<String, Value>> {
    match serde_json::to_value(fields)? {
        Value::Object(object) => Ok(object),
        other => Err(ConversionError::conversion(ConversionErrorKind::serialization(
            format!("expected an object, found {}", other),
        ))),
    }
}

/// Write `value` followed by a newline, pretty-printed when `formatting` is set
pub fn write_json(value: &Value, output: &mut dyn Write, formatting: bool) -> ConversionResult<()> {
    if formatting {
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut *output, PrettyFormatter::with_indent(INDENT));
        value.serialize(&mut serializer)?;
    } else {
        serde_json::to_writer(&mut *output, value)?;
    }
    output.write_all(b"\n")?;
    Ok(())
}
