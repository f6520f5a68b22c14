//! Envelope assembly: segments into interchanges, groups and transactions

use crate::error::{ConversionResult, ParseError};
use crate::parser::{Delimiters, ParsedEdi, Segment, Standard};
use serde::Serialize;
use std::ops::Range;

/// Header/trailer tags and control reference positions for one standard
#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    pub interchange_header: &'static str,
    pub interchange_trailer: &'static str,
    pub group_header: &'static str,
    pub group_trailer: &'static str,
    pub transaction_header: &'static str,
    pub transaction_trailer: &'static str,
    /// Element holding the control reference in each header; trailers always use element 2
    pub interchange_control: usize,
    pub group_control: usize,
    pub transaction_control: usize,
    /// Whether transactions must sit inside a functional group
    pub groups_required: bool,
}

const TRAILER_CONTROL: usize = 2;

pub const X12_ENVELOPE: Envelope = Envelope {
    interchange_header: "ISA",
    interchange_trailer: "IEA",
    group_header: "GS",
    group_trailer: "GE",
    transaction_header: "ST",
    transaction_trailer: "SE",
    interchange_control: 13,
    group_control: 6,
    transaction_control: 2,
    groups_required: true,
};

pub const EDIFACT_ENVELOPE: Envelope = Envelope {
    interchange_header: "UNB",
    interchange_trailer: "UNZ",
    group_header: "UNG",
    group_trailer: "UNE",
    transaction_header: "UNH",
    transaction_trailer: "UNT",
    interchange_control: 5,
    group_control: 5,
    transaction_control: 1,
    groups_required: false,
};

impl Envelope {
    pub fn for_standard(standard: Standard) -> &'static Envelope {
        match standard {
            Standard::X12 => &X12_ENVELOPE,
            Standard::Edifact => &EDIFACT_ENVELOPE,
        }
    }
}

/// One interchange envelope
#[derive(Debug, Clone)]
pub struct Interchange {
    pub standard: Standard,
    pub delimiters: Delimiters,
    pub header: Segment,
    pub trailer: Option<Segment>,
    pub groups: Vec<FunctionalGroup>,
    /// Messages sent without a group envelope (EDIFACT only)
    pub transactions: Vec<Transaction>,
}

/// One functional group envelope
#[derive(Debug, Clone)]
pub struct FunctionalGroup {
    pub standard: Standard,
    pub header: Segment,
    pub trailer: Option<Segment>,
    pub transactions: Vec<Transaction>,
}

/// One transaction set / message, header and trailer included in `segments`
#[derive(Debug, Clone)]
pub struct Transaction {
    pub standard: Standard,
    pub segments: Vec<Segment>,
}

/// Envelope fields of an interchange header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterchangeFields {
    pub standard: Standard,
    pub sender_qualifier: String,
    pub sender_id: String,
    pub receiver_qualifier: String,
    pub receiver_id: String,
    pub date: String,
    pub time: String,
    pub control_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_indicator: Option<String>,
}

/// Envelope fields of a functional group header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupFields {
    pub functional_identifier_code: String,
    pub application_sender: String,
    pub application_receiver: String,
    pub date: String,
    pub time: String,
    pub control_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Envelope fields of a transaction header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFields {
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub control_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Join the non-empty components in `range` with ':'
fn joined(segment: &Segment, number: usize, range: Range<usize>) -> Option<String> {
    let parts: Vec<&str> = range
        .map(|i| segment.component(number, i))
        .filter(|part| !part.is_empty())
        .collect();
    non_empty(&parts.join(":"))
}

impl Interchange {
    pub fn fields(&self) -> InterchangeFields {
        let h = &self.header;
        match self.standard {
            Standard::X12 => InterchangeFields {
                standard: self.standard,
                sender_qualifier: h.value(5).to_string(),
                sender_id: h.value(6).to_string(),
                receiver_qualifier: h.value(7).to_string(),
                receiver_id: h.value(8).to_string(),
                date: h.value(9).to_string(),
                time: h.value(10).to_string(),
                control_number: h.value(13).to_string(),
                version: non_empty(h.value(12)),
                syntax_identifier: None,
                syntax_version: None,
                test_indicator: non_empty(h.value(15)),
            },
            Standard::Edifact => InterchangeFields {
                standard: self.standard,
                sender_qualifier: h.component(2, 1).to_string(),
                sender_id: h.component(2, 0).to_string(),
                receiver_qualifier: h.component(3, 1).to_string(),
                receiver_id: h.component(3, 0).to_string(),
                date: h.component(4, 0).to_string(),
                time: h.component(4, 1).to_string(),
                control_number: h.value(5).to_string(),
                version: None,
                syntax_identifier: non_empty(h.component(1, 0)),
                syntax_version: non_empty(h.component(1, 1)),
                test_indicator: None,
            },
        }
    }

    /// Every transaction in document order, grouped ones first
    pub fn all_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.groups
            .iter()
            .flat_map(|group| group.transactions.iter())
            .chain(self.transactions.iter())
    }
}

impl FunctionalGroup {
    pub fn fields(&self) -> GroupFields {
        let h = &self.header;
        match self.standard {
            Standard::X12 => GroupFields {
                functional_identifier_code: h.value(1).to_string(),
                application_sender: h.value(2).to_string(),
                application_receiver: h.value(3).to_string(),
                date: h.value(4).to_string(),
                time: h.value(5).to_string(),
                control_number: h.value(6).to_string(),
                version: non_empty(h.value(8)),
            },
            Standard::Edifact => GroupFields {
                functional_identifier_code: h.value(1).to_string(),
                application_sender: h.component(2, 0).to_string(),
                application_receiver: h.component(3, 0).to_string(),
                date: h.component(4, 0).to_string(),
                time: h.component(4, 1).to_string(),
                control_number: h.value(5).to_string(),
                version: joined(h, 7, 0..2),
            },
        }
    }

    pub fn code(&self) -> &str {
        self.header.value(1)
    }
}

impl Transaction {
    pub fn header(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn fields(&self) -> TransactionFields {
        let h = self.header();
        match self.standard {
            Standard::X12 => TransactionFields {
                transaction_type: h.value(1).to_string(),
                control_number: h.value(2).to_string(),
                version: non_empty(h.value(3)),
            },
            Standard::Edifact => TransactionFields {
                transaction_type: h.component(2, 0).to_string(),
                control_number: h.value(1).to_string(),
                version: joined(h, 2, 1..3),
            },
        }
    }

    pub fn transaction_type(&self) -> &str {
        match self.standard {
            Standard::X12 => self.header().value(1),
            Standard::Edifact => self.header().component(2, 0),
        }
    }

    /// Number of segments from header to trailer inclusive
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

fn structure_error(message: impl Into<String>, segment: &Segment) -> ParseError {
    ParseError::new(message.into(), Some(segment.position)).with_tag(&segment.tag)
}

fn element_ref(tag: &str, number: usize) -> String {
    format!("{}{:02}", tag, number)
}

fn check_control(header: &Segment, header_element: usize, trailer: &Segment) -> ConversionResult<()> {
    let opened = header.value(header_element);
    let closed = trailer.value(TRAILER_CONTROL);
    if opened != closed {
        return Err(structure_error(
            format!(
                "Control number mismatch: {} is '{}' but {} is '{}'",
                element_ref(&header.tag, header_element),
                opened,
                element_ref(&trailer.tag, TRAILER_CONTROL),
                closed
            ),
            trailer,
        )
        .into());
    }
    Ok(())
}

/// Assemble the flat segment list into envelopes
pub fn assemble(parsed: ParsedEdi) -> ConversionResult<Vec<Interchange>> {
    let ParsedEdi {
        standard,
        delimiters,
        segments,
    } = parsed;
    let envelope = Envelope::for_standard(standard);

    let mut interchanges = Vec::new();
    let mut interchange: Option<Interchange> = None;
    let mut group: Option<FunctionalGroup> = None;
    let mut transaction: Option<Transaction> = None;

    for segment in segments {
        let tag = segment.tag.as_str();

        if tag == envelope.interchange_header {
            if let Some(open) = &interchange {
                return Err(structure_error(
                    format!(
                        "Interchange opened at segment {} is not closed",
                        open.header.position
                    ),
                    &segment,
                )
                .into());
            }
            interchange = Some(Interchange {
                standard,
                delimiters,
                header: segment,
                trailer: None,
                groups: Vec::new(),
                transactions: Vec::new(),
            });
        } else if tag == envelope.interchange_trailer {
            let mut closing = interchange
                .take()
                .ok_or_else(|| structure_error("Interchange trailer without header", &segment))?;
            if group.is_some() || transaction.is_some() {
                return Err(structure_error(
                    "Interchange closed while a group or transaction is still open",
                    &segment,
                )
                .into());
            }
            check_control(&closing.header, envelope.interchange_control, &segment)?;
            closing.trailer = Some(segment);
            interchanges.push(closing);
        } else if tag == envelope.group_header {
            if interchange.is_none() {
                return Err(structure_error("Group header outside an interchange", &segment).into());
            }
            if group.is_some() || transaction.is_some() {
                return Err(structure_error(
                    "Group header while a group or transaction is still open",
                    &segment,
                )
                .into());
            }
            group = Some(FunctionalGroup {
                standard,
                header: segment,
                trailer: None,
                transactions: Vec::new(),
            });
        } else if tag == envelope.group_trailer {
            let mut closing = group
                .take()
                .ok_or_else(|| structure_error("Group trailer without header", &segment))?;
            if transaction.is_some() {
                return Err(structure_error(
                    "Group closed while a transaction is still open",
                    &segment,
                )
                .into());
            }
            check_control(&closing.header, envelope.group_control, &segment)?;
            closing.trailer = Some(segment);
            interchange
                .as_mut()
                .ok_or_else(|| structure_error("Group trailer outside an interchange", &closing.header))?
                .groups
                .push(closing);
        } else if tag == envelope.transaction_header {
            if interchange.is_none() {
                return Err(
                    structure_error("Transaction header outside an interchange", &segment).into(),
                );
            }
            if envelope.groups_required && group.is_none() {
                return Err(
                    structure_error("Transaction header outside a functional group", &segment)
                        .into(),
                );
            }
            if transaction.is_some() {
                return Err(structure_error(
                    "Transaction header while a transaction is still open",
                    &segment,
                )
                .into());
            }
            transaction = Some(Transaction {
                standard,
                segments: vec![segment],
            });
        } else if tag == envelope.transaction_trailer {
            let mut closing = transaction
                .take()
                .ok_or_else(|| structure_error("Transaction trailer without header", &segment))?;
            check_control(closing.header(), envelope.transaction_control, &segment)?;
            closing.segments.push(segment);
            match group.as_mut() {
                Some(open) => open.transactions.push(closing),
                None => interchange
                    .as_mut()
                    .ok_or_else(|| {
                        structure_error("Transaction outside an interchange", closing.header())
                    })?
                    .transactions
                    .push(closing),
            }
        } else {
            match transaction.as_mut() {
                Some(open) => open.segments.push(segment),
                None => {
                    return Err(structure_error("Segment outside a transaction", &segment).into())
                }
            }
        }
    }

    if let Some(open) = transaction {
        return Err(structure_error("Transaction not terminated before end of input", open.header()).into());
    }
    if let Some(open) = group {
        return Err(structure_error("Group not terminated before end of input", &open.header).into());
    }
    if let Some(open) = interchange {
        return Err(
            structure_error("Interchange not terminated before end of input", &open.header).into(),
        );
    }
    if interchanges.is_empty() {
        return Err(ParseError::new("No interchange found in input".to_string(), None).into());
    }

    tracing::debug!(
        standard = standard.as_str(),
        interchanges = interchanges.len(),
        "assembled envelopes"
    );

    Ok(interchanges)
}
