//! Library-level conversion tests

use assert_matches::assert_matches;
use edi2json::{convert_edi, convert_edi_with_options, ConversionError, ConversionOptions};
use serde_json::Value;

const PURCHASE_ORDER: &str = include_str!("../fixtures/purchase_order.x12");
const ORDERS: &str = include_str!("../fixtures/orders.edifact");

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("output must be valid JSON")
}

#[test]
fn test_x12_group_and_transactions() {
    let value = parse(&convert_edi(PURCHASE_ORDER).unwrap());
    let interchanges = value["interchanges"].as_array().unwrap();
    assert_eq!(interchanges.len(), 1);

    let group = &interchanges[0]["functionalGroups"][0];
    assert_eq!(group["controlNumber"], "101");
    assert_eq!(group["version"], "004010");

    let second = &group["transactions"][1];
    assert_eq!(second["controlNumber"], "0002");
    assert_eq!(second["segments"][0]["id"], "ST");
    assert_eq!(second["segments"][4]["id"], "SE");
    assert!(interchanges[0].get("transactions").is_none());
}

#[test]
fn test_edifact_without_groups() {
    let value = parse(&convert_edi(ORDERS).unwrap());
    let interchange = &value["interchanges"][0];

    assert_eq!(interchange["senderId"], "5412345000013");
    assert_eq!(interchange["senderQualifier"], "14");
    assert_eq!(interchange["date"], "230315");
    assert_eq!(interchange["time"], "0930");
    assert_eq!(interchange["transactions"][0]["controlNumber"], "ME0001");
}

#[test]
fn test_annotations_follow_option() {
    let plain = convert_edi(ORDERS).unwrap();
    assert!(!plain.contains("annotation"));

    let options = ConversionOptions::new().with_annotate(true);
    let value = parse(&convert_edi_with_options(ORDERS, &options).unwrap());
    let message = &value["interchanges"][0]["transactions"][0];
    assert_eq!(message["annotation"], "Purchase order message");
    assert_eq!(message["segments"][0]["annotation"], "Message header");
}

#[test]
fn test_summary_keeps_envelope_fields() {
    let options = ConversionOptions::new().with_summarize(true).with_format(false);
    let json = convert_edi_with_options(PURCHASE_ORDER, &options).unwrap();
    assert_eq!(json.lines().count(), 1);

    let value = parse(&json);
    let first = &value["interchanges"][0]["functionalGroups"][0]["transactions"][0];
    assert_eq!(first["type"], "850");
    assert!(first.get("segments").is_none());
}

#[test]
fn test_crlf_line_endings() {
    let crlf = PURCHASE_ORDER.replace('\n', "\r\n");
    assert_eq!(convert_edi(&crlf).unwrap(), convert_edi(PURCHASE_ORDER).unwrap());
}

#[test]
fn test_unclosed_transaction_fails() {
    let truncated: String = PURCHASE_ORDER
        .lines()
        .filter(|line| !line.starts_with("SE*5"))
        .collect::<Vec<_>>()
        .join("\n");
    assert_matches!(convert_edi(&truncated), Err(ConversionError::ParseError(_)));
}

#[test]
fn test_empty_input_fails() {
    assert_matches!(convert_edi(""), Err(ConversionError::Conversion { .. }));
    assert_matches!(convert_edi("  \n\r\n"), Err(ConversionError::Conversion { .. }));
}
