//! End-to-end conversions through the binary

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Convert a fixture into a fresh temp dir and return the JSON text
fn convert(name: &str, options: &[&str]) -> (TempDir, String) {
    let tmp = tempdir().unwrap();
    let output_path = tmp.path().join("out.json");

    let status = Command::new(env!("CARGO_BIN_EXE_edi2json"))
        .arg(fixture(name))
        .arg(&output_path)
        .args(options)
        .env_remove("EDI2JSON_LOG")
        .status()
        .expect("Failed to execute edi2json");
    assert!(status.success(), "edi2json exited with {:?}", status.code());

    let json = fs::read_to_string(&output_path).unwrap();
    (tmp, json)
}

#[test]
fn test_default_options_pretty_detailed_unannotated() {
    let (_tmp, json) = convert("purchase_order.x12", &[]);

    assert!(json.starts_with("{\n  \"interchanges\": ["));
    assert!(json.ends_with("}\n"));
    assert!(json.contains("\"segments\""));
    assert!(!json.contains("annotation"));

    let value: Value = serde_json::from_str(&json).unwrap();
    let interchange = &value["interchanges"][0];
    assert_eq!(interchange["standard"], "X12");
    assert_eq!(interchange["controlNumber"], "000000101");
    assert_eq!(interchange["senderId"], "ACMEBUYER");
    assert_eq!(interchange["delimiters"]["element"], "*");
    // ISA11 holds the standards identifier 'U', not a repetition separator
    assert!(interchange["delimiters"].get("repetition").is_none());

    let group = &interchange["functionalGroups"][0];
    assert_eq!(group["functionalIdentifierCode"], "PO");
    assert_eq!(group["transactions"].as_array().unwrap().len(), 2);

    let first = &group["transactions"][0];
    assert_eq!(first["type"], "850");
    assert_eq!(first["controlNumber"], "0001");
    assert_eq!(first["segmentCount"], 12);
    assert_eq!(first["segments"][1]["id"], "BEG");
    assert_eq!(first["segments"][1]["elements"][2], "PO-4471");
    assert_eq!(first["segments"][8]["elements"][6], "WID-220");
}

#[test]
fn test_compact_annotated() {
    let (_tmp, json) = convert("purchase_order.x12", &["--format=no", "--annotate=yes"]);

    assert_eq!(json.lines().count(), 1);
    assert!(json.ends_with("]}\n"));
    assert!(json.contains("\"annotation\":\"Purchase Order\""));
    assert!(json.contains("\"annotation\":\"Beginning Segment for Purchase Order\""));
}

#[test]
fn test_option_case_and_duplicates() {
    let (_tmp, json) = convert("purchase_order.x12", &["--format=yes", "--format=no"]);
    assert_eq!(json.lines().count(), 1);

    let (_tmp, json) = convert("purchase_order.x12", &["--annotate=YES"]);
    assert!(json.lines().count() > 1);
    assert!(json.contains("annotation"));
}

#[test]
fn test_unknown_and_malformed_options_are_ignored() {
    let (_tmp, plain) = convert("purchase_order.x12", &[]);
    let (_tmp, noisy) = convert(
        "purchase_order.x12",
        &["--verbose=yes", "--format", "--annotate=yes=no", "stray"],
    );
    assert_eq!(plain, noisy);
}

#[test]
fn test_summarize_omits_segments() {
    let (_tmp, json) = convert("purchase_order.x12", &["--summarize=yes"]);

    assert!(!json.contains("\"segments\""));
    let value: Value = serde_json::from_str(&json).unwrap();
    let transactions = &value["interchanges"][0]["functionalGroups"][0]["transactions"];
    assert_eq!(transactions[0]["segmentCount"], 12);
    assert_eq!(transactions[1]["segmentCount"], 5);
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let (_tmp, first) = convert("orders.edifact", &["--annotate=yes"]);
    let (_tmp, second) = convert("orders.edifact", &["--annotate=yes"]);
    assert_eq!(first, second);
}

#[test]
fn test_existing_output_is_replaced() {
    let tmp = tempdir().unwrap();
    let output_path = tmp.path().join("out.json");
    fs::write(&output_path, "x".repeat(100_000)).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_edi2json"))
        .arg(fixture("orders.edifact"))
        .arg(&output_path)
        .arg("--format=no")
        .status()
        .unwrap();
    assert!(status.success());

    let json = fs::read_to_string(&output_path).unwrap();
    assert!(!json.contains("xxxx"));
    serde_json::from_str::<Value>(&json).unwrap();
}

#[test]
fn test_edifact_message() {
    let (_tmp, json) = convert("orders.edifact", &[]);
    let value: Value = serde_json::from_str(&json).unwrap();
    let interchange = &value["interchanges"][0];

    assert_eq!(interchange["standard"], "EDIFACT");
    assert_eq!(interchange["syntaxIdentifier"], "UNOC");
    assert_eq!(interchange["controlNumber"], "ICR7781");
    assert_eq!(interchange["delimiters"]["release"], "?");
    assert_eq!(interchange["functionalGroups"], Value::Array(vec![]));

    let message = &interchange["transactions"][0];
    assert_eq!(message["type"], "ORDERS");
    assert_eq!(message["version"], "D:96A");
    assert_eq!(message["segmentCount"], 13);
    assert_eq!(message["segments"][2]["elements"][0], Value::from(vec!["137", "20230315", "102"]));
    assert_eq!(
        message["segments"][5]["elements"][3],
        "Deliver to gate 4: ring bell's button"
    );
}
