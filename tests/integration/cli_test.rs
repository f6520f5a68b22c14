//! Integration tests for the command-line surface: usage, preconditions
//! and failure reporting.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run_edi2json(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edi2json"))
        .args(args)
        .env_remove("EDI2JSON_LOG")
        .output()
        .expect("Failed to execute edi2json")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = run_edi2json(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = stderr_of(&output);
    assert!(stderr.contains("Invalid command line arguments"), "{}", stderr);
    assert!(stderr.contains("usage:"));
    assert!(stderr.contains("--summarize={yes|no}"));
    assert!(stderr.contains("--annotate={yes|no}"));
    assert!(stderr.contains("--format={yes|no}"));
}

#[test]
fn test_single_argument_performs_no_io() {
    let tmp = tempdir().unwrap();
    let input = fixture("purchase_order.x12");
    let input_arg = input.to_str().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_edi2json"))
        .arg(input_arg)
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("usage:"));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn test_help_token_is_not_special() {
    let output = run_edi2json(&["--help"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("usage:"));
}

#[test]
fn test_missing_input_reports_absolute_path() {
    let tmp = tempdir().unwrap();
    let output_path = tmp.path().join("out.json");

    let output = Command::new(env!("CARGO_BIN_EXE_edi2json"))
        .args(["missing.edi", "out.json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Cannot find or read EDI input file"), "{}", stderr);
    let expected = tmp.path().join("missing.edi");
    let canonical = fs::canonicalize(tmp.path()).unwrap().join("missing.edi");
    assert!(
        stderr.contains(expected.to_str().unwrap()) || stderr.contains(canonical.to_str().unwrap()),
        "{}",
        stderr
    );
    assert!(!output_path.exists());
}

#[test]
fn test_unwritable_output_leaves_input_alone() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("in.x12");
    fs::copy(fixture("purchase_order.x12"), &input).unwrap();
    let before = fs::read(&input).unwrap();
    let output_path = tmp.path().join("missing-dir").join("out.json");

    let output = run_edi2json(&[input.to_str().unwrap(), output_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Cannot write to JSON output file"));
    assert!(!output_path.exists());
    assert_eq!(fs::read(&input).unwrap(), before);
}

#[test]
fn test_conversion_failure_is_reported_with_cause() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("broken.x12");
    let output_path = tmp.path().join("out.json");
    let text = fs::read_to_string(fixture("purchase_order.x12"))
        .unwrap()
        .replace("SE*5*0002~", "SE*5*9999~");
    fs::write(&input, text).unwrap();

    let output = run_edi2json(&[input.to_str().unwrap(), output_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Conversion failed"), "{}", stderr);
    assert!(stderr.contains("Caused by"), "{}", stderr);
    assert!(stderr.contains("Control number mismatch"), "{}", stderr);
    // the output stream was opened, so the file exists, but holds no JSON
    assert_eq!(fs::read_to_string(&output_path).unwrap(), "");
}

#[test]
fn test_non_edi_input_fails() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("notes.txt");
    fs::write(&input, "just some notes").unwrap();
    let output_path = tmp.path().join("out.json");

    let output = run_edi2json(&[input.to_str().unwrap(), output_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Unsupported EDI standard"));
}

#[test]
fn test_double_dash_is_taken_as_the_input_path() {
    let tmp = tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_edi2json"))
        .args(["--", "out.json", "--format=no"])
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Cannot find or read EDI input file"));
    assert!(!tmp.path().join("--format=no").exists());
    assert!(!tmp.path().join("out.json").exists());
}

#[test]
fn test_output_naming_the_input_keeps_the_input() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("in.x12");
    fs::copy(fixture("purchase_order.x12"), &input).unwrap();
    let before = fs::read(&input).unwrap();

    let output = run_edi2json(&[input.to_str().unwrap(), input.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Cannot write to JSON output file"));
    assert_eq!(fs::read(&input).unwrap(), before);
}
