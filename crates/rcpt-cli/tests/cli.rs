use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "CORNER CAFE\n\
    Tel 555-123-4567\n\
    03/04/2024\n\
    Latte 4.50\n\
    Total: $45.00\n";

/// Temp dir holding an empty config so the user's own config is never read.
fn workspace() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    let config = config.to_string_lossy().into_owned();
    (dir, config)
}

fn rcpt(dir: &TempDir, config: &str) -> Command {
    let mut cmd = Command::cargo_bin("rcpt").unwrap();
    cmd.current_dir(dir.path()).args(["--config", config]);
    cmd
}

#[test]
fn extract_from_stdin() {
    let (dir, config) = workspace();

    rcpt(&dir, &config)
        .arg("extract")
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""amount": "45.00""#))
        .stdout(predicate::str::contains(r#""date": "03/04/2024""#))
        .stdout(predicate::str::contains(r#""mobile": "555-123-4567""#))
        .stdout(predicate::str::contains(r#""type": "Expense""#));
}

#[test]
fn extract_blank_input_fails() {
    let (dir, config) = workspace();

    rcpt(&dir, &config)
        .arg("extract")
        .write_stdin("  \n\n ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No text detected in the image"));
}

#[test]
fn extract_file_as_csv_and_save() {
    let (dir, config) = workspace();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, "BANK\nRefund received 12.00\n").unwrap();

    rcpt(&dir, &config)
        .args(["extract", "--format", "csv", "--save"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("date,title,mobile,amount,type,description"))
        .stdout(predicate::str::contains(",BANK,,12.00,Income,"));

    let saved = fs::read_to_string(dir.path().join("OCR-receipt").join("output.json")).unwrap();
    assert!(saved.contains(r#""type": "Income""#));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let (dir, config) = workspace();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), "SHOP A\nTotal 10.00\n").unwrap();
    fs::write(inputs.join("b.txt"), "SHOP B\nGrand total 2.50\n").unwrap();
    fs::write(inputs.join("c.txt"), "   \n").unwrap();

    let pattern = inputs.join("*.txt").to_string_lossy().into_owned();

    rcpt(&dir, &config)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "--output-dir"])
        .arg(&outputs)
        .assert()
        .success();

    assert!(outputs.join("a.json").exists());
    assert!(outputs.join("b.json").exists());
    assert!(!outputs.join("c.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.contains("c.txt,error"));
    assert!(summary.contains("total_expense,12.50"));
}

#[test]
fn config_get_reads_defaults() {
    let (dir, config) = workspace();

    rcpt(&dir, &config)
        .args(["config", "get", "output.file_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output.json\""));
}
