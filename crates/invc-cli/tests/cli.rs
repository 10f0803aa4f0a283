use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "\
THE HOME DEPOT
Location: 0604 SPRINGFIELD | STORE # 0604
CUSTOMER RECEIPT
03/14/2024 02:41 PM CST
Ofdler # H0604-123456
SKU DESCRIPTION QTY UNIT PRICE TOTAL
1 2X4X8 STUD 1001234567 10 $4.98 $49.80
SUBTOTAL $49.80
SALES TAX $3.98
ORDER TOTAL $53.78
";

/// A workspace with an inbox holding two documents and an isolated config dir.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let inbox = dir.path().join("inbox");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(inbox.join("a_home_depot.txt"), RECEIPT).unwrap();
    fs::write(inbox.join("b_blank.txt"), "nothing useful here").unwrap();
    fs::write(inbox.join("ignored.pdf"), "not text").unwrap();
    dir
}

fn invc(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("invc").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn run_dry_run_prints_json_and_writes_nothing() {
    let dir = workspace();

    let output = invc(dir.path()).args(["run", "--dry-run"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let invoices = json["invoices"].as_array().unwrap();
    assert_eq!(invoices.len(), 2);
    assert_eq!(invoices[0]["source_file"], "a_home_depot.txt");
    assert_eq!(invoices[0]["vendor_name"], "The Home Depot");
    assert_eq!(invoices[0]["po_number"], "H0604-123456");
    assert_eq!(invoices[0]["totals"]["total"], 53.78);
    assert_eq!(invoices[1]["vendor_name"], serde_json::Value::Null);
    assert!(json["questions"].as_array().unwrap().len() > 0);

    assert!(!dir.path().join("out").exists());
}

#[test]
fn run_writes_outputs() {
    let dir = workspace();

    invc(dir.path())
        .args(["run", "--report", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("invoices.json written"));

    let out = dir.path().join("out");
    let json = read_json(&out.join("invoices.json"));
    assert_eq!(json["invoices"].as_array().unwrap().len(), 2);
    assert_eq!(json["invoices"][0]["line_items"][0]["sku"], "1001234567");

    let report = fs::read_to_string(out.join("report.md")).unwrap();
    assert!(report.contains("## Plan"));
    assert!(report.contains("## Execution"));
    assert!(report.contains("## Verification"));
    assert!(report.contains("`a_home_depot.txt`: 1 line item(s) extracted, 3/3 totals fields found"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    assert!(summary.lines().nth(1).unwrap().starts_with("a_home_depot.txt,The Home Depot,2024-03-14,H0604-123456,1,3,53.78"));
}

#[test]
fn run_with_explicit_directories() {
    let dir = workspace();
    let out = dir.path().join("results");

    invc(dir.path())
        .arg("run")
        .arg("--inbox")
        .arg(dir.path().join("inbox"))
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("invoices.json").exists());
    assert!(!out.join("report.md").exists());
}

#[test]
fn run_missing_inbox_fails() {
    let dir = tempfile::tempdir().unwrap();

    invc(dir.path())
        .args(["run", "--inbox", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Inbox directory not found"));
}

#[test]
fn review_declined_writes_nothing() {
    let dir = workspace();

    invc(dir.path())
        .args(["run", "--review"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Write outputs? (y/N)"))
        .stdout(predicate::str::contains("vendor:  The Home Depot"))
        .stdout(predicate::str::contains("Aborted. No files written."));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn review_accepted_writes_outputs() {
    let dir = workspace();

    invc(dir.path())
        .args(["run", "--review"])
        .write_stdin("y\n")
        .assert()
        .success();

    assert!(dir.path().join("out/invoices.json").exists());
}

#[test]
fn config_file_extends_vendor_table() {
    let dir = workspace();
    let inbox = dir.path().join("inbox");
    fs::write(inbox.join("c_acme.txt"), "ACME LUMBER CO\nTOTAL $5.00").unwrap();
    let config = dir.path().join("invc.json");
    fs::write(
        &config,
        r#"{"extraction": {"extra_vendors": [{"pattern": "acme\\s+lumber", "name": "Acme Lumber"}]}}"#,
    )
    .unwrap();

    let output = invc(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["run", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["invoices"][2]["vendor_name"], "Acme Lumber");
}

#[test]
fn invalid_config_pattern_fails() {
    let dir = workspace();
    let config = dir.path().join("bad.json");
    fs::write(
        &config,
        r#"{"extraction": {"extra_vendors": [{"pattern": "(", "name": "Broken"}]}}"#,
    )
    .unwrap();

    invc(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid extraction configuration"));
}

#[test]
fn process_single_file() {
    let dir = workspace();

    let output = invc(dir.path())
        .args(["process", "inbox/a_home_depot.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["record"]["invoice_date"], "2024-03-14");
    assert_eq!(json["record"]["store_number"], "0604");
    assert!(json["notes"]["questions"].as_array().unwrap().is_empty());
}

#[test]
fn process_text_format_to_file() {
    let dir = workspace();

    invc(dir.path())
        .args(["process", "inbox/b_blank.txt", "-f", "text", "-o", "blank.out"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("blank.out")).unwrap();
    assert!(text.contains("Vendor:   null"));
    assert!(text.contains("question: b_blank.txt: What vendor issued this invoice?"));
}

#[test]
fn process_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    invc(dir.path())
        .args(["process", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn pdf_rejects_invalid_input() {
    let dir = workspace();

    invc(dir.path())
        .args(["pdf", "inbox/ignored.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse PDF"));

    assert!(!dir.path().join("inbox/ignored.txt").exists());
}

#[test]
fn config_init_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("conf/invc.json");

    invc(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    invc(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    let json = read_json(&config);
    assert_eq!(json["extraction"]["raw_excerpt_len"], 500);
    assert_eq!(json["output"]["inbox_dir"], "inbox");

    invc(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    invc(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"raw_excerpt_len\": 500"));
}

#[test]
fn log_file_receives_log_lines() {
    let dir = workspace();
    let log = dir.path().join("latest.log");

    invc(dir.path())
        .arg("-v")
        .arg("--log-file")
        .arg(&log)
        .args(["run", "--dry-run"])
        .assert()
        .success();

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("invc run starting"));
}
