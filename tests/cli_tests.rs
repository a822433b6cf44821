use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn reports_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("member-reports"))
}

fn init_config(temp_dir: &TempDir) -> PathBuf {
    let config_path = temp_dir.path().join("reports-config");
    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
    config_path
}

fn write_march_snapshots(config_path: &Path) {
    let data = config_path.join("data");
    fs::write(
        data.join("payments.json"),
        r#"[
  {"member": "Amina Yusuf", "amount": "$120", "method": "cash", "status": "Paid", "date": "2025-03-03"},
  {"member": "Omar Haddad", "amount": 80, "method": "Card", "status": "Pending", "date": "2025-03-04"}
]"#,
    )
    .unwrap();
    fs::write(
        data.join("donations.json"),
        r#"[{"donorName": "Fatima", "amount": "75.50", "method": "Stripe", "date": "2025-03-01"}]"#,
    )
    .unwrap();
    fs::write(
        data.join("invoices.json"),
        r#"[{"memberName": "Amina Yusuf", "amount": "$250", "status": "Paid", "createdAt": "2025-03-02"}]"#,
    )
    .unwrap();
    fs::write(
        data.join("expenses.json"),
        r#"[
  {"_id": "e1", "categoryName": "Utilities", "amount": -40, "date": "2025-03-10"},
  {"_id": "e2", "categoryName": "Rent", "amount": 900, "date": "2025-03-11", "isDeleted": true}
]"#,
    )
    .unwrap();
}

const MARCH: [&str; 4] = ["--from", "2025-03-01", "--to", "2025-03-31"];

#[test]
fn test_help() {
    reports_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Financial reports for membership organizations",
        ));
}

#[test]
fn test_version() {
    reports_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("member-reports"));
}

#[test]
fn test_init_creates_config_and_snapshots() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("reports-config");

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized member-reports config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("output").is_dir());
    for name in ["payments", "donations", "invoices", "expenses", "members"] {
        let snapshot = config_path.join("data").join(format!("{name}.json"));
        assert_eq!(fs::read_to_string(snapshot).unwrap().trim(), "[]");
    }
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_summary_without_init_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_summary_on_empty_snapshots() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .args(MARCH)
        .assert()
        .success()
        .stdout(predicate::str::contains("Period:       2025-03-01 to 2025-03-31"))
        .stdout(predicate::str::contains("No payments"))
        .stdout(predicate::str::contains("$0.00"));
}

#[test]
fn test_summary_reports_totals() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    write_march_snapshots(&config_path);

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .args(MARCH)
        .assert()
        .success()
        .stdout(predicate::str::contains("Financial Report - Your Community Association"))
        .stdout(predicate::str::contains("Total Income"))
        .stdout(predicate::str::contains("$325.50"))
        .stdout(predicate::str::contains("$285.50"))
        .stdout(predicate::str::contains("Cash"));
}

#[test]
fn test_summary_details_lists_records() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    write_march_snapshots(&config_path);

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary", "--details"])
        .args(MARCH)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fatima"))
        .stdout(predicate::str::contains("Utilities"))
        .stdout(predicate::str::contains("Rent").not())
        .stdout(predicate::str::contains("Omar Haddad").not());
}

#[test]
fn test_summary_rejects_bad_dates() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .args(["--from", "03/01/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .args(["--from", "2025-04-01", "--to", "2025-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn test_summary_rejects_corrupt_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    fs::write(config_path.join("data").join("payments.json"), "{ nope").unwrap();

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .args(MARCH)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read snapshot"));
}

#[test]
fn test_export_csv_to_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    write_march_snapshots(&config_path);

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "export"])
        .args(MARCH)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported financial report"))
        .stdout(predicate::str::contains("Saved:"));

    let csv_path = config_path
        .join("output")
        .join("financial-report-2025-03-01-to-2025-03-31.csv");
    let content = fs::read_to_string(csv_path).unwrap();
    assert!(content.contains("\"Total Income\",\"325.50\""));
    assert!(content.contains("\"Net Balance\",\"285.50\""));
    assert!(content.contains("\"Utilities\""));
}

#[test]
fn test_export_csv_custom_output() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    write_march_snapshots(&config_path);
    let target = temp_dir.path().join("march.csv");

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "export", "-f", "csv"])
        .args(MARCH)
        .args(["-o", target.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(target).unwrap();
    assert!(content.starts_with("\"Financial Report\""));
}

#[test]
fn test_export_unknown_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "export", "-f", "xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown export format"));
}

#[test]
fn test_export_scoped_to_organization() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);
    fs::write(
        config_path.join("data").join("donations.json"),
        r#"[
  {"donorName": "Local", "amount": 10, "date": "2025-03-05", "organization_id": "org-a"},
  {"donorName": "Elsewhere", "amount": 99, "date": "2025-03-05", "organization_id": "org-b"},
  {"donorName": "Legacy", "amount": 5, "date": "2025-03-05"}
]"#,
    )
    .unwrap();
    let target = temp_dir.path().join("scoped.csv");

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "export"])
        .args(MARCH)
        .args(["--org", "org-a", "-o", target.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(target).unwrap();
    assert!(content.contains("\"Total Income\",\"15.00\""));
    assert!(!content.contains("Elsewhere"));
}

#[test]
fn test_fetch_without_api_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    reports_cmd()
        .args(["-C", config_path.to_str().unwrap(), "fetch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API base URL configured"));
}
