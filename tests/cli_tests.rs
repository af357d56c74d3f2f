//! Integration tests for the CLI interface

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// A command isolated from the user's config and environment.
fn memclean(dir: &TempDir) -> Command {
    let config = dir.path().join("memclean.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("memclean").unwrap();
    cmd.env_remove("MEMCLEAN_DATA_DIR")
        .env_remove("MEMCLEAN_TOOL_PATH")
        .env_remove("MEMCLEAN_RELEASE_URL")
        .env_remove("MEMCLEAN_LOG_LEVEL")
        .arg("--config")
        .arg(&config)
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

fn write_history(dir: &Path, rows: &[&str]) {
    let mut text = String::from("Timestamp,Free Memory Before,Free Memory After,Freed Memory\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    std::fs::write(dir.join("memory_usage.csv"), text).unwrap();
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("memclean").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("clear-history"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("memclean").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_operations_lists_tokens() {
    let dir = TempDir::new().unwrap();
    memclean(&dir)
        .arg("operations")
        .assert()
        .success()
        .stdout(predicate::str::contains("modifiedpagelist"))
        .stdout(predicate::str::contains("priority0standbylist"))
        .stdout(predicate::str::contains("Clear working sets"));
}

#[test]
fn test_history_empty_data_dir() {
    let dir = TempDir::new().unwrap();
    memclean(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No memory usage history recorded yet."));
}

#[test]
fn test_history_sorted_by_freed() {
    let dir = TempDir::new().unwrap();
    write_history(
        dir.path(),
        &[
            "2024-01-01 08:00:00,4.00,6.50,2.50",
            "2024-01-02 08:00:00,3.00,3.10,0.10",
            "2024-01-03 08:00:00,2.00,12.25,10.25",
        ],
    );

    let output = memclean(&dir)
        .args(["history", "--sort", "freed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorted by Freed Memory (descending)"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let big = stdout.find("10.25").unwrap();
    let small = stdout.find("0.10").unwrap();
    assert!(big < small);
    assert!(!stdout.contains("page 1 of"));
}

#[test]
fn test_history_paginates_large_history() {
    let dir = TempDir::new().unwrap();
    let rows: Vec<String> = (1..=12)
        .map(|day| format!("2024-01-{day:02} 08:00:00,1.00,2.00,1.00"))
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_history(dir.path(), &rows);

    memclean(&dir)
        .args(["history", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing records 11-12 of 12 (page 2 of 2)"));
}

#[test]
fn test_history_page_size_is_bounded() {
    let dir = TempDir::new().unwrap();
    memclean(&dir)
        .args(["history", "--page-size", "100"])
        .assert()
        .failure();
}

#[test]
fn test_corrupt_history_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("memory_usage.csv"), "not,a\nhistory").unwrap();
    memclean(&dir).arg("history").assert().failure();
    assert!(dir.path().join("memory_usage.csv").exists());
}

#[test]
fn test_clear_history_declined_keeps_file() {
    let dir = TempDir::new().unwrap();
    write_history(dir.path(), &["2024-01-01 08:00:00,4.00,6.50,2.50"]);

    memclean(&dir)
        .arg("clear-history")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("delete 1 history record(s)"))
        .stdout(predicate::str::contains("History left unchanged."));
    assert!(dir.path().join("memory_usage.csv").exists());
}

#[test]
fn test_clear_history_with_yes() {
    let dir = TempDir::new().unwrap();
    write_history(dir.path(), &["2024-01-01 08:00:00,4.00,6.50,2.50"]);

    memclean(&dir)
        .args(["clear-history", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared."));
    assert!(!dir.path().join("memory_usage.csv").exists());

    memclean(&dir)
        .args(["clear-history", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history to clear."));
}

#[test]
fn test_clean_with_missing_tool_fails() {
    let dir = TempDir::new().unwrap();
    memclean(&dir)
        .arg("--tool")
        .arg(dir.path().join("missing.exe"))
        .args(["clean", "--op", "standbylist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    assert!(!dir.path().join("memory_usage.csv").exists());
}

#[test]
fn test_clean_rejects_unknown_operation() {
    let dir = TempDir::new().unwrap();
    memclean(&dir)
        .args(["clean", "--op", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown cleanup operation 'everything'"));
}

#[cfg(unix)]
#[test]
fn test_clean_with_failing_tool_shows_step() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("EmptyStandbyList.exe");
    std::fs::write(&tool, "#!/bin/sh\necho 'Privilege not held' >&2\nexit 1\n").unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    memclean(&dir)
        .arg("--tool")
        .arg(&tool)
        .args(["clean", "--op", "workingsets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step: workingsets"))
        .stderr(predicate::str::contains("Privilege not held"));
}
