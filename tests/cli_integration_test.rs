//! CLI integration tests: run the cbtc binary to cover main.rs branches.
//! Uses CARGO_BIN_EXE_cbtc when set (e.g. by `cargo test`).

use std::io::Write;
use std::process::Command;

fn bin() -> Option<std::path::PathBuf> {
    std::env::var_os("CARGO_BIN_EXE_cbtc").map(std::path::PathBuf::from)
}

fn square_layout_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "nodes": [
            {{ "id": 0, "x": 0.0, "y": 0.0 }},
            {{ "id": 1, "x": 1.0, "y": 0.0 }},
            {{ "id": 2, "x": 1.0, "y": 1.0 }},
            {{ "id": 3, "x": 0.0, "y": 1.0 }}
        ] }}"#
    )
    .unwrap();
    file
}

#[test]
fn test_cli_help_succeeds() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let out = Command::new(bin)
        .arg("--help")
        .output()
        .expect("run --help");
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("cbtc"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("compare"));
}

#[test]
fn test_cli_run_square_json() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let layout = square_layout_file();
    let out = Command::new(&bin)
        .args(["run", "--radius", "1.5", "--cone-angle", "2pi/3", "--shrink-back", "--json"])
        .arg("--layout")
        .arg(layout.path())
        .output()
        .expect("run square");
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(report["stages"]["final_edges"], 8);
    assert_eq!(report["metrics"]["is_connected"], true);
}

#[test]
fn test_cli_run_summary() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let out = Command::new(&bin)
        .args(["run", "--node-count", "30", "--seed", "7"])
        .output()
        .expect("run summary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Edges per stage"));
    assert!(stdout.contains("Savings"));
}

#[test]
fn test_cli_rejects_invalid_cone_angle() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let out = Command::new(&bin)
        .args(["run", "--cone-angle", "3pi"])
        .output()
        .expect("run with bad angle");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cone_angle"));
}

#[test]
fn test_cli_missing_layout_fails() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let out = Command::new(&bin)
        .args(["run", "--layout", "nonexistent_layout_12345.json"])
        .output()
        .expect("run with missing layout");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Failed to read layout file"));
}

#[test]
fn test_cli_compare_lists_every_scenario() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let out = Command::new(&bin)
        .args(["compare", "--node-count", "25", "--json"])
        .output()
        .expect("run compare");
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(report["scenarios"].as_array().map(Vec::len), Some(7));
    assert_eq!(report["node_count"], 25);
}
