//! The `cramer-bench` binary: argument handling and the CSV it writes

use std::fs;
use std::process::{Command, Output};

use tempfile::tempdir;

fn cramer_bench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cramer-bench"))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to launch cramer-bench")
}

#[test]
fn test_no_sizes_prints_usage_and_exits_1() {
    let output = cramer_bench(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: cramer-bench <SIZES>..."), "stderr was: {stderr}");
}

#[test]
fn test_zero_size_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.csv");

    let output = cramer_bench(&["0", "--output", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be positive"));
    assert!(!path.exists());
}

#[test]
fn test_non_numeric_size_rejected() {
    let output = cramer_bench(&["3", "big"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_cleanly() {
    let output = cramer_bench(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--seed"));
}

#[test]
fn test_seeded_run_writes_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");

    let output = cramer_bench(&["2", "3", "--seed", "4", "--output", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Results saved to"));

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "size,seq_time,par_time,speedup");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2,"));
    assert!(lines[2].starts_with("3,"));
}

#[test]
fn test_same_seed_same_outcomes() {
    let dir = tempdir().unwrap();
    let outcomes = |name: &str| {
        let path = dir.path().join(name);
        let output = cramer_bench(&[
            "2", "4", "6", "--seed", "17", "--with-outcome", "--output", path.to_str().unwrap(),
        ]);
        assert!(output.status.success());

        fs::read_to_string(&path)
            .unwrap()
            .lines()
            .skip(1)
            .map(|line| line.rsplit(',').next().unwrap().to_string())
            .collect::<Vec<_>>()
    };

    let first = outcomes("first.csv");
    assert_eq!(first.len(), 3);
    assert_eq!(first, outcomes("second.csv"));
}
