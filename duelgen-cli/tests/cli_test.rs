use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn duelgen() -> Result<Command> {
    let mut cmd = Command::cargo_bin("duelgen-cli")?;
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_run_sequential_five_pairs() -> Result<()> {
    duelgen()?
        .args(["run", "--strategy", "sequential", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generator65 took"))
        .stdout(predicate::str::contains("generator8921 took"))
        .stdout(predicate::str::contains("comparator took"))
        .stdout(predicate::str::contains(
            "Total Number of Matching Pairs is: => 1",
        ));
    Ok(())
}

#[test]
fn test_run_concurrent_labels_workers() -> Result<()> {
    duelgen()?
        .args(["run", "-s", "concurrent", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("worker65 took"))
        .stdout(predicate::str::contains("worker8921 took"))
        .stdout(predicate::str::contains(
            "Total Number of Matching Pairs is: => 1",
        ));
    Ok(())
}

#[test]
fn test_bench_reports_both_runs_and_speedup() -> Result<()> {
    duelgen()?
        .args(["bench", "-n", "5", "--pause", "0s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sequential"))
        .stdout(predicate::str::contains("concurrent"))
        .stdout(predicate::str::contains("Total Time is ="))
        .stdout(predicate::str::contains("faster than Sequential"));
    Ok(())
}

#[test]
fn test_bench_json() -> Result<()> {
    let output = duelgen()?
        .args(["bench", "--json", "-n", "100000", "--pause", "0s"])
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["sequential"]["matches"], 3);
    assert_eq!(report["concurrent"]["matches"], 3);
    assert_eq!(report["sequential"]["pair_count"], 100000);
    assert!(report["speedup_percent"].is_number());
    Ok(())
}

#[test]
fn test_preview() -> Result<()> {
    duelgen()?
        .args(["preview", "-k", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1092455"))
        .stdout(predicate::str::contains("430625591"))
        .stdout(predicate::str::contains("Matching pairs in first 5: => 1"));
    Ok(())
}

#[test]
fn test_config_file_and_cli_override() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("duel.yaml");
    fs::write(&config_path, "pair_count: 1000000\nworker_threads: 4\n")?;

    // CLI pair count wins over the file's
    duelgen()?
        .args(["run", "-n", "5", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Total Number of Matching Pairs is: => 1",
        ));
    Ok(())
}

#[test]
fn test_cli_threads_fix_file_thread_count() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("duel.yaml");
    fs::write(&config_path, "worker_threads: 1\n")?;

    // The file alone is invalid; checked only after -j is applied
    duelgen()?
        .args(["run", "-s", "concurrent", "-n", "5", "-j", "4", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Total Number of Matching Pairs is: => 1",
        ));

    duelgen()?
        .args(["run", "-n", "5", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("worker_threads must be at least 2"));
    Ok(())
}

#[test]
fn test_no_subcommand_runs_bench() -> Result<()> {
    duelgen()?
        .args(["-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=============== sequential"))
        .stdout(predicate::str::contains("=============== concurrent"))
        .stdout(predicate::str::contains("faster than Sequential"));
    Ok(())
}

#[test]
fn test_single_worker_thread_rejected() -> Result<()> {
    duelgen()?
        .args(["run", "-n", "5", "-j", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("worker_threads must be at least 2"));
    Ok(())
}

#[test]
fn test_unknown_strategy_rejected() -> Result<()> {
    duelgen()?
        .args(["run", "-s", "threads", "-n", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown strategy"));
    Ok(())
}

#[test]
fn test_missing_config_file() -> Result<()> {
    duelgen()?
        .args(["run", "-n", "5", "--config", "does-not-exist.yaml"])
        .assert()
        .failure();
    Ok(())
}
