use std::process::Command;

fn bid_insight() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bid-insight"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn run_reports_missing_input_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let out = bid_insight()
        .current_dir(dir.path())
        .args(["run", "--input"])
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("input does not exist"), "stderr: {stderr}");
    assert!(out.stdout.is_empty());
}

#[test]
fn bad_config_path_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    let out = bid_insight()
        .current_dir(dir.path())
        .args(["--config", "nope.toml", "languages"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("reading config"));
}
