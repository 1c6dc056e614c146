use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn rmedian() -> Command {
    let mut cmd = Command::cargo_bin("rmedian").expect("binary exists");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn prints_text_report() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("people.csv");
    fs::write(&path, "fname, lname, age\nAnn, Aa, 40\nBen, Bb, 10\nCal, Cc, 30\nDee, Dd, 20\n")
        .expect("write input");

    let out = rmedian().arg(&path).output().expect("run rmedian");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Average age: 25.0 yrs"), "{stdout}");
    assert!(stdout.contains("Median age: 25.0 yrs"), "{stdout}");
    assert!(stdout.contains("between Dd, Dee at 20 years and Cc, Cal at 30 years"), "{stdout}");
    assert!(stdout.contains("Processed: 4 lines"), "{stdout}");
}

#[test]
fn missing_and_malformed_inputs_are_not_fatal() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("mixed.csv");
    fs::write(&path, "age, fname, lname\n50, Jane, Doe\nX, Y, notanumber\n").expect("write input");
    let missing = tmp.path().join("nope.csv");

    let out = rmedian()
        .arg(&missing)
        .arg(&path)
        .args(["--strategy", "select", "--seed", "7"])
        .output()
        .expect("run rmedian");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.contains("Median entity: Doe, Jane"), "{stdout}");
    assert!(stdout.contains("Processed: 1 lines"), "{stdout}");
    assert!(stderr.contains("nope.csv"), "{stderr}");
    assert!(stderr.contains("line 3"), "{stderr}");
}

#[test]
fn json_output_for_empty_run() {
    let out = rmedian().args(["--format", "json"]).output().expect("run rmedian");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(v["mean"], 0.0);
    assert_eq!(v["totals"]["count"], 0);
    assert_eq!(v["median"]["resolution"], "undefined");
}

#[test]
fn reads_stdin() {
    let out = rmedian()
        .arg("-")
        .write_stdin("lname, fname, age\nLee, Sam, 61\n")
        .output()
        .expect("run rmedian");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Median entity: Lee, Sam"), "{stdout}");
}
