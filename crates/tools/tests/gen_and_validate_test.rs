use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn generated_files_cross_validate() {
    let tmp = TempDir::new().expect("tempdir");
    let plain = tmp.path().join("a.csv");
    let permuted = tmp.path().join("b.csv.gz");

    Command::cargo_bin("gen_testfile")
        .expect("binary exists")
        .args(["--count", "2001", "--seed", "1", "--output"])
        .arg(&plain)
        .assert()
        .success();
    Command::cargo_bin("gen_testfile")
        .expect("binary exists")
        .args(["--count", "1500", "--seed", "2", "--columns", "age, fname, lname"])
        .args(["--malformed-rate", "0.1", "--output"])
        .arg(&permuted)
        .assert()
        .success();

    let head = fs::read_to_string(&plain).expect("read generated file");
    assert!(head.starts_with("fname, lname, age\n"));
    assert_eq!(head.lines().count(), 2002);

    let out = Command::cargo_bin("cross_validate")
        .expect("binary exists")
        .arg(&plain)
        .arg(&permuted)
        .arg(tmp.path().join("missing.csv"))
        .args(["--seed", "3"])
        .output()
        .expect("run cross_validate");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "{stdout}");
    assert!(stdout.contains("Median test passed: true"), "{stdout}");
    assert!(!stdout.contains("MISMATCH"), "{stdout}");
}

#[test]
fn rejects_invalid_column_order() {
    let tmp = TempDir::new().expect("tempdir");
    Command::cargo_bin("gen_testfile")
        .expect("binary exists")
        .args(["--columns", "age, age, lname", "--output"])
        .arg(tmp.path().join("x.csv"))
        .assert()
        .failure();
}
