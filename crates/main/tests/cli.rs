use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn text2pdf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_text2pdf"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("run text2pdf")
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

fn write_input(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, "first line\nsecond line\n").expect("write input fixture");
    path
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn successful_conversion_exits_zero() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), "notes.txt");

    let output = text2pdf(&["-i", arg(&input)]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Generated "));
    assert!(dir.path().join("notes.1.pdf").is_file());
}

#[test]
fn skipped_input_exits_zero() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), "notes.txt");
    fs::write(dir.path().join("notes.1.pdf"), b"keep me").expect("seed existing output");

    let output = text2pdf(&["-i", arg(&input)]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        fs::read(dir.path().join("notes.1.pdf")).expect("existing output"),
        b"keep me"
    );
}

#[test]
fn missing_input_exits_one() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("absent.txt");

    let output = text2pdf(&["-i", arg(&missing)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: input not found"));
}

#[test]
fn write_failure_exits_one_with_cause() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), "notes.txt");
    let target = dir.path().join("missing-dir").join("out.pdf");

    let output = text2pdf(&["-i", arg(&input), "-o", arg(&target)]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.starts_with("Error: failed to write"), "stderr: {stderr}");
    assert!(stderr.contains("\n  caused by: "), "stderr: {stderr}");
}

#[test]
fn batch_with_failed_input_exits_one() {
    let input_dir = TempDir::new().expect("input dir");
    write_input(input_dir.path(), "good.txt");
    fs::write(input_dir.path().join("bad.txt"), [0xff, 0xfe]).expect("invalid fixture");

    let output = text2pdf(&["-i", arg(input_dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 converted, 0 skipped, 1 failed"), "stdout: {stdout}");
    assert!(input_dir.path().join("good.1.pdf").is_file());
}

#[test]
fn clean_batch_exits_zero() {
    let input_dir = TempDir::new().expect("input dir");
    write_input(input_dir.path(), "a.txt");
    write_input(input_dir.path(), "b.txt");

    let output = text2pdf(&["-i", arg(input_dir.path())]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}
