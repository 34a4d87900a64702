use assert_cmd::cargo;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::{fs, process::Command};
use tempfile::{tempdir, NamedTempFile};
use whisker_test::shared_resource_path;

#[test]
fn check_when_not_a_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("check").arg("test/file/doesnt/exist");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error"));

    Ok(())
}

#[test]
fn check_when_trace_log_and_not_a_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("-v")
        .arg("-v")
        .arg("-v")
        .arg("-v")
        .arg("check")
        .arg("test/file/doesnt/exist");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error"));

    Ok(())
}

#[test]
fn check_when_too_verbose_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("-vvvvv")
        .arg("check")
        .arg(shared_resource_path("arithmetic.wsk"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("at most 4 times"));

    Ok(())
}

#[test]
fn check_when_valid_file_then_ok() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("check").arg(shared_resource_path("declarations.wsk"));
    cmd.assert().success().stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn check_when_syntax_error_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("check").arg(shared_resource_path("syntax_error.wsk"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P0005"))
        .stderr(predicate::str::contains("Number of errors: 2"));

    Ok(())
}

#[test]
fn check_when_uninitialized_file_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("check").arg(shared_resource_path("uninitialized.wsk"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P0011"));

    Ok(())
}

#[test]
fn check_when_log_file_then_writes_log() -> Result<(), Box<dyn std::error::Error>> {
    let log = NamedTempFile::new()?;
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("-vvv")
        .arg("--log-file")
        .arg(log.path())
        .arg("check")
        .arg(shared_resource_path("arithmetic.wsk"));
    cmd.assert().success();

    let contents = fs::read_to_string(log.path())?;
    assert!(contents.contains("DEBUG"));

    Ok(())
}

#[test]
fn tokenize_when_valid_file_then_prints_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("tokenize").arg(shared_resource_path("arithmetic.wsk"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Type: Number, Value: '2', At: Ln 2,Col 1",
        ))
        .stdout(predicate::str::contains("Type: Eof"));

    Ok(())
}

#[test]
fn echo_when_valid_file_then_prints_tree() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("echo").arg(shared_resource_path("arithmetic.wsk"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(; (+ 2 3))"));

    Ok(())
}

#[test]
fn compile_when_valid_file_then_writes_framed_program() -> Result<(), Box<dyn std::error::Error>>
{
    let output = NamedTempFile::new()?;
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("compile")
        .arg(shared_resource_path("control_flow.wsk"))
        .arg("-o")
        .arg(output.path());
    cmd.assert().success().stdout(predicate::str::is_empty());

    let contents = fs::read_to_string(output.path())?;
    assert!(contents.starts_with("JMP .main\n.end\nHLT\n.main\n"));
    assert!(contents.ends_with("JMP .end\n"));
    assert!(contents.contains(".end_if_0\n"));

    Ok(())
}

#[test]
fn compile_when_semantic_error_then_no_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("out.asm");
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("compile")
        .arg(shared_resource_path("uninitialized.wsk"))
        .arg("--output")
        .arg(&output);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P0011"));
    assert!(!output.exists());

    Ok(())
}

#[test]
fn compile_when_unsupported_construct_then_err() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("out.asm");
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("compile")
        .arg(shared_resource_path("declarations.wsk"))
        .arg("-o")
        .arg(&output);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("P0020"));
    assert!(!output.exists());

    Ok(())
}

#[test]
fn version_when_called_then_prints_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo::cargo_bin!("whiskerc"));

    cmd.arg("version");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("whiskerc version "));

    Ok(())
}
