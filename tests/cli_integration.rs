//! CLI integration tests for gendeps.
//!
//! These tests run the built binary and check its exit status, its usage
//! messages and the Julia source it writes to stdout.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

/// Get the gendeps binary command.
fn gendeps() -> Command {
    Command::cargo_bin("gendeps").unwrap()
}

/// Run gendeps without arguments and return what it wrote to stdout.
fn generated() -> String {
    let output = gendeps().output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

// ============================================================================
// Usage
// ============================================================================

#[test]
fn test_help_prints_usage_to_stderr() {
    gendeps()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage: gendeps [--help|-h]"));
}

#[test]
fn test_short_help() {
    gendeps()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_argument_fails() {
    gendeps()
        .arg("deps.jl")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage: gendeps [--help|-h]"));
}

#[test]
fn test_unknown_flag_fails() {
    gendeps()
        .arg("--verbose")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_help_with_extra_argument_fails() {
    gendeps()
        .args(["--help", "extra"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_double_dash_fails() {
    gendeps()
        .arg("--")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage: gendeps [--help|-h]"));
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generates_bindings() {
    gendeps()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#\n# deps.jl --\n"))
        .stdout(predicate::str::contains("struct Status\n"))
        .stdout(predicate::str::contains("const BAD_SHMID = ShmId(-1)\n"))
        .stdout(predicate::str::contains("const SHARED_MAGIC = 0x310efc00\n"))
        .stdout(predicate::str::contains("@noinline shared_array_eltype"));
}

#[test]
fn test_output_is_deterministic() {
    assert_eq!(generated(), generated());
}

#[test]
fn test_status_members() {
    let text = generated();
    assert!(text.contains("const ERROR   = Status(-1)\n"));
    assert!(text.contains("const OK      = Status( 0)\n"));
    assert!(text.contains("const TIMEOUT = Status( 1)\n"));
    if std::mem::size_of::<std::os::raw::c_int>() == 4 {
        assert!(text.contains("struct Status\n    val::Cint\nend\n"));
        assert!(text.contains("const ShmId = Int32\n"));
        assert!(text.contains("const Cenum = Cint\n"));
    }
}

#[test]
fn test_dispatch_covers_all_element_types() {
    let text = generated();
    for ty in [
        "Int8", "UInt8", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64", "Cfloat",
        "Cdouble",
    ] {
        assert!(
            text.contains(&format!("shared_array_eltype(::Type{{{}}}) = ", ty)),
            "no dispatch clause for {ty}"
        );
    }
    assert!(text.contains("shared_array_eltype(::Type{T}) where T =\n"));
}

#[test]
fn test_library_path_constant() {
    let text = generated();
    let line = text
        .lines()
        .find(|l| l.starts_with("const taolib = "))
        .expect("library path constant");
    assert!(line.ends_with('"'));
}
