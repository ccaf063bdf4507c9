extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn koch_curve_writes_a_bitmap() {
    let dir = tempdir().unwrap();
    let stem = dir.path().join("curve");
    Command::cargo_bin("fractalgen")
        .unwrap()
        .args(&[
            "koch-curve",
            "--iterations",
            "2",
            "--size",
            "64x64",
            "--output",
            stem.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));
    assert!(dir.path().join("curve.bmp").exists());
}

#[test]
fn koch_snowflake_honors_the_format_flag() {
    let dir = tempdir().unwrap();
    let stem = dir.path().join("flake");
    Command::cargo_bin("fractalgen")
        .unwrap()
        .args(&[
            "koch-snowflake",
            "--iterations",
            "1",
            "--dimension",
            "64",
            "--format",
            "PNG",
            "--output",
            stem.to_str().unwrap(),
        ])
        .assert()
        .success();
    assert!(dir.path().join("flake.png").exists());
}

#[test]
fn mandelbrot_writes_a_bitmap() {
    let dir = tempdir().unwrap();
    let stem = dir.path().join("mandel");
    Command::cargo_bin("fractalgen")
        .unwrap()
        .args(&[
            "mandelbrot",
            "--size",
            "32x18",
            "--max-iter",
            "5",
            "--output",
            stem.to_str().unwrap(),
        ])
        .assert()
        .success();
    assert!(dir.path().join("mandel.bmp").exists());
}

#[test]
fn unsupported_formats_are_reported_as_render_failures() {
    let dir = tempdir().unwrap();
    let stem = dir.path().join("doc");
    Command::cargo_bin("fractalgen")
        .unwrap()
        .args(&[
            "koch-curve",
            "--iterations",
            "1",
            "--size",
            "32x32",
            "--format",
            "pdf",
            "--output",
            stem.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}

#[test]
fn zero_iterations_are_rejected_up_front() {
    Command::cargo_bin("fractalgen")
        .unwrap()
        .args(&["koch-curve", "--iterations", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Iteration count must be between 1 and 10",
        ));
}
