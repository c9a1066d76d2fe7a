//! Plan command behavior through the compiled binary

mod common;

use common::helpers::{gantry_binary, write_bundle_manifest, write_extension_manifest};
use std::process::Command;
use tempfile::TempDir;

/// Test 1: extension manifests print an extension-mode plan
#[test]
fn plan_prints_extension_mode_json() {
    let temp = TempDir::new().unwrap();
    let manifest = write_extension_manifest(temp.path(), &["demo._native"]);

    let output = Command::new(gantry_binary())
        .args(["plan", "extension", "--manifest"])
        .arg(&manifest)
        .output()
        .expect("Failed to execute gantry plan");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"mode\": \"extension\""), "{stdout}");
    assert!(stdout.contains("\"demo._native\""), "{stdout}");
}

/// Test 2: bundle manifests print a bundle-mode plan
#[test]
fn plan_prints_bundle_mode_json() {
    let temp = TempDir::new().unwrap();
    let manifest = write_bundle_manifest(temp.path());

    let output = Command::new(gantry_binary())
        .args(["plan", "bundle", "--manifest"])
        .arg(&manifest)
        .output()
        .expect("Failed to execute gantry plan");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"mode\": \"bundle\""), "{stdout}");
    assert!(stdout.contains("\"entry-script\": \"run_demo.py\""), "{stdout}");
}

/// Test 3: the manifest path can come from the environment
#[test]
fn plan_respects_manifest_env_var() {
    let temp = TempDir::new().unwrap();
    let manifest = write_extension_manifest(temp.path(), &["demo._native"]);

    let output = Command::new(gantry_binary())
        .args(["plan", "extension"])
        .env("GANTRY_MANIFEST", &manifest)
        .output()
        .expect("Failed to execute gantry plan");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"mode\": \"extension\""), "{stdout}");
}

/// Test 4: without a path the manifest is discovered in the working
/// directory
#[test]
fn plan_discovers_manifest_in_working_directory() {
    let temp = TempDir::new().unwrap();
    write_extension_manifest(temp.path(), &["demo._native"]);

    let output = Command::new(gantry_binary())
        .args(["plan", "extension"])
        .current_dir(temp.path())
        .env_remove("GANTRY_MANIFEST")
        .output()
        .expect("Failed to execute gantry plan");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"demo._native\""), "{stdout}");
}

/// Test 5: one manifest serves both plans, chosen per invocation
#[test]
fn plan_resolves_either_mode_from_a_dual_manifest() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("gantry.toml");
    std::fs::write(
        &manifest,
        r#"[package]
name = "demo"
version = "0.1.0"

[[extension]]
name = "demo._native"

[bundle]
entry-script = "run.py"
"#,
    )
    .expect("Failed to write manifest");

    let output = Command::new(gantry_binary())
        .args(["plan", "extension", "--manifest"])
        .arg(&manifest)
        .output()
        .expect("Failed to execute gantry plan");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"mode\": \"extension\""), "{stdout}");

    let output = Command::new(gantry_binary())
        .args(["plan", "bundle", "--manifest"])
        .arg(&manifest)
        .output()
        .expect("Failed to execute gantry plan");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"mode\": \"bundle\""), "{stdout}");
}

/// Test 6: requesting a plan the manifest does not declare fails
#[test]
fn plan_reports_missing_bundle_section() {
    let temp = TempDir::new().unwrap();
    let manifest = write_extension_manifest(temp.path(), &["demo._native"]);

    let output = Command::new(gantry_binary())
        .args(["plan", "bundle", "--manifest"])
        .arg(&manifest)
        .output()
        .expect("Failed to execute gantry plan");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no [bundle] section"), "{stderr}");
}

/// Test 7: completion scripts generate for common shells
#[test]
fn completion_generates_bash_script() {
    let output = Command::new(gantry_binary())
        .args(["completion", "bash"])
        .output()
        .expect("Failed to execute gantry completion");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gantry"), "{stdout}");
}
