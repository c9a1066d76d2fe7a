//! Test fixture utilities

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// Path to the compiled gantry binary
#[allow(dead_code)]
pub(crate) fn gantry_binary() -> &'static str {
    env!("CARGO_BIN_EXE_gantry")
}

/// Write a gantry.toml declaring native extensions
#[allow(dead_code)]
pub(crate) fn write_extension_manifest(dir: &Path, extensions: &[&str]) -> PathBuf {
    let mut content = String::new();
    writeln!(content, "[package]").unwrap();
    writeln!(content, "name = \"demo\"").unwrap();
    writeln!(content, "version = \"0.1.0\"").unwrap();
    writeln!(content, "packages = [\"demo\"]").unwrap();
    for name in extensions {
        writeln!(content).unwrap();
        writeln!(content, "[[extension]]").unwrap();
        writeln!(content, "name = \"{name}\"").unwrap();
    }

    let path = dir.join("gantry.toml");
    fs::write(&path, content).expect("Failed to write manifest");
    path
}

/// Write a gantry.toml declaring a bundled application
#[allow(dead_code)]
pub(crate) fn write_bundle_manifest(dir: &Path) -> PathBuf {
    let content = r#"[package]
name = "demo"
version = "0.1.0"
packages = ["demo"]

[bundle]
entry-script = "run_demo.py"
command = "demo"
launcher = "demo.cli:main"
display-name = "Demo App"
"#;

    let path = dir.join("gantry.toml");
    fs::write(&path, content).expect("Failed to write manifest");
    path
}

/// Write an executable script that appends its invocation to a log
/// file and exits with the given code
#[cfg(unix)]
#[allow(dead_code)]
pub(crate) fn write_spy_tool(dir: &Path, name: &str, log: &Path, exit_code: i32) -> PathBuf {
    let script = format!(
        "#!/bin/sh\necho \"{name} $@\" >> \"{log}\"\nexit {exit_code}\n",
        log = log.display(),
    );
    write_executable(dir, name, &script)
}

/// Write an executable script that fakes a compiler by dropping a
/// file at the given path
#[cfg(unix)]
#[allow(dead_code)]
pub(crate) fn write_artifact_spy(dir: &Path, name: &str, artifact: &Path) -> PathBuf {
    let script = format!(
        "#!/bin/sh\nmkdir -p \"$(dirname \"{artifact}\")\"\nprintf binary > \"{artifact}\"\n",
        artifact = artifact.display(),
    );
    write_executable(dir, name, &script)
}

#[cfg(unix)]
#[allow(dead_code)]
fn write_executable(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, script).expect("Failed to write script");

    let mut perms = fs::metadata(&path)
        .expect("Failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to make script executable");

    path
}
