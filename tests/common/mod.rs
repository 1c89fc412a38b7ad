#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{TempDir, tempdir};

/// Header and rows of a small STOQS-style export, tab separated.
pub const STOQS_HEADER: &str = "measurement__instantpoint__timevalue\tmeasurement__depth\tmeasurement__geom.x\tmeasurement__geom.y\tparameter__name\tdatavalue\tplatform__name";

/// Builds a tab-separated STOQS export from `(time, depth, name, value)` rows.
pub fn stoqs_export(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut out = String::from(STOQS_HEADER);
    out.push('\n');
    for (time, depth, name, value) in rows {
        out.push_str(&format!(
            "{time}\t{depth}\t-121.9\t36.8\t{name}\t{value}\tdorado\n"
        ));
    }
    out
}

/// `stoqs-trim` with the environment defaults cleared.
pub fn trim_command() -> Command {
    let mut cmd = Command::cargo_bin("stoqs-trim").expect("binary exists");
    cmd.env_remove("common")
        .env_remove("value")
        .env_remove("extra")
        .env_remove("RUST_LOG");
    cmd
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}
